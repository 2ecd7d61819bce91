pub struct StatsHelper;

impl StatsHelper {
    /// Smallest and largest value, skipping NaN cells. `None` when nothing is defined.
    pub fn nan_min_max<'a, I>(values: I) -> Option<(f64, f64)>
    where
        I: IntoIterator<Item = &'a f64>,
    {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
