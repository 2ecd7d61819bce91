pub struct MeshHelper;

impl MeshHelper {
    /// `count` evenly spaced values from `start` to `end`. Both ends are hit exactly.
    pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (count - 1) as f64;
                let mut values: Vec<f64> =
                    (0..count).map(|i| start + step * i as f64).collect();
                values[count - 1] = end;
                values
            }
        }
    }

    /// True when every value is finite and larger than the one before it.
    pub fn is_strictly_increasing(values: &[f64]) -> bool {
        values.iter().all(|v| v.is_finite()) && values.windows(2).all(|w| w[0] < w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let values = MeshHelper::linspace(0.0, 20.0, 11);
        assert_eq!(values.len(), 11);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[10], 20.0);
        assert!((values[3] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn linspace_handles_degenerate_counts() {
        assert!(MeshHelper::linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(MeshHelper::linspace(2.5, 9.0, 1), vec![2.5]);
    }

    #[test]
    fn strictly_increasing_rejects_repeats_and_nan() {
        assert!(MeshHelper::is_strictly_increasing(&[0.0, 1.0, 2.0]));
        assert!(!MeshHelper::is_strictly_increasing(&[0.0, 1.0, 1.0]));
        assert!(!MeshHelper::is_strictly_increasing(&[0.0, f64::NAN, 2.0]));
    }
}
