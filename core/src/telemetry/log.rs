use log::{debug, info};

/// Stage logger shared by the reduction pipeline.
#[derive(Debug, Clone)]
pub struct LogManager {
    target: &'static str,
}

impl LogManager {
    pub fn new() -> Self {
        Self {
            target: "surfacecore",
        }
    }

    /// Records stage progress.
    pub fn record(&self, message: &str) {
        info!(target: self.target, "{}", message);
    }

    /// Records per-stage detail that is only useful when debugging a survey.
    pub fn detail(&self, message: &str) {
        debug!(target: self.target, "{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
