//! Progress reporting port

/// Position of a running search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    /// `None` while the total is unknown
    pub total: Option<usize>,
    pub label: Option<String>,
}

impl Progress {
    /// Page progress of a single query
    pub fn pages(current: u32, expected: Option<u32>) -> Self {
        Self {
            current: current as usize,
            total: expected.map(|e| e as usize),
            label: None,
        }
    }

    /// Identity progress of a batch search
    pub fn steps(current: usize, total: usize, label: &str) -> Self {
        Self {
            current,
            total: Some(total),
            label: Some(label.to_string()),
        }
    }

    /// Completion percentage, when the total is known
    pub fn percent(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => {
                Some((self.current.min(total) as f64 / total as f64) * 100.0)
            }
            _ => None,
        }
    }
}

/// Receives loading-indicator updates
pub trait ProgressReporter: Send + Sync {
    /// Shows or updates the indicator
    fn show(&self, message: &str, progress: Option<Progress>);

    /// Clears the indicator
    fn hide(&self);
}

/// Reporter that discards updates
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn show(&self, _message: &str, _progress: Option<Progress>) {}

    fn hide(&self) {}
}

/// Calls [`ProgressReporter::hide`] when dropped
pub struct ProgressGuard<'a> {
    reporter: &'a dyn ProgressReporter,
}

impl<'a> ProgressGuard<'a> {
    pub fn new(reporter: &'a dyn ProgressReporter) -> Self {
        Self { reporter }
    }
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.reporter.hide();
    }
}
