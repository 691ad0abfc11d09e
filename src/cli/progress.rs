//! Console loading indicator

use crate::core::search::{Progress, ProgressReporter};
use std::io::{IsTerminal, Write};
use std::sync::Mutex;

/// Writes progress to stderr, redrawing a single line on terminals
pub struct ConsoleProgress {
    interactive: bool,
    last_len: Mutex<usize>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            interactive: std::io::stderr().is_terminal(),
            last_len: Mutex::new(0),
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Text shown for one update
pub fn render(message: &str, progress: Option<&Progress>) -> String {
    match progress.and_then(Progress::percent) {
        Some(pct) => format!("⏳ {message} [{pct:>3.0}%]"),
        None => format!("⏳ {message}"),
    }
}

impl ProgressReporter for ConsoleProgress {
    fn show(&self, message: &str, progress: Option<Progress>) {
        let line = render(message, progress.as_ref());
        let mut stderr = std::io::stderr().lock();

        if self.interactive {
            let Ok(mut last_len) = self.last_len.lock() else {
                return;
            };
            let width = line.chars().count();
            let padding = last_len.saturating_sub(width);
            let _ = write!(stderr, "\r{line}{}", " ".repeat(padding));
            let _ = stderr.flush();
            *last_len = width;
        } else {
            let _ = writeln!(stderr, "{line}");
        }
    }

    fn hide(&self) {
        if !self.interactive {
            return;
        }
        if let Ok(mut last_len) = self.last_len.lock() {
            if *last_len > 0 {
                let mut stderr = std::io::stderr().lock();
                let _ = write!(stderr, "\r{}\r", " ".repeat(*last_len));
                let _ = stderr.flush();
                *last_len = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_known_total() {
        let progress = Progress::pages(1, Some(4));
        assert_eq!(render("Fetching page 1 of 4", Some(&progress)), "⏳ Fetching page 1 of 4 [ 25%]");
    }

    #[test]
    fn test_render_without_total() {
        let progress = Progress::pages(2, None);
        assert_eq!(render("Fetching page 2", Some(&progress)), "⏳ Fetching page 2");
        assert_eq!(render("Removing duplicates...", None), "⏳ Removing duplicates...");
    }
}
