use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for capture session events.
///
/// Decouples the session loop from specific output mechanisms (stdout, UI
/// callbacks, log crate) so each caller can observe session behavior
/// without changing the orchestration code.
pub trait SessionLogger: Send {
    /// Report zone-level progress.
    fn progress(&mut self, captured: usize, total: usize);

    /// Record a point-in-time metric (e.g. queue depth, frames evaluated).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events. Used by tests where logger
/// output is irrelevant.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn progress(&mut self, _captured: usize, _total: usize) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger that tracks metrics and provides a summary report
/// at session completion.
///
/// Progress is only emitted when the captured count changes, to avoid
/// repeating the same line for every frame.
pub struct StdoutSessionLogger {
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    last_captured: Option<usize>,
    messages: Vec<String>,
}

impl StdoutSessionLogger {
    pub fn new() -> Self {
        Self {
            metrics: HashMap::new(),
            start_time: Instant::now(),
            last_captured: None,
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.metrics.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = Vec::new();
        lines.push(format!("Session summary ({elapsed_s:.1}s total):"));

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let values = &self.metrics[name];
            let last = values.last().copied().unwrap_or(0.0);
            lines.push(format!("  {name}: {last:.0}"));
        }

        Some(lines.join("\n"))
    }

    /// Returns the metric data for a given name.
    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

impl Default for StdoutSessionLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn progress(&mut self, captured: usize, total: usize) {
        if self.last_captured == Some(captured) {
            return;
        }
        self.last_captured = Some(captured);
        log::info!("Captured: {captured}/{total} zones");
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- NullSessionLogger tests ---

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullSessionLogger;
        logger.progress(1, 5);
        logger.metric("frames_evaluated", 3.0);
        logger.info("hello");
        logger.summary();
        // No panics = success
    }

    // --- StdoutSessionLogger tests ---

    #[test]
    fn test_metric_records_values() {
        let mut logger = StdoutSessionLogger::new();
        logger.metric("frames_evaluated", 3.0);
        logger.metric("frames_evaluated", 4.0);

        let values = logger.metrics_for("frames_evaluated").unwrap();
        assert_eq!(values.len(), 2);
        assert!((values[1] - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_includes_metrics() {
        let mut logger = StdoutSessionLogger::new();
        logger.metric("frames_evaluated", 120.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Session summary"));
        assert!(summary.contains("frames_evaluated: 120"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = StdoutSessionLogger::new();
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_progress_deduplicates_repeats() {
        // We can't easily capture log::info output, so we test the dedupe
        // state directly.
        let mut logger = StdoutSessionLogger::new();
        logger.progress(1, 5);
        logger.progress(1, 5);
        logger.progress(2, 5);
        assert_eq!(logger.last_captured, Some(2));
    }

    #[test]
    fn test_info_stores_messages() {
        let mut logger = StdoutSessionLogger::new();
        logger.info("hello world");
        assert_eq!(logger.messages.len(), 1);
        assert_eq!(logger.messages[0], "hello world");
    }
}
