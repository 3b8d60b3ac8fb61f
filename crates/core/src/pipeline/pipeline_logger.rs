use std::collections::HashMap;
use std::time::Instant;

/// Observer for extraction progress, stage timings and status messages.
///
/// Keeps the use case independent of where output goes (log crate for the
/// CLI, nothing at all in tests).
pub trait PipelineLogger: Send {
    /// Report decode progress. `total` is 0 when the frame count is unknown.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Log a recoverable problem (skipped frame, failed upload).
    fn warn(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
    fn warn(&mut self, _message: &str) {}
}

/// CLI logger backed by the `log` crate.
///
/// Progress output is throttled to every `throttle_frames` frames so long
/// videos do not flood the terminal.
pub struct StdoutPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
    frames_seen: usize,
    warnings: usize,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            start_time: Instant::now(),
            frames_seen: 0,
            warnings: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.frames_seen;
        let mut lines = vec![format!(
            "Extraction summary ({frames} frames decoded, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            lines.push(format!(
                "  {stage:8}: {:5} calls  avg {avg_ms:7.1}ms  total {total_ms:8.0}ms",
                durations.len()
            ));
        }

        if self.warnings > 0 {
            lines.push(format!("  Warnings: {}", self.warnings));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Decode rate: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(250)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.frames_seen = current;
        if current % self.throttle_frames != 0 && current != total {
            return;
        }
        if total > 0 {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Scanned {current}/{total} frames ({pct:.1}%)");
        } else {
            log::info!("Scanned {current} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn warn(&mut self, message: &str) {
        self.warnings += 1;
        log::warn!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
