use log::{Level, log_enabled, warn};
use std::time::{Duration, Instant};

/// Scoped timer for one pipeline phase.
///
/// Logs at trace level when dropped and, when built with
/// [`ScopedTimer::recording`], adds the elapsed time to a profile slot.
pub struct ScopedTimer<'a> {
    label: &'static str,
    start: Instant,
    sink: Option<&'a mut Duration>,
}

impl ScopedTimer<'static> {
    pub fn new(label: &'static str) -> Self {
        Self::start(label, None)
    }
}

impl<'a> ScopedTimer<'a> {
    pub fn recording(label: &'static str, sink: &'a mut Duration) -> Self {
        Self::start(label, Some(sink))
    }

    fn start(label: &'static str, sink: Option<&'a mut Duration>) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("start {label}");
        }
        Self {
            label,
            start: Instant::now(),
            sink,
        }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        if let Some(sink) = self.sink.as_deref_mut() {
            *sink += elapsed;
        }
        if log_enabled!(Level::Trace) {
            log::trace!("end {} ({} µs)", self.label, elapsed.as_micros());
        }
    }
}

/// Warns when a step took longer than `budget_ms`; returns whether it did.
pub fn warn_if_frame_budget_exceeded(duration: Duration, budget_ms: f32) -> bool {
    let elapsed_ms = duration.as_secs_f32() * 1000.0;
    if elapsed_ms > budget_ms {
        warn!("Step exceeded budget: {elapsed_ms:.2} ms > {budget_ms:.2} ms");
        return true;
    }
    false
}
