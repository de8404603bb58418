use std::time::Duration;

/// Timings and counts gathered during one world step.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct StepProfile {
    pub broad_phase_time: Duration,
    pub narrow_phase_time: Duration,
    pub solver_time: Duration,
    pub integrator_time: Duration,
    pub total_step_time: Duration,

    pub body_count: usize,
    pub candidate_pairs: usize,
    pub filtered_pairs: usize,
    pub manifold_count: usize,
    pub contact_count: usize,
    pub resting_manifolds: usize,
    pub removed_bodies: usize,
}

impl StepProfile {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn share(part: Duration, total_us: f32) -> f32 {
        part.as_micros() as f32 / total_us * 100.0
    }

    /// Logs the profile at debug level.
    pub fn report(&self) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        log::debug!(
            "step: bodies={} pairs={} filtered={} manifolds={} contacts={} resting={} removed={}",
            self.body_count,
            self.candidate_pairs,
            self.filtered_pairs,
            self.manifold_count,
            self.contact_count,
            self.resting_manifolds,
            self.removed_bodies,
        );

        let total_us = self.total_step_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }
        log::debug!(
            "step time {:.3} ms: broad {:.1}% narrow {:.1}% solver {:.1}% integrate {:.1}%",
            self.total_step_time.as_secs_f32() * 1000.0,
            Self::share(self.broad_phase_time, total_us),
            Self::share(self.narrow_phase_time, total_us),
            Self::share(self.solver_time, total_us),
            Self::share(self.integrator_time, total_us),
        );
    }
}
