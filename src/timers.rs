//! Phase timing for `PolicyEngine::compile`.

use std::time::{Duration, Instant};

use crate::metrics::CompilePhases;

/// The measured stages of a compile run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompilePhase {
    Resolve,
    Group,
    Merge,
}

/// Accumulated time per compile phase.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct PhaseTimings {
    resolve: Duration,
    group: Duration,
    merge: Duration,
}

impl PhaseTimings {
    /// Start timing `phase`; the elapsed time is added when the guard drops.
    pub(crate) fn start(&mut self, phase: CompilePhase) -> PhaseTimer<'_> {
        let slot = match phase {
            CompilePhase::Resolve => &mut self.resolve,
            CompilePhase::Group => &mut self.group,
            CompilePhase::Merge => &mut self.merge,
        };
        PhaseTimer {
            start: Instant::now(),
            slot,
        }
    }

    pub(crate) fn get(&self, phase: CompilePhase) -> Duration {
        match phase {
            CompilePhase::Resolve => self.resolve,
            CompilePhase::Group => self.group,
            CompilePhase::Merge => self.merge,
        }
    }

    pub(crate) fn millis(&self, phase: CompilePhase) -> f64 {
        millis(self.get(phase))
    }

    pub(crate) fn to_phases(self, total: Duration) -> CompilePhases {
        CompilePhases {
            resolve_ms: millis(self.resolve),
            group_ms: millis(self.group),
            merge_ms: millis(self.merge),
            total_ms: millis(total),
        }
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

/// RAII guard returned by [`PhaseTimings::start`].
pub(crate) struct PhaseTimer<'a> {
    start: Instant,
    slot: &'a mut Duration,
}

impl Drop for PhaseTimer<'_> {
    fn drop(&mut self) {
        *self.slot += self.start.elapsed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_phase_timer_records_into_its_phase() {
        let mut timings = PhaseTimings::default();
        {
            let _timer = timings.start(CompilePhase::Group);
            thread::sleep(Duration::from_millis(5));
        }
        assert!(timings.get(CompilePhase::Group) >= Duration::from_millis(5));
        assert_eq!(timings.get(CompilePhase::Resolve), Duration::ZERO);
        assert_eq!(timings.get(CompilePhase::Merge), Duration::ZERO);
    }

    #[test]
    fn test_phase_timer_accumulates() {
        let mut timings = PhaseTimings::default();
        for _ in 0..3 {
            let _timer = timings.start(CompilePhase::Resolve);
            thread::sleep(Duration::from_millis(2));
        }
        assert!(timings.get(CompilePhase::Resolve) >= Duration::from_millis(6));
    }

    #[test]
    fn test_to_phases_converts_to_millis() {
        let timings = PhaseTimings {
            resolve: Duration::from_millis(2),
            group: Duration::from_millis(1),
            merge: Duration::from_micros(500),
        };
        let phases = timings.to_phases(Duration::from_millis(4));
        assert!((phases.resolve_ms - 2.0).abs() < 1e-9);
        assert!((phases.merge_ms - 0.5).abs() < 1e-9);
        assert!((phases.overhead_ms() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_millis_does_not_truncate_long_phases() {
        let timings = PhaseTimings {
            resolve: Duration::from_micros(1_500),
            group: Duration::ZERO,
            merge: Duration::from_secs(u64::MAX),
        };
        assert!((timings.millis(CompilePhase::Resolve) - 1.5).abs() < 1e-9);
        assert_eq!(timings.millis(CompilePhase::Group), 0.0);
        assert!(timings.millis(CompilePhase::Merge) > u64::MAX as f64);
    }
}
