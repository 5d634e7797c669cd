//! Compile metrics via a pluggable sink.
//!
//! The library does not depend on any metrics backend. Implement
//! [`MetricsSink`] and install it once with [`set_sink`] to receive a
//! [`CompileStats`] record after every `PolicyEngine::compile` call.
//!
//! ```rust
//! use policy_composer_core::metrics::{CompileStats, MetricsSink};
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! struct StatementCounter {
//!     statements: AtomicU64,
//! }
//!
//! impl MetricsSink for StatementCounter {
//!     fn on_compile(&self, stats: &CompileStats) {
//!         self.statements
//!             .fetch_add(stats.statements as u64, Ordering::Relaxed);
//!     }
//! }
//! ```
//!
//! Without a sink, records go to a no-op sink.

use serde::Serialize;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::warn;

/// Summary of one compile run.
#[derive(Debug, Clone, Serialize)]
pub struct CompileStats {
    /// Wall-clock time of the whole compile.
    pub duration: Duration,
    /// Selections that had at least one action.
    pub selections: usize,
    /// Statements in the emitted document.
    pub statements: usize,
    /// Actions across all emitted statements.
    pub actions: usize,
}

/// Compile time broken down by phase, in milliseconds.
#[derive(Debug, Clone, Serialize)]
pub struct CompilePhases {
    /// Dependency resolution for every selection
    pub resolve_ms: f64,
    /// Grouping by (ARN, action set)
    pub group_ms: f64,
    /// Merging groups that share an ARN
    pub merge_ms: f64,
    pub total_ms: f64,
}

impl CompilePhases {
    /// Time not attributed to any measured phase.
    pub fn overhead_ms(&self) -> f64 {
        self.total_ms - (self.resolve_ms + self.group_ms + self.merge_ms)
    }
}

pub trait MetricsSink: Send + Sync {
    /// Called after every compile.
    fn on_compile(&self, stats: &CompileStats);

    /// Called after every compile with per-phase timings. Ignored by default.
    fn on_compile_phases(&self, _stats: &CompileStats, _phases: &CompilePhases) {}
}

struct NoOpSink;

impl MetricsSink for NoOpSink {
    fn on_compile(&self, _stats: &CompileStats) {}
}

static SINK: OnceLock<Arc<dyn MetricsSink>> = OnceLock::new();

fn sink() -> Arc<dyn MetricsSink> {
    SINK.get_or_init(|| Arc::new(NoOpSink)).clone()
}

/// Install the global metrics sink.
///
/// Only the first call takes effect, and only if no compile has run yet.
pub fn set_sink(sink: Arc<dyn MetricsSink>) {
    if SINK.set(sink).is_err() {
        warn!(
            "Metrics sink was already initialized. Ignoring subsequent set_sink call. Set the sink before the first compile."
        );
    }
}

pub(crate) fn record_compile(stats: CompileStats, phases: CompilePhases) {
    let sink = sink();
    sink.on_compile(&stats);
    sink.on_compile_phases(&stats, &phases);
}
