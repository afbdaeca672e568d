//! Per-stage count reporting.
//!
//! Stage counts are pushed through an injected sink instead of ambient
//! logging state, so the orchestrator decides where they go and tests can
//! record them.

use std::sync::Mutex;

/// Counts emitted when a batch of raw lines has been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseCounts {
    pub total: usize,
    pub malformed: usize,
    pub valid: usize,
}

/// Sink for per-stage counts: raw parse partitions and final table sizes.
pub trait StageReporter: Send + Sync {
    fn parsed(&self, stage: &str, counts: ParseCounts);
    fn table_written(&self, table: &str, rows: usize);
}

/// Default reporter, logs counts via `tracing`.
pub struct TracingReporter;

impl StageReporter for TracingReporter {
    fn parsed(&self, stage: &str, counts: ParseCounts) {
        tracing::info!(
            "{}: {} raw records parsed, {} malformed, {} valid",
            stage,
            counts.total,
            counts.malformed,
            counts.valid
        );
    }

    fn table_written(&self, table: &str, rows: usize) {
        tracing::info!("{}: {} rows written", table, rows);
    }
}

/// Reporter that records every event in memory, for assertions in tests.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ReportedEvent>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportedEvent {
    Parsed { stage: String, counts: ParseCounts },
    TableWritten { table: String, rows: usize },
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<ReportedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl StageReporter for RecordingReporter {
    fn parsed(&self, stage: &str, counts: ParseCounts) {
        self.events.lock().unwrap().push(ReportedEvent::Parsed {
            stage: stage.to_string(),
            counts,
        });
    }

    fn table_written(&self, table: &str, rows: usize) {
        self.events
            .lock()
            .unwrap()
            .push(ReportedEvent::TableWritten {
                table: table.to_string(),
                rows,
            });
    }
}
