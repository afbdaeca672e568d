//! Schema enforcement for batches of raw NDJSON lines.
//!
//! The declared record type is the schema: a line that deserializes is
//! conforming, a line that does not (malformed JSON, type-mismatched field)
//! is counted and dropped. A bad record is never fatal to the run.

use crate::context::EtlContext;
use crate::stats::ParseCounts;
use rayon::prelude::*;
use serde::de::DeserializeOwned;

/// Result of validating one batch: the conforming records plus the sizes of
/// both partitions.
pub struct Validated<T> {
    pub records: Vec<T>,
    pub counts: ParseCounts,
}

/// Partition `lines` into records conforming to `T`'s schema and a malformed
/// remainder. Both partition sizes are reported to the context's stats sink
/// under `stage`.
pub fn validate_batch<T>(ctx: &EtlContext, stage: &str, lines: Vec<String>) -> Validated<T>
where
    T: DeserializeOwned + Send,
{
    let total = lines.len();
    let records: Vec<T> = ctx.install(|| {
        lines
            .par_iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    });
    let counts = ParseCounts {
        total,
        malformed: total - records.len(),
        valid: records.len(),
    };
    ctx.reporter().parsed(stage, counts);
    Validated { records, counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::records::RawLogEvent;
    use crate::stats::{ParseCounts, RecordingReporter, ReportedEvent};
    use std::sync::Arc;

    fn test_ctx() -> (EtlContext, Arc<RecordingReporter>) {
        let reporter = Arc::new(RecordingReporter::default());
        let ctx = EtlContext::new(2, reporter.clone()).unwrap();
        (ctx, reporter)
    }

    #[test]
    fn partitions_valid_and_malformed() {
        let (ctx, reporter) = test_ctx();
        let lines = vec![
            r#"{"page": "NextSong", "ts": 1542000000000}"#.to_string(),
            "not json at all".to_string(),
            r#"{"ts": "wrong type"}"#.to_string(),
            r#"{}"#.to_string(),
        ];
        let out = validate_batch::<RawLogEvent>(&ctx, "log", lines);
        assert_eq!(out.records.len(), 2);
        assert_eq!(
            out.counts,
            ParseCounts {
                total: 4,
                malformed: 2,
                valid: 2
            }
        );
        assert_eq!(
            reporter.events(),
            vec![ReportedEvent::Parsed {
                stage: "log".to_string(),
                counts: out.counts
            }]
        );
    }

    #[test]
    fn empty_batch_is_fine() {
        let (ctx, _) = test_ctx();
        let out = validate_batch::<RawLogEvent>(&ctx, "log", vec![]);
        assert!(out.records.is_empty());
        assert_eq!(out.counts.total, 0);
    }
}
