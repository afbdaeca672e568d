//! Builds the time dimension from log event timestamps.
//!
//! Epoch-millisecond timestamps are converted in the local timezone, the
//! same convention the downstream fact table uses for its start_time.
//! Weekday numbering is 1–7 with Sunday as 1.

use super::models::TimeRow;
use crate::context::EtlContext;
use crate::schema::RawLogEvent;
use chrono::{Datelike, Local, TimeZone, Timelike};
use rayon::prelude::*;
use std::collections::HashSet;

/// Convert an epoch-millisecond timestamp to a local start_time and derive
/// the calendar fields. Returns `None` for values outside the representable
/// range.
pub fn time_row(ts_millis: i64) -> Option<TimeRow> {
    let start_time = Local
        .timestamp_millis_opt(ts_millis)
        .earliest()?
        .naive_local();
    Some(TimeRow {
        start_time,
        hour: start_time.hour(),
        day: start_time.ordinal(),
        week: start_time.iso_week().week(),
        month: start_time.month(),
        year: start_time.year(),
        weekday: start_time.weekday().number_from_sunday(),
    })
}

/// Deduplicate raw timestamps and derive one TimeRow per distinct local
/// start_time.
pub fn build(ctx: &EtlContext, events: &[RawLogEvent]) -> Vec<TimeRow> {
    let mut seen_ts = HashSet::new();
    let distinct: Vec<i64> = events
        .iter()
        .filter_map(|event| event.ts)
        .filter(|ts| seen_ts.insert(*ts))
        .collect();
    let converted: Vec<TimeRow> =
        ctx.install(|| distinct.par_iter().filter_map(|ts| time_row(*ts)).collect());
    // two distinct instants inside a DST fall-back fold share a wall-clock
    // start_time; the table is unique by start_time, keep the first
    let mut seen = HashSet::new();
    converted
        .into_iter()
        .filter(|row| seen.insert(row.start_time))
        .collect()
}
