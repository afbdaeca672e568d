//! Row types of the five output tables.
//!
//! Field order matches the stored column order. Tables deduplicated on the
//! full row derive `Hash`/`Eq` so the builders can use them as set keys.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Partition key of one row: ordered (column, value) pairs.
pub type PartitionKey = Vec<(&'static str, String)>;

/// Catalog-side dimension, one row per song. Partitioned by (year, artist_id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Song {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i16,
    pub duration: Decimal,
}

impl Song {
    pub fn partition_key(&self) -> PartitionKey {
        vec![
            ("year", self.year.to_string()),
            ("artist_id", self.artist_id.clone()),
        ]
    }
}

/// Catalog-side dimension, one row per artist. Unpartitioned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Artist {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

/// Log-side dimension, one row per user id. Unpartitioned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub level: Option<String>,
}

/// Log-side dimension, one row per distinct play timestamp. Partitioned by
/// (year, month). `weekday` is numbered 1–7 with Sunday as 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRow {
    pub start_time: NaiveDateTime,
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub weekday: u32,
}

impl TimeRow {
    pub fn partition_key(&self) -> PartitionKey {
        vec![
            ("year", self.year.to_string()),
            ("month", self.month.to_string()),
        ]
    }
}

/// The fact table, one row per valid deduplicated song play. Partitioned by
/// (year, month). `songplay_id` is a run-local surrogate and takes no part
/// in content comparisons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Songplay {
    pub songplay_id: i64,
    pub start_time: NaiveDateTime,
    pub year: i32,
    pub month: u32,
    pub user_id: i32,
    pub level: Option<String>,
    pub song_id: String,
    pub artist_id: String,
    pub session_id: Option<i32>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl Songplay {
    pub fn partition_key(&self) -> PartitionKey {
        vec![
            ("year", self.year.to_string()),
            ("month", self.month.to_string()),
        ]
    }
}
