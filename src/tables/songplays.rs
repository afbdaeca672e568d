//! Builds the songplay fact table.
//!
//! Log events are matched to catalog rows on the exact (artist, song) text
//! pair; an event with no catalog counterpart is excluded. The surrogate
//! songplay_id is assigned before the joins, so surviving ids are monotone
//! but gappy. Content dedup ignores the surrogate.

use super::models::{Songplay, TimeRow};
use super::text::{cast_user_id, truncate_opt, MAX_TEXT_LEN};
use super::time;
use super::validation::{require, require_value, RowDrop};
use crate::context::EtlContext;
use crate::schema::{RawCatalogRecord, RawLogEvent};
use chrono::NaiveDateTime;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Catalog side of the (artist, song) join.
struct CatalogMatch {
    song_id: String,
    artist_id: String,
}

fn catalog_index(catalog: &[RawCatalogRecord]) -> HashMap<(&str, &str), Vec<CatalogMatch>> {
    let mut index: HashMap<(&str, &str), Vec<CatalogMatch>> = HashMap::new();
    for rec in catalog {
        // null join keys never match
        let (Some(artist), Some(song)) = (rec.artist_name.as_deref(), rec.title.as_deref()) else {
            continue;
        };
        let (Some(song_id), Some(artist_id)) = (rec.song_id.clone(), rec.artist_id.clone()) else {
            continue;
        };
        index
            .entry((artist, song))
            .or_default()
            .push(CatalogMatch { song_id, artist_id });
    }
    index
}

fn clean_row(
    songplay_id: i64,
    event: &RawLogEvent,
    matched: &CatalogMatch,
) -> Result<SongplayContent, RowDrop> {
    let user_id_raw = require("user_id", event.user_id.as_deref())?;
    require("song_id", Some(matched.song_id.as_str()))?;
    require("artist_id", Some(matched.artist_id.as_str()))?;
    let ts = require_value("ts", event.ts)?;
    let start_time = time::time_row(ts)
        .ok_or(RowDrop::TimestampOutOfRange(ts))?
        .start_time;
    let user_id = cast_user_id(user_id_raw).ok_or_else(|| RowDrop::NotAnInteger {
        field: "user_id",
        value: user_id_raw.to_string(),
    })?;
    Ok(SongplayContent {
        songplay_id,
        start_time,
        user_id,
        level: event.level.clone(),
        song_id: matched.song_id.clone(),
        artist_id: matched.artist_id.clone(),
        session_id: event.session_id,
        location: truncate_opt(event.location.as_deref(), MAX_TEXT_LEN),
        user_agent: truncate_opt(event.user_agent.as_deref(), MAX_TEXT_LEN),
    })
}

/// A fact row before the time-dimension join attaches year and month.
struct SongplayContent {
    songplay_id: i64,
    start_time: NaiveDateTime,
    user_id: i32,
    level: Option<String>,
    song_id: String,
    artist_id: String,
    session_id: Option<i32>,
    location: Option<String>,
    user_agent: Option<String>,
}

type ContentKey = (
    NaiveDateTime,
    i32,
    Option<String>,
    String,
    String,
    Option<i32>,
    Option<String>,
    Option<String>,
);

impl SongplayContent {
    /// Dedup key: every column except the run-local surrogate.
    fn content_key(&self) -> ContentKey {
        (
            self.start_time,
            self.user_id,
            self.level.clone(),
            self.song_id.clone(),
            self.artist_id.clone(),
            self.session_id,
            self.location.clone(),
            self.user_agent.clone(),
        )
    }
}

/// Join log events against the catalog and the finished time dimension to
/// produce the fact table.
pub fn build(
    ctx: &EtlContext,
    catalog: &[RawCatalogRecord],
    events: &[RawLogEvent],
    time_table: &[TimeRow],
) -> Vec<Songplay> {
    let index = catalog_index(catalog);

    // surrogate ids are assigned before the join, per-event
    let cleaned: Vec<SongplayContent> = ctx.install(|| {
        events
            .par_iter()
            .enumerate()
            .flat_map_iter(|(ordinal, event)| {
                let matches = match (event.artist.as_deref(), event.song.as_deref()) {
                    (Some(artist), Some(song)) => {
                        index.get(&(artist, song)).map(Vec::as_slice).unwrap_or(&[])
                    }
                    _ => &[],
                };
                matches
                    .iter()
                    .filter_map(move |m| clean_row(ordinal as i64, event, m).ok())
            })
            .collect()
    });

    let mut seen = HashSet::new();
    let deduped = cleaned
        .into_iter()
        .filter(|row| seen.insert(row.content_key()));

    // attach year and month from the time dimension; misses are dropped
    let by_start_time: HashMap<NaiveDateTime, (i32, u32)> = time_table
        .iter()
        .map(|t| (t.start_time, (t.year, t.month)))
        .collect();
    deduped
        .filter_map(|row| {
            let (year, month) = *by_start_time.get(&row.start_time)?;
            Some(Songplay {
                songplay_id: row.songplay_id,
                start_time: row.start_time,
                year,
                month,
                user_id: row.user_id,
                level: row.level,
                song_id: row.song_id,
                artist_id: row.artist_id,
                session_id: row.session_id,
                location: row.location,
                user_agent: row.user_agent,
            })
        })
        .collect()
}
