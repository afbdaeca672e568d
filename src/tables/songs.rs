//! Builds the Song dimension from catalog records.

use super::models::Song;
use super::text::{truncate, MAX_ID_LEN, MAX_TEXT_LEN};
use super::validation::{require, require_value, RowDrop};
use crate::context::EtlContext;
use crate::schema::RawCatalogRecord;
use rayon::prelude::*;
use std::collections::HashSet;

fn clean_row(rec: &RawCatalogRecord) -> Result<Song, RowDrop> {
    let song_id = require("song_id", rec.song_id.as_deref())?;
    let title = require("title", rec.title.as_deref())?;
    let artist_id = require("artist_id", rec.artist_id.as_deref())?;
    let year = require_value("year", rec.year)?;
    let duration = require_value("duration", rec.duration)?;
    Ok(Song {
        song_id: truncate(song_id, MAX_ID_LEN),
        title: truncate(title, MAX_TEXT_LEN),
        artist_id: truncate(artist_id, MAX_ID_LEN),
        year,
        duration: duration.round_dp(5),
    })
}

/// Project, clean, truncate and deduplicate catalog records into Song rows.
/// Duplicates are removed on the full row, keeping the first occurrence.
pub fn build(ctx: &EtlContext, catalog: &[RawCatalogRecord]) -> Vec<Song> {
    let cleaned: Vec<Song> =
        ctx.install(|| catalog.par_iter().filter_map(|rec| clean_row(rec).ok()).collect());
    let mut seen = HashSet::new();
    cleaned
        .into_iter()
        .filter(|song| seen.insert(song.clone()))
        .collect()
}
