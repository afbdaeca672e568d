//! Builds the Artist dimension from catalog records.

use super::models::Artist;
use super::text::{truncate, truncate_opt, MAX_ID_LEN, MAX_TEXT_LEN};
use super::validation::{require, RowDrop};
use crate::context::EtlContext;
use crate::schema::RawCatalogRecord;
use rayon::prelude::*;
use std::collections::HashSet;

fn clean_row(rec: &RawCatalogRecord) -> Result<Artist, RowDrop> {
    let artist_id = require("artist_id", rec.artist_id.as_deref())?;
    let name = require("name", rec.artist_name.as_deref())?;
    Ok(Artist {
        artist_id: truncate(artist_id, MAX_ID_LEN),
        name: truncate(name, MAX_TEXT_LEN),
        location: truncate_opt(rec.artist_location.as_deref(), MAX_TEXT_LEN),
        latitude: rec.artist_latitude.map(|d| d.round_dp(6)),
        longitude: rec.artist_longitude.map(|d| d.round_dp(6)),
    })
}

/// Project, clean, truncate and deduplicate catalog records into Artist
/// rows. Location and coordinates stay nullable; duplicates are removed on
/// the full row.
pub fn build(ctx: &EtlContext, catalog: &[RawCatalogRecord]) -> Vec<Artist> {
    let cleaned: Vec<Artist> =
        ctx.install(|| catalog.par_iter().filter_map(|rec| clean_row(rec).ok()).collect());
    let mut seen = HashSet::new();
    cleaned
        .into_iter()
        .filter(|artist| seen.insert(artist.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn raw(artist_id: &str, name: &str) -> RawCatalogRecord {
        RawCatalogRecord {
            song_id: Some("S1".to_string()),
            title: Some("X".to_string()),
            artist_id: Some(artist_id.to_string()),
            year: Some(2000),
            duration: Some(dec("200.0")),
            artist_name: Some(name.to_string()),
            artist_location: None,
            artist_latitude: None,
            artist_longitude: None,
        }
    }

    fn ctx() -> EtlContext {
        EtlContext::with_defaults().unwrap()
    }

    #[test]
    fn nullable_fields_pass_through_as_null() {
        let artists = build(&ctx(), &[raw("A1", "Tom")]);
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].location, None);
        assert_eq!(artists[0].latitude, None);
        assert_eq!(artists[0].longitude, None);
    }

    #[test]
    fn drops_empty_id_or_name() {
        assert!(build(&ctx(), &[raw("", "Tom"), raw("A1", "")]).is_empty());
    }

    #[test]
    fn drops_missing_id_or_name() {
        let mut no_name = raw("A1", "Tom");
        no_name.artist_name = None;
        let mut no_id = raw("A1", "Tom");
        no_id.artist_id = None;
        assert!(build(&ctx(), &[no_name, no_id]).is_empty());
    }

    #[test]
    fn truncates_location_but_not_null() {
        let mut rec = raw("A1", "Tom");
        rec.artist_location = Some("L".repeat(300));
        let artists = build(&ctx(), &[rec, raw("A2", "Ann")]);
        assert_eq!(artists[0].location.as_ref().unwrap().len(), 256);
        assert_eq!(artists[1].location, None);
    }

    #[test]
    fn rounds_coordinates_to_six_places() {
        let mut rec = raw("A1", "Tom");
        rec.artist_latitude = Some(dec("35.123456789"));
        rec.artist_longitude = Some(dec("-101.9876543"));
        let artists = build(&ctx(), &[rec]);
        assert_eq!(artists[0].latitude, Some(dec("35.123457")));
        assert_eq!(artists[0].longitude, Some(dec("-101.987654")));
    }

    #[test]
    fn full_row_dedup_keeps_distinct_locations() {
        let mut a = raw("A1", "Tom");
        a.artist_location = Some("LA".to_string());
        let b = raw("A1", "Tom");
        let artists = build(&ctx(), &[a.clone(), b, a]);
        // same id but different location stays distinct; exact dup collapses
        assert_eq!(artists.len(), 2);
    }
}
