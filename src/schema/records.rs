//! Raw record types for the two input feeds.
//!
//! Every field is optional: the feeds are semi-structured and a record with
//! missing fields is still schema-conforming. A record whose present fields
//! cannot be coerced to the declared types (e.g. a string where `ts` should
//! be a number) fails deserialization and is routed to the malformed side
//! channel by the validator.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One record of the music-catalog feed, one per song.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawCatalogRecord {
    pub song_id: Option<String>,
    pub title: Option<String>,
    pub artist_id: Option<String>,
    pub year: Option<i16>,
    pub duration: Option<Decimal>,
    pub artist_name: Option<String>,
    pub artist_location: Option<String>,
    pub artist_latitude: Option<Decimal>,
    pub artist_longitude: Option<Decimal>,
}

/// One record of the application event log. Wire field names are camelCase.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawLogEvent {
    pub artist: Option<String>,
    pub first_name: Option<String>,
    pub gender: Option<String>,
    pub last_name: Option<String>,
    pub level: Option<String>,
    pub location: Option<String>,
    pub page: Option<String>,
    pub session_id: Option<i32>,
    pub song: Option<String>,
    pub ts: Option<i64>,
    pub user_agent: Option<String>,
    pub user_id: Option<String>,
}

/// The page value marking a log event as a song play.
pub const PAGE_NEXT_SONG: &str = "NextSong";

impl RawLogEvent {
    pub fn is_song_play(&self) -> bool {
        self.page.as_deref() == Some(PAGE_NEXT_SONG)
    }
}
