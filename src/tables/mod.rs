//! Table builders for the star schema: four dimensions and one fact table.

pub mod artists;
pub mod models;
pub mod songplays;
pub mod songs;
pub mod text;
pub mod time;
pub mod users;
pub mod validation;

pub use models::{Artist, PartitionKey, Song, Songplay, TimeRow, User};
