//! Builds the User dimension from log events.
//!
//! Deduplication is on user_id alone: the same user can appear with two
//! `level` values (a free→paid upgrade mid-session) and exactly one row
//! survives. Which one is implementation-defined; ordering across a
//! parallel scan is not guaranteed.

use super::models::User;
use super::text::{cast_user_id, truncate, MAX_ID_LEN};
use super::validation::{require, RowDrop};
use crate::context::EtlContext;
use crate::schema::RawLogEvent;
use rayon::prelude::*;
use std::collections::HashSet;

fn clean_row(event: &RawLogEvent) -> Result<User, RowDrop> {
    let user_id = require("user_id", event.user_id.as_deref())?;
    let first_name = require("first_name", event.first_name.as_deref())?;
    let last_name = require("last_name", event.last_name.as_deref())?;
    // cast after truncation, as stored
    let user_id_str = truncate(user_id, MAX_ID_LEN);
    let user_id = cast_user_id(&user_id_str).ok_or_else(|| RowDrop::NotAnInteger {
        field: "user_id",
        value: user_id_str,
    })?;
    Ok(User {
        user_id,
        first_name: truncate(first_name, MAX_ID_LEN),
        last_name: truncate(last_name, MAX_ID_LEN),
        gender: event.gender.clone(),
        level: event.level.clone(),
    })
}

/// Project, clean and deduplicate log events into User rows, one per
/// numeric user_id.
pub fn build(ctx: &EtlContext, events: &[RawLogEvent]) -> Vec<User> {
    let cleaned: Vec<User> =
        ctx.install(|| events.par_iter().filter_map(|event| clean_row(event).ok()).collect());
    let mut seen = HashSet::new();
    cleaned
        .into_iter()
        .filter(|user| seen.insert(user.user_id))
        .collect()
}
