// src/engine/dedup.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{
    models::response::RawResponseRow,
    utils::{text::clean_respondent_id, timestamp::parse_timestamp},
};

use super::identity::IdentityColumns;

/// Cleaned IDs shorter than this are header repeats, key rows or noise.
pub const MIN_ID_LEN: usize = 5;

/// A row that survived deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct RetainedRow<'a> {
    /// Digits-only respondent ID.
    pub id: String,
    pub submitted_at: DateTime<Utc>,
    pub row: &'a RawResponseRow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupStats {
    pub rows_processed: usize,
    pub invalid_rows: usize,
    pub duplicates_discarded: usize,
    pub malformed_timestamps: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupOutcome<'a> {
    /// One row per ID, in order of each ID's first appearance.
    pub rows: Vec<RetainedRow<'a>>,
    pub stats: DedupStats,
}

/// Keeps the most recent submission per respondent.
///
/// A later row replaces the stored one only when its timestamp is strictly
/// greater; ties keep the first-seen row. Missing or unreadable timestamps
/// count as the Unix epoch.
pub fn deduplicate<'a>(rows: &'a [RawResponseRow], identity: &IdentityColumns) -> DedupOutcome<'a> {
    let mut stats = DedupStats::default();
    let mut retained: Vec<RetainedRow<'a>> = Vec::new();
    let mut slot_of: HashMap<String, usize> = HashMap::new();

    for row in rows {
        stats.rows_processed += 1;

        let id = clean_respondent_id(row.get(&identity.id));
        if id.len() < MIN_ID_LEN {
            stats.invalid_rows += 1;
            continue;
        }

        let submitted_at = match identity.timestamp.as_deref().map(|h| row.get(h).trim()) {
            Some(raw) if !raw.is_empty() => parse_timestamp(raw).unwrap_or_else(|| {
                stats.malformed_timestamps += 1;
                tracing::debug!(id = %id, raw, "Unreadable timestamp, treating as epoch");
                DateTime::<Utc>::UNIX_EPOCH
            }),
            _ => DateTime::<Utc>::UNIX_EPOCH,
        };

        match slot_of.get(&id) {
            Some(&slot) => {
                stats.duplicates_discarded += 1;
                let stored = &mut retained[slot];
                if submitted_at > stored.submitted_at {
                    tracing::debug!(id = %id, "Newer submission replaces earlier one");
                    stored.submitted_at = submitted_at;
                    stored.row = row;
                }
            }
            None => {
                slot_of.insert(id.clone(), retained.len());
                retained.push(RetainedRow {
                    id,
                    submitted_at,
                    row,
                });
            }
        }
    }

    DedupOutcome {
        rows: retained,
        stats,
    }
}
