//! Ledger entry intake: payload decoding, zero-revenue filtering, storage.

pub(crate) mod parse;
pub(crate) mod persist;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::contracts::types::{EntriesAddSummary, LedgerEntryCandidate};
use crate::message::coerce::{normalize_record, to_text_or_none};
use crate::{ClientError, ClientResult};

/// An entry ready for insertion, with revenue truncated to whole units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewEntry {
    pub(crate) product: Option<String>,
    pub(crate) units: i64,
    pub(crate) revenue: i64,
    pub(crate) credit: bool,
    pub(crate) creditor: Option<String>,
    pub(crate) date: String,
}

#[derive(Debug, Clone)]
pub(crate) struct PreparedBatch {
    pub(crate) entries: Vec<NewEntry>,
    pub(crate) summary: EntriesAddSummary,
}

pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalizes loose records and drops the ones whose revenue truncates to 0.
pub(crate) fn prepare_records(records: &[Value], timestamp: &str) -> ClientResult<PreparedBatch> {
    let entries = records
        .iter()
        .filter_map(|record| {
            let date = to_text_or_none(record.get("date"));
            to_new_entry(&normalize_record(record), date, timestamp)
        })
        .collect::<Vec<NewEntry>>();
    finish_batch(records.len(), entries)
}

pub(crate) fn prepare_candidates(
    candidates: &[LedgerEntryCandidate],
    timestamp: &str,
) -> ClientResult<PreparedBatch> {
    let entries = candidates
        .iter()
        .filter_map(|candidate| to_new_entry(candidate, None, timestamp))
        .collect::<Vec<NewEntry>>();
    finish_batch(candidates.len(), entries)
}

fn finish_batch(rows_read: usize, entries: Vec<NewEntry>) -> ClientResult<PreparedBatch> {
    if entries.is_empty() {
        return Err(ClientError::no_valid_entries(rows_read));
    }

    let inserted = entries.len() as i64;
    let rows_read = rows_read as i64;
    Ok(PreparedBatch {
        entries,
        summary: EntriesAddSummary {
            rows_read,
            inserted,
            skipped_zero_revenue: rows_read - inserted,
        },
    })
}

fn to_new_entry(
    candidate: &LedgerEntryCandidate,
    date: Option<String>,
    timestamp: &str,
) -> Option<NewEntry> {
    // Saturating cast; fractions truncate toward zero.
    let revenue = candidate.revenue.trunc() as i64;
    if revenue == 0 {
        return None;
    }

    Some(NewEntry {
        product: candidate.product.clone(),
        units: i64::try_from(candidate.units).unwrap_or(i64::MAX),
        revenue,
        credit: candidate.credit,
        creditor: candidate.creditor.clone(),
        date: date.unwrap_or_else(|| timestamp.to_string()),
    })
}
