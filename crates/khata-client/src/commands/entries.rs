use std::path::Path;

use rusqlite::{Connection, params};

use crate::commands::common::{open_ledger, require_mobile};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    EntriesAddData, EntriesClearData, EntriesListData, EntriesSummary, EntryRow,
};
use crate::entries::{self, persist};
use crate::input::resolve_source;
use crate::state::map_sqlite_error;
use crate::ClientResult;

#[derive(Debug, Default)]
pub struct EntriesListOptions<'a> {
    pub mobile: String,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct EntriesAddOptions<'a> {
    pub mobile: String,
    pub path: Option<String>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

#[derive(Debug, Default)]
pub struct EntriesClearOptions<'a> {
    pub mobile: String,
    pub home_override: Option<&'a Path>,
}

pub fn list(mobile: String) -> ClientResult<SuccessEnvelope> {
    list_with_options(EntriesListOptions {
        mobile,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn list_with_options(options: EntriesListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mobile = require_mobile(&options.mobile, "entry list")?;
    let ledger = open_ledger(options.home_override)?;
    let data = query_entries_data(&ledger.connection, &ledger.db_path, &mobile)?;
    success("entry list", data)
}

pub fn add(mobile: String, path: Option<String>) -> ClientResult<SuccessEnvelope> {
    add_with_options(EntriesAddOptions {
        mobile,
        path,
        home_override: None,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn add_with_options(options: EntriesAddOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mobile = require_mobile(&options.mobile, "entry add")?;
    let source = resolve_source(options.path.as_deref(), options.stdin_override, "entry add")?;
    let records = entries::parse::parse_source(&source.content)?;
    let batch = entries::prepare_records(&records, &entries::now_timestamp())?;

    let mut ledger = open_ledger(options.home_override)?;
    persist::insert_entries(&mut ledger.connection, &ledger.db_path, &mobile, &batch.entries)?;

    success(
        "entry add",
        EntriesAddData {
            mobile,
            source_used: source.source_kind.as_str().to_string(),
            summary: batch.summary,
        },
    )
}

pub fn clear(mobile: String) -> ClientResult<SuccessEnvelope> {
    clear_with_options(EntriesClearOptions {
        mobile,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn clear_with_options(options: EntriesClearOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mobile = require_mobile(&options.mobile, "entry clear")?;
    let ledger = open_ledger(options.home_override)?;
    let deleted = persist::delete_entries(&ledger.connection, &ledger.db_path, &mobile)?;
    success("entry clear", EntriesClearData { mobile, deleted })
}

pub(crate) fn query_entries_data(
    connection: &Connection,
    db_path: &Path,
    mobile: &str,
) -> ClientResult<EntriesListData> {
    let summary = connection
        .query_row(
            "SELECT
                COUNT(*) AS entry_count,
                COALESCE(SUM(CASE WHEN revenue > 0 THEN revenue ELSE 0 END), 0) AS inflow_total,
                COALESCE(SUM(CASE WHEN revenue < 0 THEN revenue ELSE 0 END), 0) AS outflow_total,
                COALESCE(SUM(revenue), 0) AS net_total,
                MAX(date) AS latest_date
             FROM entries
             WHERE mobile = ?1",
            params![mobile],
            |row| {
                Ok(EntriesSummary {
                    entry_count: row.get(0)?,
                    inflow_total: row.get(1)?,
                    outflow_total: row.get(2)?,
                    net_total: row.get(3)?,
                    latest_date: row.get(4)?,
                })
            },
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut statement = connection
        .prepare(
            "SELECT id, product, units, revenue, credit, creditor, date
             FROM entries
             WHERE mobile = ?1
             ORDER BY date DESC, id DESC",
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let rows_iter = statement
        .query_map(params![mobile], |row| {
            Ok(EntryRow {
                id: row.get(0)?,
                product: row.get(1)?,
                units: row.get(2)?,
                revenue: row.get(3)?,
                credit: row.get(4)?,
                creditor: row.get(5)?,
                date: row.get(6)?,
            })
        })
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    let mut rows = Vec::new();
    for row in rows_iter {
        rows.push(row.map_err(|error| map_sqlite_error(db_path, &error))?);
    }

    Ok(EntriesListData {
        mobile: mobile.to_string(),
        summary,
        rows,
    })
}
