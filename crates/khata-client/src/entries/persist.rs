use std::path::Path;

use rusqlite::{Connection, TransactionBehavior, params};

use crate::ClientResult;
use crate::entries::NewEntry;
use crate::state::map_sqlite_error;

/// Writes a batch in one transaction, creating a placeholder user
/// (`User <mobile>`) when the mobile is not registered yet.
pub(crate) fn insert_entries(
    connection: &mut Connection,
    db_path: &Path,
    mobile: &str,
    entries: &[NewEntry],
) -> ClientResult<i64> {
    let transaction = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    ensure_user(&transaction, db_path, mobile)?;

    let mut inserted = 0_i64;
    for entry in entries {
        transaction
            .execute(
                "INSERT INTO entries (mobile, product, units, revenue, credit, creditor, date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    mobile,
                    &entry.product,
                    entry.units,
                    entry.revenue,
                    entry.credit,
                    &entry.creditor,
                    &entry.date
                ],
            )
            .map_err(|error| map_sqlite_error(db_path, &error))?;
        inserted += 1;
    }

    transaction
        .commit()
        .map_err(|error| map_sqlite_error(db_path, &error))?;

    tracing::info!(mobile, inserted, "ledger entries written");
    Ok(inserted)
}

pub(crate) fn ensure_user(connection: &Connection, db_path: &Path, mobile: &str) -> ClientResult<()> {
    connection
        .execute(
            "INSERT OR IGNORE INTO users (mobile, name) VALUES (?1, ?2)",
            params![mobile, format!("User {mobile}")],
        )
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    Ok(())
}

pub(crate) fn delete_entries(connection: &Connection, db_path: &Path, mobile: &str) -> ClientResult<i64> {
    let deleted = connection
        .execute("DELETE FROM entries WHERE mobile = ?1", params![mobile])
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    tracing::info!(mobile, deleted, "ledger entries cleared");
    Ok(deleted as i64)
}
