//! Opens the shop ledger, applies migrations, and checks the result.
//!
//! Missing indexes and meta rows are recreated in place. Anything else that
//! does not match the expected layout is reported as `ledger_corrupt`, never
//! rewritten.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};

use crate::migrations::{LATEST_USER_VERSION, LEDGER_META, ledger_indexes, run_pending};
use crate::state::{LedgerHome, map_sqlite_error, open_connection};
use crate::{ClientError, ClientResult};

/// Tables every ledger must have, with the columns commands read or write.
const LEDGER_TABLES: [(&str, &[&str]); 3] = [
    ("internal_meta", &["key", "value"]),
    (
        "users",
        &[
            "mobile",
            "name",
            "store_name",
            "store_address",
            "store_gst",
            "store_contact",
        ],
    ),
    (
        "entries",
        &[
            "id", "mobile", "product", "units", "revenue", "credit", "creditor", "date",
        ],
    ),
];

#[derive(Debug, Clone)]
pub struct SetupContext {
    pub db_path: String,
    pub schema_version: String,
}

impl SetupContext {
    pub fn db_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.db_path)
    }
}

pub fn ensure_initialized() -> ClientResult<SetupContext> {
    initialize(None)
}

pub fn ensure_initialized_at(home_override: &Path) -> ClientResult<SetupContext> {
    initialize(Some(home_override))
}

pub(crate) fn load_setup(home_override: Option<&Path>) -> ClientResult<SetupContext> {
    initialize(home_override)
}

fn initialize(home_override: Option<&Path>) -> ClientResult<SetupContext> {
    let home = LedgerHome::resolve(home_override)?;
    home.prepare()?;

    let db_path = home.db_path();
    let mut connection = open_connection(&db_path)?;
    run_pending(&mut connection).map_err(|error| migration_error(&db_path, &error))?;

    let ledger = LedgerCheck {
        connection: &connection,
        db_path: &db_path,
    };
    ledger.require_tables()?;
    ledger.repair_indexes_and_meta()?;
    ledger.require_current_version()?;

    let schema_version = ledger
        .meta_value("schema_version")?
        .unwrap_or_else(|| "v1".to_string());
    tracing::debug!(db_path = %db_path.display(), %schema_version, "ledger ready");

    Ok(SetupContext {
        db_path: db_path.display().to_string(),
        schema_version,
    })
}

/// Lock, corruption and permission failures keep their own codes; every
/// other migration failure is `migration_failed`.
fn migration_error(db_path: &Path, error: &rusqlite_migration::Error) -> ClientError {
    if let rusqlite_migration::Error::RusqliteError { err, .. } = error {
        let mapped = map_sqlite_error(db_path, err);
        if matches!(
            mapped.code.as_str(),
            "ledger_locked" | "ledger_corrupt" | "ledger_init_permission_denied"
        ) {
            return mapped;
        }
    }
    ClientError::migration_failed(db_path, &error.to_string())
}

struct LedgerCheck<'a> {
    connection: &'a Connection,
    db_path: &'a Path,
}

impl LedgerCheck<'_> {
    fn sqlite_error(&self, error: rusqlite::Error) -> ClientError {
        map_sqlite_error(self.db_path, &error)
    }

    fn require_tables(&self) -> ClientResult<()> {
        let tables = self.schema_names("table")?;
        for (table, required_columns) in LEDGER_TABLES {
            if !tables.contains(table) {
                tracing::warn!(table, "ledger table missing");
                return Err(ClientError::ledger_corrupt(self.db_path));
            }
            let columns = self.columns(table)?;
            if let Some(missing) = required_columns
                .iter()
                .find(|column| !columns.contains(**column))
            {
                tracing::warn!(table, column = *missing, "ledger column missing");
                return Err(ClientError::ledger_corrupt(self.db_path));
            }
        }
        Ok(())
    }

    fn repair_indexes_and_meta(&self) -> ClientResult<()> {
        // Insert-only: a drifted meta value fails the version check instead.
        for (key, value) in LEDGER_META {
            self.connection
                .execute(
                    "INSERT OR IGNORE INTO internal_meta (key, value) VALUES (?1, ?2)",
                    params![key, value],
                )
                .map_err(|error| self.sqlite_error(error))?;
        }

        let existing = self.schema_names("index")?;
        for index in ledger_indexes() {
            if existing.contains(&index.name) {
                continue;
            }
            tracing::info!(index = %index.name, "recreating missing ledger index");
            self.connection
                .execute_batch(&index.create_sql)
                .map_err(|error| self.sqlite_error(error))?;
        }
        Ok(())
    }

    fn require_current_version(&self) -> ClientResult<()> {
        let user_version = self
            .connection
            .query_row("PRAGMA user_version", [], |row| row.get::<_, i64>(0))
            .map_err(|error| self.sqlite_error(error))?;
        if user_version != LATEST_USER_VERSION {
            return Err(ClientError::ledger_corrupt(self.db_path));
        }

        for (key, expected) in LEDGER_META {
            if self.meta_value(key)?.as_deref() != Some(expected) {
                return Err(ClientError::ledger_corrupt(self.db_path));
            }
        }

        let indexes = self.schema_names("index")?;
        if ledger_indexes()
            .iter()
            .any(|index| !indexes.contains(&index.name))
        {
            return Err(ClientError::ledger_corrupt(self.db_path));
        }
        Ok(())
    }

    fn schema_names(&self, object_type: &str) -> ClientResult<HashSet<String>> {
        let mut statement = self
            .connection
            .prepare("SELECT name FROM sqlite_master WHERE type = ?1")
            .map_err(|error| self.sqlite_error(error))?;
        let names = statement
            .query_map([object_type], |row| row.get::<_, String>(0))
            .map_err(|error| self.sqlite_error(error))?
            .collect::<Result<HashSet<String>, _>>()
            .map_err(|error| self.sqlite_error(error))?;
        Ok(names)
    }

    fn columns(&self, table: &str) -> ClientResult<HashSet<String>> {
        let mut statement = self
            .connection
            .prepare("SELECT name FROM pragma_table_info(?1)")
            .map_err(|error| self.sqlite_error(error))?;
        let columns = statement
            .query_map([table], |row| row.get::<_, String>(0))
            .map_err(|error| self.sqlite_error(error))?
            .collect::<Result<HashSet<String>, _>>()
            .map_err(|error| self.sqlite_error(error))?;
        Ok(columns)
    }

    fn meta_value(&self, key: &str) -> ClientResult<Option<String>> {
        self.connection
            .query_row(
                "SELECT value FROM internal_meta WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|error| self.sqlite_error(error))
    }
}
