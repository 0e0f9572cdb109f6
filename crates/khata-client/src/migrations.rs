use rusqlite::Connection;
use rusqlite_migration::{M, Migrations};

const BOOTSTRAP_SQL: &str = include_str!("migrations/0001_bootstrap.sql");
const USER_STORE_SETTINGS_SQL: &str = include_str!("migrations/0002_user_store_settings.sql");

/// `PRAGMA user_version` once every migration has been applied.
pub const LATEST_USER_VERSION: i64 = 2;

/// Rows `internal_meta` must hold, with the value each must have.
pub const LEDGER_META: [(&str, &str); 1] = [("schema_version", "v1")];

/// An index the bootstrap migration creates and setup may recreate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerIndex {
    pub name: String,
    pub create_sql: String,
}

pub fn run_pending(conn: &mut Connection) -> rusqlite_migration::Result<()> {
    Migrations::new(vec![M::up(BOOTSTRAP_SQL), M::up(USER_STORE_SETTINGS_SQL)]).to_latest(conn)
}

/// Idempotent index statements, read back out of the bootstrap migration so
/// repair never drifts from what a fresh ledger gets.
pub fn ledger_indexes() -> Vec<LedgerIndex> {
    BOOTSTRAP_SQL
        .split(';')
        .filter_map(|statement| {
            let statement = statement.trim();
            let rest = statement.strip_prefix("CREATE INDEX IF NOT EXISTS ")?;
            let name = rest.split_whitespace().next()?;
            Some(LedgerIndex {
                name: name.to_string(),
                create_sql: format!("{statement};"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::ledger_indexes;

    #[test]
    fn bootstrap_declares_both_entry_indexes() {
        let names = ledger_indexes()
            .into_iter()
            .map(|index| index.name)
            .collect::<Vec<String>>();
        assert_eq!(
            names,
            vec![
                "idx_entries_mobile_date".to_string(),
                "idx_entries_mobile_product_date".to_string(),
            ]
        );
    }

    #[test]
    fn index_statements_are_safe_to_rerun() {
        for index in ledger_indexes() {
            assert!(index.create_sql.starts_with("CREATE INDEX IF NOT EXISTS"));
            assert!(index.create_sql.ends_with("date);"));
        }
    }
}
