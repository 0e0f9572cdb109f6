use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Error as SqliteError, ffi::ErrorCode};

use crate::{ClientError, ClientResult};

/// Environment variable that relocates the ledger directory.
pub const HOME_ENV: &str = "KHATA_HOME";

const LEDGER_DIR_NAME: &str = ".khata";
const LEDGER_FILE_NAME: &str = "ledger.db";
const BUSY_TIMEOUT: Duration = Duration::from_millis(250);

/// Directory that holds the shop ledger database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerHome {
    root: PathBuf,
}

impl LedgerHome {
    /// Picks the explicit override, then `KHATA_HOME`, then `~/.khata`.
    pub fn resolve(home_override: Option<&Path>) -> ClientResult<Self> {
        let root = match home_override {
            Some(path) => path.to_path_buf(),
            None => default_root()?,
        };
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&root))
                .map_err(|error| ClientError::ledger_init_failed(&root, &error.to_string()))?
        };

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn db_path(&self) -> PathBuf {
        self.root.join(LEDGER_FILE_NAME)
    }

    /// Creates the directory when missing and restricts it to the owner.
    pub fn prepare(&self) -> ClientResult<()> {
        fs::create_dir_all(&self.root).map_err(|error| map_io_error(&self.root, &error))?;
        restrict_to_owner(&self.root);
        Ok(())
    }
}

fn default_root() -> ClientResult<PathBuf> {
    if let Some(value) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(value));
    }
    home::home_dir()
        .map(|home| home.join(LEDGER_DIR_NAME))
        .ok_or_else(|| {
            ClientError::ledger_init_failed(
                Path::new("."),
                "Could not find a home directory to place the shop ledger in.",
            )
        })
}

pub fn open_connection(db_path: &Path) -> ClientResult<Connection> {
    let connection =
        Connection::open(db_path).map_err(|error| map_sqlite_error(db_path, &error))?;
    connection
        .busy_timeout(BUSY_TIMEOUT)
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    Ok(connection)
}

pub fn map_io_error(path: &Path, error: &std::io::Error) -> ClientError {
    match error.kind() {
        ErrorKind::PermissionDenied => {
            ClientError::ledger_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::ledger_init_failed(path, &error.to_string()),
    }
}

/// Maps SQLite failures onto the ledger error codes a caller can act on.
pub fn map_sqlite_error(path: &Path, error: &SqliteError) -> ClientError {
    match error.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
            ClientError::ledger_locked(path)
        }
        Some(ErrorCode::NotADatabase) => ClientError::ledger_corrupt(path),
        Some(ErrorCode::CannotOpen | ErrorCode::ReadOnly) => {
            ClientError::ledger_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::ledger_init_failed(path, &error.to_string()),
    }
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    // Best effort; a shared directory still works.
    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o700));
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) {}
