use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::setup::load_setup;
use crate::state::open_connection;
use crate::{ClientError, ClientResult};

pub(crate) struct OpenLedger {
    pub(crate) db_path: PathBuf,
    pub(crate) connection: Connection,
}

pub(crate) fn open_ledger(home_override: Option<&Path>) -> ClientResult<OpenLedger> {
    let setup = load_setup(home_override)?;
    let db_path = setup.db_path_buf();
    let connection = open_connection(&db_path)?;
    Ok(OpenLedger {
        db_path,
        connection,
    })
}

pub(crate) fn require_mobile(mobile: &str, command: &str) -> ClientResult<String> {
    let trimmed = mobile.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "A mobile number is required.",
            Some(command),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::require_mobile;

    #[test]
    fn mobile_is_trimmed_and_required() {
        assert_eq!(
            require_mobile(" 9876543210 ", "user show").ok().as_deref(),
            Some("9876543210")
        );
        let blank = require_mobile("  ", "user show");
        assert_eq!(
            blank.err().map(|error| error.code),
            Some("invalid_argument".to_string())
        );
    }
}
