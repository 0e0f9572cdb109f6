use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use crate::commands::common::{open_ledger, require_mobile};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{RegisterData, SettingsData, StoreSettings, UserData};
use crate::entries::persist::ensure_user;
use crate::state::map_sqlite_error;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct UserOptions<'a> {
    pub mobile: String,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct RegisterOptions<'a> {
    pub mobile: String,
    pub name: String,
    pub home_override: Option<&'a Path>,
}

/// Only `Some` fields are written; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct SettingsOptions<'a> {
    pub mobile: String,
    pub updates: StoreSettings,
    pub home_override: Option<&'a Path>,
}

pub fn register(mobile: String, name: String) -> ClientResult<SuccessEnvelope> {
    register_with_options(RegisterOptions {
        mobile,
        name,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn register_with_options(options: RegisterOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mobile = require_mobile(&options.mobile, "user register")?;
    let name = options.name.trim().to_string();
    if name.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "A display name is required.",
            Some("user register"),
        ));
    }

    let ledger = open_ledger(options.home_override)?;
    ledger
        .connection
        .execute(
            "INSERT INTO users (mobile, name) VALUES (?1, ?2)
             ON CONFLICT(mobile) DO UPDATE SET name = excluded.name",
            params![&mobile, &name],
        )
        .map_err(|error| map_sqlite_error(&ledger.db_path, &error))?;
    tracing::info!(mobile = %mobile, "user registered");

    success("user register", RegisterData { mobile, name })
}

pub fn show(mobile: String) -> ClientResult<SuccessEnvelope> {
    show_with_options(UserOptions {
        mobile,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn show_with_options(options: UserOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mobile = require_mobile(&options.mobile, "user show")?;
    let ledger = open_ledger(options.home_override)?;
    let user = query_user(&ledger.connection, &ledger.db_path, &mobile)?
        .ok_or_else(|| ClientError::user_not_found(&mobile))?;
    success("user show", user)
}

pub fn settings(mobile: String, updates: StoreSettings) -> ClientResult<SuccessEnvelope> {
    settings_with_options(SettingsOptions {
        mobile,
        updates,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn settings_with_options(options: SettingsOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let mobile = require_mobile(&options.mobile, "user settings")?;
    let ledger = open_ledger(options.home_override)?;
    let updates = settings_updates(&options.updates);

    if updates.is_empty() {
        let user = query_user(&ledger.connection, &ledger.db_path, &mobile)?
            .ok_or_else(|| ClientError::user_not_found(&mobile))?;
        return success(
            "user settings",
            SettingsData {
                mobile,
                updated: Vec::new(),
                settings: user.settings,
            },
        );
    }

    ensure_user(&ledger.connection, &ledger.db_path, &mobile)?;
    for (column, value) in &updates {
        // Column names come from the fixed list in `settings_updates`.
        ledger
            .connection
            .execute(
                &format!("UPDATE users SET {column} = ?1 WHERE mobile = ?2"),
                params![value, &mobile],
            )
            .map_err(|error| map_sqlite_error(&ledger.db_path, &error))?;
    }
    let updated = updates
        .iter()
        .map(|(column, _)| column.to_string())
        .collect::<Vec<String>>();
    tracing::info!(mobile = %mobile, updated = ?updated, "store settings updated");

    let settings = query_user(&ledger.connection, &ledger.db_path, &mobile)?
        .map(|user| user.settings)
        .unwrap_or_default();

    success(
        "user settings",
        SettingsData {
            mobile,
            updated,
            settings,
        },
    )
}

pub(crate) fn query_user(
    connection: &Connection,
    db_path: &Path,
    mobile: &str,
) -> ClientResult<Option<UserData>> {
    connection
        .query_row(
            "SELECT mobile, name, store_name, store_address, store_gst, store_contact
             FROM users
             WHERE mobile = ?1",
            params![mobile],
            |row| {
                Ok(UserData {
                    mobile: row.get(0)?,
                    name: row.get(1)?,
                    settings: StoreSettings {
                        store_name: row.get(2)?,
                        store_address: row.get(3)?,
                        store_gst: row.get(4)?,
                        store_contact: row.get(5)?,
                    },
                })
            },
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))
}

fn settings_updates(updates: &StoreSettings) -> Vec<(&'static str, &str)> {
    [
        ("store_name", updates.store_name.as_deref()),
        ("store_address", updates.store_address.as_deref()),
        ("store_gst", updates.store_gst.as_deref()),
        ("store_contact", updates.store_contact.as_deref()),
    ]
    .into_iter()
    .filter_map(|(column, value)| value.map(|text| (column, text)))
    .collect()
}
