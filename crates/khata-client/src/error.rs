use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::state::HOME_ENV;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

/// Failure classes of the message parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    EmptyInput,
    FallbackUnavailable,
    MalformedFallbackResponse,
    InvalidFallbackShape,
}

impl ParseErrorKind {
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::FallbackUnavailable => "fallback_unavailable",
            Self::MalformedFallbackResponse => "malformed_fallback_response",
            Self::InvalidFallbackShape => "invalid_fallback_shape",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "empty_input" => Some(Self::EmptyInput),
            "fallback_unavailable" => Some(Self::FallbackUnavailable),
            "malformed_fallback_response" => Some(Self::MalformedFallbackResponse),
            "invalid_fallback_shape" => Some(Self::InvalidFallbackShape),
            _ => None,
        }
    }
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        ParseErrorKind::from_code(&self.code)
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `khata {cmd} --help` for usage."),
            None => "Run `khata --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn empty_input() -> Self {
        Self::new(
            ParseErrorKind::EmptyInput.code(),
            "Message is empty. Provide a non-empty transaction message.",
            vec!["Example: `khata parse \"ramesh paid 1000\"`.".to_string()],
        )
    }

    pub fn fallback_unavailable(detail: &str) -> Self {
        Self::new(
            ParseErrorKind::FallbackUnavailable.code(),
            &format!("The message could not be parsed by the completion service: {detail}"),
            vec![
                "Check network access to the completion service and retry.".to_string(),
                "Repayments like `ramesh paid 1000` or `paid dal vendor 1250` parse offline."
                    .to_string(),
            ],
        )
    }

    pub fn fallback_not_configured(variable: &str) -> Self {
        Self::new(
            ParseErrorKind::FallbackUnavailable.code(),
            &format!("The completion service is not configured: `{variable}` is not set."),
            vec![
                format!("Export `{variable}` and rerun the command."),
                "Repayments like `ramesh paid 1000` or `paid dal vendor 1250` parse offline."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "missing_variable": variable,
        }))
    }

    pub fn malformed_fallback_response(raw: &str) -> Self {
        Self::new(
            ParseErrorKind::MalformedFallbackResponse.code(),
            "The completion service did not return a JSON object.",
            vec!["Rephrase the message and retry.".to_string()],
        )
        .with_data(json!({
            "raw_excerpt": excerpt(raw),
        }))
    }

    pub fn invalid_fallback_shape(detail: &str) -> Self {
        Self::new(
            ParseErrorKind::InvalidFallbackShape.code(),
            &format!("The completion service returned JSON without an `items` list: {detail}"),
            vec!["Rephrase the message and retry.".to_string()],
        )
    }

    /// Same kind as a shape error; the reply was well formed but listed nothing.
    pub fn no_fallback_entries() -> Self {
        Self::new(
            ParseErrorKind::InvalidFallbackShape.code(),
            "The completion service returned an empty `items` list: no entries parsed.",
            vec!["Rephrase the message with an amount and retry.".to_string()],
        )
    }

    pub fn user_not_found(mobile: &str) -> Self {
        Self::new(
            "user_not_found",
            &format!("No user is registered for mobile `{mobile}`."),
            vec![format!(
                "Run `khata user register {mobile} <name>` to create the user."
            )],
        )
        .with_data(json!({
            "mobile": mobile,
        }))
    }

    pub fn invalid_entries_format(message: &str, received_format: &str) -> Self {
        Self::invalid_argument_with_recovery(
            message,
            vec![
                "Provide a JSON array of entries, a JSON object with `items`, or CSV.".to_string(),
                "Run `khata entry add --help` to confirm field names.".to_string(),
            ],
        )
        .with_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "json_items", "csv"],
        }))
    }

    pub fn entries_schema_mismatch(expected_headers: Vec<String>, actual_headers: Vec<String>) -> Self {
        Self::new(
            "entries_schema_mismatch",
            "CSV headers do not match the entry schema.",
            vec![
                "Include only known headers; `revenue` is required.".to_string(),
                "Run `khata entry add --help` to review the fields.".to_string(),
            ],
        )
        .with_data(json!({
            "expected_headers": expected_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn no_valid_entries(rows_read: usize) -> Self {
        Self::new(
            "no_valid_entries",
            &format!("None of the {rows_read} entries had a non-zero revenue. Nothing was written."),
            vec!["Give every entry a non-zero `revenue` and retry.".to_string()],
        )
        .with_data(json!({
            "rows_read": rows_read,
        }))
    }

    pub fn invalid_invoice(message: &str) -> Self {
        Self::new(
            "invalid_invoice",
            message,
            vec!["Run `khata invoice --help` to review the request format.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn ledger_init_permission_denied(path: &Path, detail: &str) -> Self {
        Self::at_ledger(
            "ledger_init_permission_denied",
            path,
            |shown| format!("The shop ledger at `{shown}` is not writable: {detail}"),
            |shown| vec![format!("Make `{shown}` writable, or point `{HOME_ENV}` at a directory you own.")],
        )
    }

    pub fn ledger_locked(path: &Path) -> Self {
        Self::at_ledger(
            "ledger_locked",
            path,
            |shown| format!("Another process holds a lock on the shop ledger `{shown}`."),
            |_| vec!["Wait for the other `khata` command to finish, then retry.".to_string()],
        )
    }

    pub fn ledger_corrupt(path: &Path) -> Self {
        Self::at_ledger(
            "ledger_corrupt",
            path,
            |shown| format!("`{shown}` is not a usable shop ledger."),
            |shown| {
                vec![
                    format!("Move `{shown}` aside to start a fresh ledger."),
                    format!("Or set `{HOME_ENV}` to a directory holding a good copy."),
                ]
            },
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        Self::at_ledger(
            "migration_failed",
            path,
            |shown| format!("Could not upgrade the shop ledger `{shown}`: {detail}"),
            |shown| vec![format!("Remove tables in `{shown}` that were not created by khata.")],
        )
    }

    pub fn ledger_init_failed(path: &Path, detail: &str) -> Self {
        Self::at_ledger(
            "ledger_init_failed",
            path,
            |shown| format!("Could not open the shop ledger at `{shown}`: {detail}"),
            |_| Vec::new(),
        )
    }

    fn at_ledger(
        code: &str,
        path: &Path,
        message: impl FnOnce(&str) -> String,
        recovery_steps: impl FnOnce(&str) -> Vec<String>,
    ) -> Self {
        let shown = path.display().to_string();
        Self::new(code, &message(&shown), recovery_steps(&shown)).with_data(json!({
            "ledger_path": shown,
        }))
    }
}

fn excerpt(raw: &str) -> String {
    const LIMIT: usize = 200;
    let trimmed = raw.trim();
    match trimmed.char_indices().nth(LIMIT) {
        Some((index, _)) => format!("{}...", &trimmed[..index]),
        None => trimmed.to_string(),
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
