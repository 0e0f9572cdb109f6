//! Free-text message to ledger entry parsing.
//!
//! Two deterministic repayment shapes are answered locally. Everything else
//! goes once to the completion service, whose reply is extracted and
//! normalized with the same permissive coercion as the local path.

pub mod coerce;
pub mod extract;
pub mod fallback;
pub mod prompt;
pub mod repayment;
pub mod tokens;

use crate::completion::Completer;
use crate::contracts::types::{LedgerEntryCandidate, ParsePath};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub path: ParsePath,
    pub entries: Vec<LedgerEntryCandidate>,
}

pub fn parse_message(
    message: &str,
    completer: &dyn Completer,
) -> ClientResult<Vec<LedgerEntryCandidate>> {
    parse_message_with_path(message, completer).map(|outcome| outcome.entries)
}

pub fn parse_message_with_path(
    message: &str,
    completer: &dyn Completer,
) -> ClientResult<ParseOutcome> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(ClientError::empty_input());
    }

    let tokens = tokens::tokenize(trimmed);
    tracing::debug!(token_count = tokens.len(), "message tokenized");

    if let Some(matched) = repayment::match_repayment(&tokens) {
        let path = matched.rule.path();
        tracing::debug!(path = path.as_str(), "repayment rule matched");
        return Ok(ParseOutcome {
            path,
            entries: vec![coerce::normalize_record(&matched.to_record())],
        });
    }

    tracing::debug!("no repayment rule matched, calling completion fallback");
    let raw = fallback::invoke(completer, trimmed)?;
    let items = extract::extract_items(&raw).inspect_err(|error| {
        tracing::warn!(code = %error.code, "completion reply rejected");
    })?;
    let entries = items
        .iter()
        .map(coerce::normalize_record)
        .collect::<Vec<LedgerEntryCandidate>>();
    tracing::debug!(entry_count = entries.len(), "fallback entries normalized");

    Ok(ParseOutcome {
        path: ParsePath::Fallback,
        entries,
    })
}
