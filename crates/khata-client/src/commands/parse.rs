use std::path::Path;

use crate::commands::common::{open_ledger, require_mobile};
use crate::completion::{Completer, OpenAiCompleter};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ParseData;
use crate::entries::{self, persist};
use crate::message::parse_message_with_path;
use crate::ClientResult;

#[derive(Default)]
pub struct ParseOptions<'a> {
    pub message: String,
    /// Stores the parsed entries for this mobile when set.
    pub save: Option<String>,
    pub home_override: Option<&'a Path>,
    /// Defaults to the environment-configured completion service.
    pub completer: Option<&'a dyn Completer>,
}

pub fn run(message: String, save: Option<String>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ParseOptions {
        message,
        save,
        home_override: None,
        completer: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ParseOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let save_mobile = options
        .save
        .as_deref()
        .map(|mobile| require_mobile(mobile, "parse"))
        .transpose()?;

    let default_completer;
    let completer: &dyn Completer = match options.completer {
        Some(completer) => completer,
        None => {
            default_completer = OpenAiCompleter::from_env();
            &default_completer
        }
    };

    let outcome = parse_message_with_path(&options.message, completer)?;

    let saved = match save_mobile {
        Some(mobile) => {
            let batch = entries::prepare_candidates(&outcome.entries, &entries::now_timestamp())?;
            let mut ledger = open_ledger(options.home_override)?;
            persist::insert_entries(&mut ledger.connection, &ledger.db_path, &mobile, &batch.entries)?;
            Some(batch.summary)
        }
        None => None,
    };

    success(
        "parse",
        ParseData {
            message: options.message.trim().to_string(),
            path: outcome.path,
            items: outcome.entries,
            saved,
        },
    )
}
