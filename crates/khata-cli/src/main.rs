mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use khata_client::ClientError;
use stdout_io::write_stdout_text;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const ROOT_HELP: &str = "Khata - shop ledger from free-text messages

Usage:
  khata <command>

Start here:
  khata user register <mobile> <name>
  khata parse \"ramesh paid 1000\"
  khata --help
";

const TOP_LEVEL_HELP: &str = "Khata - shop ledger from free-text messages

USAGE: khata <command>

Set up a shop:
  khata user register <mobile> <name>                     Create (or rename) a user
  khata user settings <mobile> --store-name <name>        Save store details for invoices
  khata user show <mobile>                                Show a user and its store details

Record transactions:
  khata parse \"ramesh paid 1000\"                          Preview entries for a message
  khata parse \"2 maggi 24 rs\" --save <mobile>             Parse and store the entries
  khata entry add <mobile> <path>                         Add entries from JSON or CSV
  khata entry list <mobile>                               List entries, newest first
  khata entry clear <mobile>                              Delete all entries for a mobile

Bill a customer:
  khata invoice <path> --mobile <mobile>                  Compute an invoice from a JSON request

Repayments (`<name> paid <amount>`, `paid <vendor> <amount>`) parse offline.
Other messages need OPENAI_API_KEY for the completion service.

Add --json to any command for machine-readable output.
Ledger location: $KHATA_HOME (default ~/.khata). Logs: RUST_LOG=debug.
";

/// Usage mistakes and rejected input.
const EXIT_USER_ERROR: u8 = 1;
/// Ledger, serialization or stdout failures.
const EXIT_INTERNAL_ERROR: u8 = 2;

const INTERNAL_LEDGER_CODES: [&str; 5] = [
    "ledger_init_failed",
    "ledger_init_permission_denied",
    "ledger_locked",
    "ledger_corrupt",
    "migration_failed",
];

fn main() -> ExitCode {
    init_tracing();
    let raw_args = std::env::args().collect::<Vec<String>>();
    run(&raw_args)
}

/// Logs go to stderr so stdout stays parseable with `--json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn run(raw_args: &[String]) -> ExitCode {
    if raw_args.len() == 1 {
        return finish(write_stdout_text(ROOT_HELP), ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse_from(raw_args) {
        Ok(value) => value,
        Err(err) => return report_clap_error(&err, raw_args),
    };
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => finish(output::print_success(&success, mode), ExitCode::SUCCESS),
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            finish(output::print_failure(&error, mode), exit_code_for_error(&error))
        }
    }
}

/// A failed write to stdout overrides whatever the command decided.
fn finish<E>(written: Result<(), E>, code: ExitCode) -> ExitCode {
    match written {
        Ok(()) => code,
        Err(_) => ExitCode::from(EXIT_INTERNAL_ERROR),
    }
}

fn report_clap_error(err: &clap::Error, raw_args: &[String]) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let text = if is_top_level_help_request(raw_args) {
                TOP_LEVEL_HELP.to_string()
            } else {
                err.to_string()
            };
            finish(write_stdout_text(&text), ExitCode::SUCCESS)
        }
        kind => {
            let command_hint = match kind {
                ErrorKind::MissingRequiredArgument
                | ErrorKind::InvalidValue
                | ErrorKind::ValueValidation
                | ErrorKind::WrongNumberOfValues
                | ErrorKind::UnknownArgument
                | ErrorKind::InvalidSubcommand => command_path_from_args(raw_args),
                _ => None,
            };
            let usage_error = ClientError::invalid_argument_for_command(
                &strip_clap_boilerplate(&err.to_string()),
                command_hint.as_deref(),
            );
            finish(
                output::print_failure(&usage_error, requested_output_mode(raw_args)),
                ExitCode::from(EXIT_USER_ERROR),
            )
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    matches!(raw_args, [_, flag] if flag == "--help" || flag == "-h")
}

/// Keeps only clap's error line(s); the "What to do next" block replaces
/// its usage and help hints.
fn strip_clap_boilerplate(message: &str) -> String {
    let cut = ["\n\nUsage:", "\nFor more information"]
        .iter()
        .find_map(|marker| message.find(marker))
        .unwrap_or(message.len());
    message[..cut].trim_end().to_string()
}

/// Subcommand path named in help hints, taken from the raw arguments since
/// clap failed before producing a `Cli`.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let words: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();

    let hint = match words.as_slice() {
        ["user", sub @ ("register" | "show" | "settings"), ..] => format!("user {sub}"),
        ["entry", sub @ ("list" | "add" | "clear"), ..] => format!("entry {sub}"),
        [group @ ("user" | "entry" | "parse" | "invoice"), ..] => (*group).to_string(),
        _ => return None,
    };
    Some(hint)
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(EXIT_INTERNAL_ERROR)
    } else {
        ExitCode::from(EXIT_USER_ERROR)
    }
}

fn requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        output::OutputMode::Json
    } else {
        output::OutputMode::Text
    }
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_") || INTERNAL_LEDGER_CODES.contains(&error.code.as_str())
}
