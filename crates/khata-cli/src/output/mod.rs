mod entries_text;
mod error_text;
mod format;
mod invoice_text;
mod json;
mod mode;
mod parse_text;
mod user_text;

use std::io;

use khata_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "user register" => user_text::render_register(&success.data),
        "user show" => user_text::render_show(&success.data),
        "user settings" => user_text::render_settings(&success.data),
        "entry list" => entries_text::render_list(&success.data),
        "entry add" => entries_text::render_add(&success.data),
        "entry clear" => entries_text::render_clear(&success.data),
        "parse" => parse_text::render_parse(&success.data),
        "invoice" => invoice_text::render_invoice(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
