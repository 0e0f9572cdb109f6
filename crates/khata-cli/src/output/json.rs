use std::io;

use khata_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::{Value, json};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        // Bare parse data carries `items` at the top level, so it pipes
        // straight into `khata entry add <mobile> -`.
        "parse" => success.data.clone(),
        "entry list" => render_entry_list_json(&success.data),
        "user register" | "user show" | "user settings" | "entry add" | "entry clear"
        | "invoice" => envelope_json(&success.data),
        _ => {
            return Err(io::Error::other(format!(
                "JSON output is not supported for command `{}`",
                success.command
            )));
        }
    };

    serialize_json_pretty(&value)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let payload = json!({
        "error": {
            "code": error.code,
            "message": error.message,
            "recovery_steps": error.recovery_steps,
        }
    });
    serialize_json_pretty(&payload)
}

fn envelope_json(data: &Value) -> Value {
    json!({
        "ok": true,
        "version": JSON_VERSION,
        "data": data.clone()
    })
}

fn render_entry_list_json(data: &Value) -> Value {
    json!({
        "ok": true,
        "version": JSON_VERSION,
        "data": {
            "mobile": data.get("mobile").cloned().unwrap_or(Value::Null),
            "summary": data.get("summary").cloned().unwrap_or(Value::Null),
            "rows": data.get("rows").cloned().unwrap_or_else(|| json!([])),
        }
    })
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}
