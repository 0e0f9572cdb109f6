use std::io;

use serde_json::Value;

use super::format::{key_value_rows, text_field};

const SETTING_LABELS: [(&str, &str); 4] = [
    ("store_name", "Store name:"),
    ("store_address", "Address:"),
    ("store_gst", "GSTIN:"),
    ("store_contact", "Contact:"),
];

pub fn render_register(data: &Value) -> io::Result<String> {
    let mobile = text_field(data, "mobile");
    let lines = [
        format!("Registered {} ({mobile}).", text_field(data, "name")),
        String::new(),
        "Next:".to_string(),
        format!("  khata user settings {mobile} --store-name \"<store>\""),
        format!("  khata parse \"ramesh paid 1000\" --save {mobile}"),
    ];
    Ok(lines.join("\n"))
}

pub fn render_show(data: &Value) -> io::Result<String> {
    let mut rows = vec![
        ("Mobile:", text_field(data, "mobile")),
        ("Name:", text_field(data, "name")),
    ];
    rows.extend(
        SETTING_LABELS
            .iter()
            .map(|(key, label)| (*label, text_field(data, key))),
    );

    let mut lines = vec!["User:".to_string()];
    lines.extend(key_value_rows(&rows, 2));
    Ok(lines.join("\n"))
}

pub fn render_settings(data: &Value) -> io::Result<String> {
    let settings = data
        .get("settings")
        .ok_or_else(|| io::Error::other("settings output requires settings"))?;
    let updated = data
        .get("updated")
        .and_then(Value::as_array)
        .map(|keys| keys.iter().filter_map(Value::as_str).collect::<Vec<&str>>())
        .unwrap_or_default();

    let heading = if updated.is_empty() {
        format!("Store settings for {}:", text_field(data, "mobile"))
    } else {
        format!(
            "Updated {} for {}:",
            updated.join(", "),
            text_field(data, "mobile")
        )
    };

    let rows = SETTING_LABELS
        .iter()
        .map(|(key, label)| (*label, text_field(settings, key)))
        .collect::<Vec<(&str, String)>>();

    let mut lines = vec![heading];
    lines.extend(key_value_rows(&rows, 2));
    Ok(lines.join("\n"))
}
