use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::{ClientError, ClientResult};

const ENTRY_HEADERS: [&str; 6] = ["product", "units", "revenue", "credit", "creditor", "date"];
const REQUIRED_HEADER: &str = "revenue";

/// Turns an `entry add` payload into loosely typed entry records.
///
/// Accepts a JSON array, a JSON object with an `items` array (the shape the
/// parse command prints), or CSV with a header row.
pub(crate) fn parse_source(content: &str) -> ClientResult<Vec<Value>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ClientError::invalid_entries_format(
            "Entry source is empty.",
            "empty",
        ));
    }

    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return parse_json(trimmed);
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    Err(ClientError::invalid_entries_format(
        "Unsupported entry format. Provide JSON or CSV with headers.",
        "unknown",
    ))
}

fn parse_json(content: &str) -> ClientResult<Vec<Value>> {
    let parsed = serde_json::from_str::<Value>(content).map_err(|_| {
        ClientError::invalid_entries_format("Invalid JSON input.", "json_invalid")
    })?;

    let items = match parsed {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("items") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ClientError::invalid_entries_format(
                    "JSON objects must carry an `items` array.",
                    "json_object_without_items",
                ));
            }
        },
        _ => {
            return Err(ClientError::invalid_entries_format(
                "JSON input must be an array of entries or an object with `items`.",
                "json_scalar",
            ));
        }
    };

    if items.iter().any(|item| !item.is_object()) {
        return Err(ClientError::invalid_entries_format(
            "Every entry must be a JSON object.",
            "json_non_object_entry",
        ));
    }

    Ok(items)
}

fn parse_csv(content: &str) -> ClientResult<Vec<Value>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| {
            ClientError::invalid_entries_format("CSV header row is missing or unreadable.", "csv")
        })?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(ClientError::entries_schema_mismatch(
            ENTRY_HEADERS.iter().map(|value| value.to_string()).collect(),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index))
        .collect::<HashMap<&str, usize>>();

    let mut records = Vec::new();
    for result_row in reader.records() {
        let row = result_row.map_err(|_| {
            ClientError::invalid_entries_format("CSV rows are malformed or not UTF-8.", "csv")
        })?;

        let mut object = Map::new();
        for (name, index) in &index_by_name {
            let Some(cell) = row.get(*index) else {
                continue;
            };
            let value = if *name == "credit" {
                Value::Bool(csv_flag(cell))
            } else {
                Value::String(cell.to_string())
            };
            object.insert((*name).to_string(), value);
        }
        records.push(Value::Object(object));
    }

    Ok(records)
}

fn csv_flag(cell: &str) -> bool {
    matches!(
        cell.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    )
}

fn looks_like_csv(content: &str) -> bool {
    content
        .lines()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| line.contains(','))
}

fn headers_are_valid(headers: &[String]) -> bool {
    headers.iter().any(|header| header == REQUIRED_HEADER)
        && headers
            .iter()
            .all(|header| ENTRY_HEADERS.contains(&header.as_str()))
}
