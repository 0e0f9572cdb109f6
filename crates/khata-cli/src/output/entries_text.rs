use std::io;

use serde_json::Value;

use super::format::{Align, Column, int_field, key_value_rows, render_table, terminal_width, text_field};

const ENTRY_COLUMNS: [Column<'static>; 6] = [
    Column {
        name: "Date",
        align: Align::Left,
    },
    Column {
        name: "Product",
        align: Align::Left,
    },
    Column {
        name: "Units",
        align: Align::Right,
    },
    Column {
        name: "Revenue",
        align: Align::Right,
    },
    Column {
        name: "Credit",
        align: Align::Left,
    },
    Column {
        name: "Creditor",
        align: Align::Left,
    },
];

pub fn render_list(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("entry list output requires summary"))?;
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("entry list output requires rows"))?;
    let mobile = text_field(data, "mobile");

    let mut lines = vec![format!("Ledger for {mobile}:"), String::new()];
    lines.extend(key_value_rows(
        &[
            ("Entries:", int_field(summary, "entry_count").to_string()),
            ("Money in:", int_field(summary, "inflow_total").to_string()),
            ("Money out:", int_field(summary, "outflow_total").to_string()),
            ("Net:", int_field(summary, "net_total").to_string()),
            ("Latest:", text_field(summary, "latest_date")),
        ],
        2,
    ));

    if rows.is_empty() {
        lines.push(String::new());
        lines.push("No entries yet.".to_string());
        lines.push(String::new());
        lines.push("Record one:".to_string());
        lines.push(format!("  khata parse \"ramesh paid 1000\" --save {mobile}"));
        lines.push(format!("  khata entry add {mobile} <path>"));
        return Ok(lines.join("\n"));
    }

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                display_date(row),
                text_field(row, "product"),
                int_field(row, "units").to_string(),
                int_field(row, "revenue").to_string(),
                text_field(row, "credit"),
                text_field(row, "creditor"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    lines.push(String::new());
    lines.extend(render_table(&ENTRY_COLUMNS, &table_rows, terminal_width()));
    Ok(lines.join("\n"))
}

pub fn render_add(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("entry add output requires summary"))?;

    let mut lines = vec![
        format!(
            "Added {} entries for {}.",
            int_field(summary, "inserted"),
            text_field(data, "mobile")
        ),
        String::new(),
    ];
    lines.extend(key_value_rows(
        &[
            ("Source:", text_field(data, "source_used")),
            ("Rows read:", int_field(summary, "rows_read").to_string()),
            (
                "Skipped (zero revenue):",
                int_field(summary, "skipped_zero_revenue").to_string(),
            ),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_clear(data: &Value) -> io::Result<String> {
    Ok(format!(
        "Deleted {} entries for {}.",
        int_field(data, "deleted"),
        text_field(data, "mobile")
    ))
}

/// `2026-01-03T08:00:00.000Z` reads as `2026-01-03 08:00`.
fn display_date(row: &Value) -> String {
    let raw = text_field(row, "date");
    match (raw.get(..10), raw.get(11..16)) {
        (Some(day), Some(time)) if raw.as_bytes().get(10) == Some(&b'T') => format!("{day} {time}"),
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_add, render_list};

    #[test]
    fn list_renders_summary_and_rows() {
        let rendered = render_list(&json!({
            "mobile": "9876543210",
            "summary": {
                "entry_count": 2,
                "inflow_total": 1000,
                "outflow_total": -5000,
                "net_total": -4000,
                "latest_date": "2026-01-03T08:00:00.000Z"
            },
            "rows": [
                {"id": 2, "product": "rent", "units": 0, "revenue": -5000, "credit": false, "creditor": null, "date": "2026-01-03T08:00:00.000Z"},
                {"id": 1, "product": null, "units": 0, "revenue": 1000, "credit": false, "creditor": "Ramesh", "date": "2026-01-01"}
            ]
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Ledger for 9876543210:"));
            assert!(text.contains("  Net:"));
            assert!(text.contains("2026-01-03 08:00"));
            assert!(text.contains("Ramesh"));
            assert!(text.contains("-5000"));
        }
    }

    #[test]
    fn empty_list_suggests_next_steps() {
        let rendered = render_list(&json!({
            "mobile": "9876543210",
            "summary": {"entry_count": 0, "latest_date": null},
            "rows": []
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("No entries yet."));
            assert!(text.contains("--save 9876543210"));
        }
    }

    #[test]
    fn add_reports_skipped_rows() {
        let rendered = render_add(&json!({
            "mobile": "9876543210",
            "source_used": "stdin",
            "summary": {"rows_read": 4, "inserted": 3, "skipped_zero_revenue": 1}
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Added 3 entries for 9876543210."));
            assert!(text.contains("Skipped (zero revenue):  1"));
        }
    }
}
