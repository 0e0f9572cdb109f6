use std::io;

use serde_json::Value;

use super::format::{Align, Column, int_field, render_table, terminal_width, text_field};

const ITEM_COLUMNS: [Column<'static>; 5] = [
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

pub fn render_parse(data: &Value) -> io::Result<String> {
    let items = data
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("parse output requires items"))?;

    let how = match data.get("path").and_then(Value::as_str) {
        Some("customer_repayment") => "customer repayment",
        Some("vendor_repayment") => "vendor repayment",
        _ => "completion service",
    };

    let rows = items
        .iter()
        .map(|item| {
            vec![
                text_field(item, "product"),
                int_field(item, "units").to_string(),
                revenue_text(item),
                text_field(item, "credit"),
                text_field(item, "creditor"),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![
        format!("Parsed {} entries ({how}):", items.len()),
        String::new(),
    ];
    lines.extend(render_table(&ITEM_COLUMNS, &rows, terminal_width()));

    if let Some(saved) = data.get("saved") {
        lines.push(String::new());
        lines.push(format!(
            "Saved {} entries ({} skipped with zero revenue).",
            int_field(saved, "inserted"),
            int_field(saved, "skipped_zero_revenue")
        ));
    }

    Ok(lines.join("\n"))
}

/// Whole amounts print without a trailing `.0`.
fn revenue_text(item: &Value) -> String {
    let revenue = item.get("revenue").and_then(Value::as_f64).unwrap_or(0.0);
    if revenue.fract() == 0.0 {
        format!("{revenue:.0}")
    } else {
        revenue.to_string()
    }
}
