use std::io;

use serde_json::Value;

use super::format::{Align, Column, key_value_rows, render_table, terminal_width, text_field};

const LINE_COLUMNS: [Column<'static>; 6] = [
    Column {
        name: "#",
        align: Align::Right,
    },
    Column {
        name: "Description",
        align: Align::Left,
    },
    Column {
        name: "Price",
        align: Align::Right,
    },
    Column {
        name: "GST %",
        align: Align::Right,
    },
    Column {
        name: "GST Amt",
        align: Align::Right,
    },
    Column {
        name: "Line Total",
        align: Align::Right,
    },
];

pub fn render_invoice(data: &Value) -> io::Result<String> {
    let business = data
        .get("business")
        .ok_or_else(|| io::Error::other("invoice output requires business"))?;
    let totals = data
        .get("totals")
        .ok_or_else(|| io::Error::other("invoice output requires totals"))?;
    let lines_data = data
        .get("lines")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("invoice output requires lines"))?;
    let label = data
        .get("currency_label")
        .and_then(Value::as_str)
        .unwrap_or("Rs.");
    let money = |value: &Value, key: &str| format!("{label} {}", text_field(value, key));

    let mut lines = vec![text_field(business, "store_name")];
    let address = optional_field(business, "store_address");
    let contact_line = [
        optional_field(business, "store_gst").map(|gst| format!("GSTIN: {gst}")),
        optional_field(business, "store_contact").map(|contact| format!("Contact: {contact}")),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<String>>();
    lines.extend(address);
    if !contact_line.is_empty() {
        lines.push(contact_line.join("  |  "));
    }

    lines.push(String::new());
    lines.extend(key_value_rows(
        &[
            ("Invoice No:", text_field(data, "invoice_no")),
            ("Date:", text_field(data, "date")),
            ("Bill To:", text_field(data, "customer")),
        ],
        0,
    ));

    let rows = lines_data
        .iter()
        .map(|line| {
            vec![
                text_field(line, "index"),
                text_field(line, "description"),
                money(line, "price"),
                format!("{}%", text_field(line, "gst_percent")),
                money(line, "gst_amount"),
                money(line, "line_total"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.push(String::new());
    lines.extend(render_table(&LINE_COLUMNS, &rows, terminal_width()));

    lines.push(String::new());
    lines.extend(key_value_rows(
        &[
            ("Subtotal", money(totals, "subtotal")),
            ("GST Total", money(totals, "gst_total")),
            ("Grand Total", money(totals, "grand_total")),
        ],
        2,
    ));

    if let Some(terms) = optional_field(data, "payment_terms") {
        lines.push(String::new());
        lines.push("Payment Terms".to_string());
        lines.push(format!("  {terms}"));
    }

    Ok(lines.join("\n"))
}

fn optional_field(data: &Value, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_invoice;

    #[test]
    fn renders_header_lines_and_totals() {
        let rendered = render_invoice(&json!({
            "invoice_no": "INV20260314-090507",
            "date": "2026-03-14",
            "currency_label": "Rs.",
            "business": {
                "store_name": "Sharma General Store",
                "store_address": "12 MG Road, Pune",
                "store_gst": "29ABCDE1234F1Z5",
                "store_contact": ""
            },
            "customer": "Ramesh",
            "lines": [{
                "index": 1,
                "description": "Haldi masala",
                "price": "250.00",
                "gst_percent": "5.00",
                "gst_amount": "12.50",
                "line_total": "262.50"
            }],
            "totals": {"subtotal": "250.00", "gst_total": "12.50", "grand_total": "262.50"},
            "payment_terms": null
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Sharma General Store\n12 MG Road, Pune\nGSTIN: 29ABCDE1234F1Z5\n"));
            assert!(!text.contains("Contact:"));
            assert!(text.contains("Invoice No:  INV20260314-090507"));
            assert!(text.contains("5.00%"));
            assert!(text.contains("Rs. 262.50"));
            assert!(text.contains("  Grand Total  Rs. 262.50"));
            assert!(!text.contains("Payment Terms"));
        }
    }
}
