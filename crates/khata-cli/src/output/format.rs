use std::cmp;

use serde_json::Value;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const MIN_COLUMN_WIDTH: usize = 6;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(100);
    cmp::max(from_env, 40)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| char_width(label))
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders rows under a header, shrinking the widest left-aligned column
/// (and wrapping its text) when the table would exceed `max_width`.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>], max_width: usize) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths = columns
        .iter()
        .map(|column| char_width(column.name))
        .collect::<Vec<usize>>();
    for row in rows {
        for (slot, value) in widths.iter_mut().zip(row) {
            *slot = cmp::max(*slot, char_width(value));
        }
    }

    let gaps = COLUMN_GAP * columns.len().saturating_sub(1);
    let total = INDENT + gaps + widths.iter().sum::<usize>();
    if total > max_width
        && let Some(widest) = widest_left_column(columns, &widths)
    {
        let overflow = total - max_width;
        widths[widest] = cmp::max(widths[widest].saturating_sub(overflow), MIN_COLUMN_WIDTH);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];

    for row in rows {
        let wrapped = widths
            .iter()
            .enumerate()
            .map(|(index, width)| wrap_text(row.get(index).map_or("", String::as_str), *width))
            .collect::<Vec<Vec<String>>>();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        for line_index in 0..height {
            let cells = wrapped
                .iter()
                .map(|chunks| chunks.get(line_index).cloned().unwrap_or_default())
                .collect::<Vec<String>>();
            output.push(format_row(columns, &cells, &widths));
        }
    }

    output
}

fn widest_left_column(columns: &[Column<'_>], widths: &[usize]) -> Option<usize> {
    columns
        .iter()
        .zip(widths)
        .enumerate()
        .filter(|(_, (column, _))| column.align == Align::Left)
        .max_by_key(|(_, (_, width))| **width)
        .map(|(index, _)| index)
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, width))| {
            let value = cells.get(index).map_or("", String::as_str);
            let pad = width.saturating_sub(char_width(value));
            match column.align {
                Align::Left => format!("{value}{}", " ".repeat(pad)),
                Align::Right => format!("{}{value}", " ".repeat(pad)),
            }
        })
        .collect::<Vec<String>>();

    format!("{}{}", " ".repeat(INDENT), pieces.join(&" ".repeat(COLUMN_GAP)))
        .trim_end()
        .to_string()
}

fn wrap_text(value: &str, width: usize) -> Vec<String> {
    if width == 0 || char_width(value) <= width {
        return vec![value.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in value.split_whitespace() {
        let needed = if current.is_empty() {
            char_width(word)
        } else {
            char_width(&current) + 1 + char_width(word)
        };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        let mut characters = word.chars().peekable();
        while characters.peek().is_some() {
            let chunk = characters.by_ref().take(width).collect::<String>();
            if char_width(&chunk) == width {
                lines.push(chunk);
            } else {
                current = chunk;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Text for a JSON field, with `-` for missing, null, or blank values.
pub fn text_field(data: &Value, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => (if *flag { "yes" } else { "no" }).to_string(),
        _ => "-".to_string(),
    }
}

pub fn int_field(data: &Value, key: &str) -> i64 {
    data.get(key).and_then(Value::as_i64).unwrap_or(0)
}

fn char_width(value: &str) -> usize {
    value.chars().count()
}
