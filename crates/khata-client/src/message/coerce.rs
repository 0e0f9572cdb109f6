//! Permissive field coercion for ledger entry records.
//!
//! Every function here has a default and never fails. A malformed field
//! degrades to its default instead of rejecting the record.

use serde_json::Value;

use crate::contracts::types::LedgerEntryCandidate;

pub fn to_nonneg_int_or(value: Option<&Value>, default: u64) -> u64 {
    let Some(number) = value.and_then(numeric_value) else {
        return default;
    };
    if number.is_sign_negative() && number.trunc() != 0.0 {
        return default;
    }
    // Saturating cast; fractions truncate toward zero.
    number.trunc() as u64
}

pub fn to_decimal_or(value: Option<&Value>, default: f64) -> f64 {
    value.and_then(numeric_value).unwrap_or(default)
}

pub fn to_bool_or(value: Option<&Value>, default: bool) -> bool {
    match value {
        None => default,
        Some(present) => is_truthy(present),
    }
}

pub fn to_text_or_none(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.to_string())
}

pub fn normalize_record(record: &Value) -> LedgerEntryCandidate {
    let field = |name: &str| record.get(name);

    LedgerEntryCandidate {
        product: to_text_or_none(field("product")),
        units: to_nonneg_int_or(field("units"), 0),
        revenue: to_decimal_or(field("revenue"), 0.0),
        credit: to_bool_or(field("credit"), false),
        creditor: to_text_or_none(field("creditor")),
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|inner| inner != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{normalize_record, to_bool_or, to_decimal_or, to_nonneg_int_or, to_text_or_none};
    use crate::contracts::types::LedgerEntryCandidate;

    #[test]
    fn units_truncate_toward_zero_and_reject_negatives() {
        let cases = [
            (json!(3), 3),
            (json!(2.9), 2),
            (json!("12.7"), 12),
            (json!(" 4 "), 4),
            (json!(-0.5), 0),
            (json!(-3), 0),
            (json!("abc"), 0),
            (json!(null), 0),
            (json!([1]), 0),
            (json!(true), 1),
        ];
        for (value, expected) in cases {
            assert_eq!(to_nonneg_int_or(Some(&value), 0), expected, "{value}");
        }
        assert_eq!(to_nonneg_int_or(None, 0), 0);
    }

    #[test]
    fn revenue_accepts_numbers_and_numeric_text() {
        assert_eq!(to_decimal_or(Some(&json!(-1250)), 0.0), -1250.0);
        assert_eq!(to_decimal_or(Some(&json!("250.5")), 0.0), 250.5);
        assert_eq!(to_decimal_or(Some(&json!("250 rs")), 0.0), 0.0);
        assert_eq!(to_decimal_or(Some(&json!("NaN")), 0.0), 0.0);
        assert_eq!(to_decimal_or(Some(&json!("inf")), 0.0), 0.0);
        assert_eq!(to_decimal_or(Some(&Value::Null), 0.0), 0.0);
        assert_eq!(to_decimal_or(None, 0.0), 0.0);
    }

    #[test]
    fn credit_follows_truthiness() {
        assert!(!to_bool_or(None, false));
        assert!(!to_bool_or(Some(&Value::Null), false));
        assert!(!to_bool_or(Some(&json!(0)), false));
        assert!(!to_bool_or(Some(&json!("")), false));
        assert!(!to_bool_or(Some(&json!([])), false));
        assert!(to_bool_or(Some(&json!(true)), false));
        assert!(to_bool_or(Some(&json!(1)), false));
        assert!(to_bool_or(Some(&json!("no")), false));
        assert!(to_bool_or(Some(&json!({"a": 1})), false));
    }

    #[test]
    fn text_fields_drop_blank_and_non_string_values() {
        assert_eq!(
            to_text_or_none(Some(&json!(" haldi masala "))),
            Some("haldi masala".to_string())
        );
        assert_eq!(to_text_or_none(Some(&json!("   "))), None);
        assert_eq!(to_text_or_none(Some(&json!(42))), None);
        assert_eq!(to_text_or_none(Some(&Value::Null)), None);
        assert_eq!(to_text_or_none(None), None);
    }

    #[test]
    fn wrong_typed_fields_degrade_to_defaults() {
        let normalized = normalize_record(&json!({"units": "abc", "revenue": null}));
        assert_eq!(
            normalized,
            LedgerEntryCandidate {
                product: None,
                units: 0,
                revenue: 0.0,
                credit: false,
                creditor: None,
            }
        );
    }

    #[test]
    fn non_object_records_become_all_defaults() {
        let normalized = normalize_record(&json!("1000 rs ramesh"));
        assert_eq!(normalized.revenue, 0.0);
        assert_eq!(normalized.units, 0);
        assert_eq!(normalized.product, None);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let normalized = normalize_record(&json!({
            "product": "1 kg garam masala",
            "units": 1,
            "revenue": 250,
            "credit": false,
            "creditor": null,
            "confidence": 0.9,
        }));
        assert_eq!(normalized.product.as_deref(), Some("1 kg garam masala"));
        assert_eq!(normalized.units, 1);
        assert_eq!(normalized.revenue, 250.0);
    }

    #[test]
    fn normalizing_a_canonical_entry_is_identity() {
        let entries = [
            LedgerEntryCandidate {
                product: Some("500 gm haldi masala".to_string()),
                units: 1,
                revenue: 250.0,
                credit: true,
                creditor: Some("Suresh".to_string()),
            },
            LedgerEntryCandidate {
                product: None,
                units: 0,
                revenue: -1250.5,
                credit: false,
                creditor: None,
            },
        ];

        for entry in entries {
            let record = serde_json::to_value(&entry);
            assert!(record.is_ok());
            if let Ok(value) = record {
                assert_eq!(normalize_record(&value), entry);
            }
        }
    }
}
