use serde_json::Value;

use crate::{ClientError, ClientResult};

/// Pulls the `items` list out of a completion that should be a JSON object.
///
/// The whole text is tried first, then each top-level balanced `{...}` span
/// in order, so prose before or after the object is tolerated.
pub fn extract_items(raw: &str) -> ClientResult<Vec<Value>> {
    let parsed = match serde_json::from_str::<Value>(raw.trim()) {
        Ok(value) => value,
        Err(_) => embedded_json_object(raw)
            .ok_or_else(|| ClientError::malformed_fallback_response(raw))?,
    };

    let Some(object) = parsed.as_object() else {
        return Err(ClientError::invalid_fallback_shape(
            "the response is JSON but not an object",
        ));
    };

    match object.get("items") {
        Some(Value::Array(items)) if items.is_empty() => {
            Err(ClientError::no_fallback_entries())
        }
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(_) => Err(ClientError::invalid_fallback_shape("`items` is not a list")),
        None => Err(ClientError::invalid_fallback_shape("`items` is missing")),
    }
}

/// Braces nested inside a span are never tried on their own, and an
/// unterminated span ends the search.
fn embedded_json_object(raw: &str) -> Option<Value> {
    let mut cursor = 0;
    while let Some(offset) = raw[cursor..].find('{') {
        let start = cursor + offset;
        let candidate = balanced_object_at(raw, start)?;
        if let Ok(value) = serde_json::from_str::<Value>(candidate)
            && value.is_object()
        {
            return Some(value);
        }
        cursor = start + candidate.len();
    }
    None
}

/// Returns the brace-balanced span starting at `start`, skipping braces that
/// appear inside JSON strings.
fn balanced_object_at(input: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (offset, character) in input[start..].char_indices() {
        if escape {
            escape = false;
            continue;
        }
        match character {
            '\\' if in_string => escape = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&input[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{balanced_object_at, extract_items};
    use crate::error::ParseErrorKind;

    fn kind_of(raw: &str) -> Option<ParseErrorKind> {
        extract_items(raw).err().and_then(|error| error.parse_kind())
    }

    #[test]
    fn parses_a_bare_object() {
        let items = extract_items(r#"{"items":[{"product":"maggi","units":2,"revenue":24}]}"#);
        assert!(items.is_ok());
        if let Ok(values) = items {
            assert_eq!(values.len(), 1);
            assert_eq!(values[0]["product"], json!("maggi"));
        }
    }

    #[test]
    fn recovers_an_object_wrapped_in_prose() {
        let raw = "Here you go: {\"items\":[{\"revenue\":1000,\"creditor\":\"Ramesh\"}]} Hope that helps!";
        let items = extract_items(raw);
        assert!(items.is_ok());
        if let Ok(values) = items {
            assert_eq!(values[0]["creditor"], json!("Ramesh"));
        }
    }

    #[test]
    fn recovers_an_object_inside_a_code_fence() {
        let raw = "```json\n{\"items\": [{\"revenue\": -1250, \"product\": \"rent {may}\"}]}\n```";
        let items = extract_items(raw);
        assert!(items.is_ok());
        if let Ok(values) = items {
            assert_eq!(values[0]["product"], json!("rent {may}"));
        }
    }

    #[test]
    fn skips_a_leading_span_that_is_not_json() {
        let raw = "Using {placeholders} then {\"items\":[{\"revenue\":5}]}";
        let items = extract_items(raw);
        assert!(items.is_ok());
    }

    #[test]
    fn text_without_an_object_is_malformed() {
        assert_eq!(
            kind_of("I cannot help with that."),
            Some(ParseErrorKind::MalformedFallbackResponse)
        );
        assert_eq!(
            kind_of("{\"items\": [ unterminated"),
            Some(ParseErrorKind::MalformedFallbackResponse)
        );
    }

    #[test]
    fn reply_cut_off_mid_item_is_malformed() {
        let raw = r#"{"items":[{"product":"maggi","units":2,"revenue":24},{"product":"colg"#;
        assert_eq!(kind_of(raw), Some(ParseErrorKind::MalformedFallbackResponse));
    }

    #[test]
    fn trailing_comma_is_malformed() {
        assert_eq!(
            kind_of(r#"{"items":[{"revenue":5},]}"#),
            Some(ParseErrorKind::MalformedFallbackResponse)
        );
    }

    #[test]
    fn items_nested_inside_a_broken_wrapper_are_not_used() {
        assert_eq!(
            kind_of(r#"Result: {"data": {"items":[{"revenue":7}]}, broken}"#),
            Some(ParseErrorKind::MalformedFallbackResponse)
        );
    }

    #[test]
    fn empty_items_list_says_nothing_was_parsed() {
        let error = extract_items(r#"{"items": []}"#).err();
        assert_eq!(
            error.as_ref().and_then(|value| value.parse_kind()),
            Some(ParseErrorKind::InvalidFallbackShape)
        );
        assert!(error.is_some_and(|value| value.message.contains("no entries parsed")));
    }

    #[test]
    fn objects_without_an_items_list_have_invalid_shape() {
        for raw in [
            r#"{"entries": []}"#,
            r#"{"items": {"revenue": 10}}"#,
            r#"{"items": []}"#,
            r#"[{"revenue": 10}]"#,
            r#"Sure: {"result": "ok"}"#,
        ] {
            assert_eq!(
                kind_of(raw),
                Some(ParseErrorKind::InvalidFallbackShape),
                "{raw}"
            );
        }
    }

    #[test]
    fn balanced_span_ignores_escaped_quotes() {
        let input = r#"{"a": "say \"}\" ok"} tail"#;
        assert_eq!(balanced_object_at(input, 0), Some(r#"{"a": "say \"}\" ok"}"#));
    }
}
