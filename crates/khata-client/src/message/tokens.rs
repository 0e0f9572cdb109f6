/// Lowercases the message and splits it on whitespace, keeping order.
///
/// Punctuation, currency symbols and unit suffixes stay attached to their
/// tokens; the matcher rules decide what they mean.
pub fn tokenize(message: &str) -> Vec<String> {
    message.split_whitespace().map(str::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    #[test]
    fn lowercases_and_splits_on_any_whitespace() {
        assert_eq!(
            tokenize("  Ramesh\tPAID \n 1000 "),
            vec!["ramesh", "paid", "1000"]
        );
    }

    #[test]
    fn keeps_punctuation_attached() {
        assert_eq!(tokenize("₹250, Suresh."), vec!["₹250,", "suresh."]);
    }

    #[test]
    fn blank_message_has_no_tokens() {
        assert!(tokenize("   ").is_empty());
    }
}
