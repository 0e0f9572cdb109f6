use serde_json::{Value, json};

use crate::contracts::types::ParsePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaymentRule {
    /// `<name> paid <amount>`: money received from a customer.
    Customer,
    /// `paid <name...> <amount>`: money paid out to a vendor.
    Vendor,
}

impl RepaymentRule {
    pub const fn path(self) -> ParsePath {
        match self {
            Self::Customer => ParsePath::CustomerRepayment,
            Self::Vendor => ParsePath::VendorRepayment,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepaymentMatch {
    pub rule: RepaymentRule,
    pub creditor: String,
    pub amount: f64,
}

impl RepaymentMatch {
    /// Loosely typed record, fed through the same normalizer as fallback items.
    ///
    /// `credit` is false for customer repayments and true for vendor
    /// repayments; both carry a positive revenue.
    pub fn to_record(&self) -> Value {
        json!({
            "product": Value::Null,
            "units": 0,
            "revenue": self.amount,
            "credit": matches!(self.rule, RepaymentRule::Vendor),
            "creditor": self.creditor,
        })
    }
}

type Rule = fn(&[String]) -> Option<RepaymentMatch>;

/// Evaluated in order; the first rule that matches wins.
const RULES: [Rule; 2] = [customer_repayment, vendor_repayment];

pub fn match_repayment(tokens: &[String]) -> Option<RepaymentMatch> {
    RULES.iter().find_map(|rule| rule(tokens))
}

fn customer_repayment(tokens: &[String]) -> Option<RepaymentMatch> {
    if tokens.len() < 3 || tokens[1] != "paid" {
        return None;
    }
    let amount = digits_amount(tokens.last()?)?;

    Some(RepaymentMatch {
        rule: RepaymentRule::Customer,
        creditor: capitalize(&tokens[0]),
        amount,
    })
}

fn vendor_repayment(tokens: &[String]) -> Option<RepaymentMatch> {
    if tokens.first()? != "paid" {
        return None;
    }
    let last = tokens.last()?;
    let amount = digits_amount(last)?;
    let name_tokens: &[String] = if tokens.len() > 2 {
        &tokens[1..tokens.len() - 1]
    } else {
        &[]
    };

    Some(RepaymentMatch {
        rule: RepaymentRule::Vendor,
        creditor: name_tokens
            .iter()
            .map(|token| capitalize(token))
            .collect::<Vec<String>>()
            .join(" "),
        amount,
    })
}

/// Zero code points of the Indic scripts whose digits shop owners type.
const INDIC_DIGIT_ZEROS: [u32; 8] = [
    0x0966, // Devanagari
    0x09E6, // Bengali
    0x0A66, // Gurmukhi
    0x0AE6, // Gujarati
    0x0BE6, // Tamil
    0x0C66, // Telugu
    0x0CE6, // Kannada
    0x0D66, // Malayalam
];

/// Whole-token amount made only of decimal digits, ASCII or Indic.
fn digits_amount(token: &str) -> Option<f64> {
    if token.is_empty() {
        return None;
    }
    let ascii = token
        .chars()
        .map(decimal_digit)
        .collect::<Option<String>>()?;
    ascii.parse::<f64>().ok()
}

fn decimal_digit(character: char) -> Option<char> {
    if character.is_ascii_digit() {
        return Some(character);
    }
    let code = u32::from(character);
    let value = INDIC_DIGIT_ZEROS
        .iter()
        .find_map(|zero| code.checked_sub(*zero).filter(|offset| *offset < 10))?;
    char::from_digit(value, 10)
}

fn capitalize(word: &str) -> String {
    let mut characters = word.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().chain(characters).collect(),
        None => String::new(),
    }
}
