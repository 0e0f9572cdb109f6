//! Invoice totals for a customer bill.
//!
//! Amounts are exact decimals; every figure shown is rounded half-up to two
//! places, while totals accumulate the unrounded values.

use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, Local};
use serde_json::Value;

use crate::contracts::types::{
    InvoiceBusiness, InvoiceData, InvoiceLine, InvoiceTotals, StoreSettings,
};
use crate::{ClientError, ClientResult};

pub const CURRENCY_LABEL: &str = "Rs.";
pub const DEFAULT_STORE_NAME: &str = "My Shop";

pub fn compute_invoice(
    request: &Value,
    stored: Option<&StoreSettings>,
    now: DateTime<Local>,
) -> ClientResult<InvoiceData> {
    let Some(object) = request.as_object() else {
        return Err(ClientError::invalid_invoice(
            "Invoice request must be a JSON object.",
        ));
    };

    let customer = object
        .get("customer")
        .and_then(|customer| customer.get("name"))
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if customer.is_empty() {
        return Err(ClientError::invalid_invoice("Customer name required."));
    }

    let items = match object.get("items") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            return Err(ClientError::invalid_invoice("At least one item required."));
        }
    };

    let hundred = BigDecimal::from(100);
    let mut subtotal = BigDecimal::from(0);
    let mut gst_total = BigDecimal::from(0);
    let mut lines = Vec::with_capacity(items.len());

    for (offset, item) in items.iter().enumerate() {
        let index = offset + 1;
        let description = item
            .get("description")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or("-")
            .to_string();
        let price = decimal_field(item, "price", index)?;
        let gst_percent = decimal_field(item, "gstPercent", index)?;
        let gst_amount = &price * &gst_percent / &hundred;
        let line_total = &price + &gst_amount;

        subtotal += &price;
        gst_total += &gst_amount;

        lines.push(InvoiceLine {
            index,
            description,
            price: money(&price),
            gst_percent: money(&gst_percent),
            gst_amount: money(&gst_amount),
            line_total: money(&line_total),
        });
    }

    let grand_total = &subtotal + &gst_total;
    let payment_terms = object
        .get("paymentTerms")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|terms| !terms.is_empty())
        .map(str::to_string);

    Ok(InvoiceData {
        invoice_no: now.format("INV%Y%m%d-%H%M%S").to_string(),
        date: now.format("%Y-%m-%d").to_string(),
        currency_label: CURRENCY_LABEL.to_string(),
        business: resolve_business(object.get("business"), stored),
        customer,
        lines,
        totals: InvoiceTotals {
            subtotal: money(&subtotal),
            gst_total: money(&gst_total),
            grand_total: money(&grand_total),
        },
        payment_terms,
    })
}

/// Request fields win, then the stored settings, then the shop defaults.
pub fn resolve_business(payload: Option<&Value>, stored: Option<&StoreSettings>) -> InvoiceBusiness {
    let pick = |key: &str, stored_value: Option<&String>, default: &str| {
        payload
            .and_then(|business| business.get(key))
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .or_else(|| stored_value.filter(|text| !text.is_empty()).cloned())
            .unwrap_or_else(|| default.to_string())
    };

    InvoiceBusiness {
        store_name: pick(
            "store_name",
            stored.and_then(|settings| settings.store_name.as_ref()),
            DEFAULT_STORE_NAME,
        ),
        store_address: pick(
            "store_address",
            stored.and_then(|settings| settings.store_address.as_ref()),
            "",
        ),
        store_gst: pick(
            "store_gst",
            stored.and_then(|settings| settings.store_gst.as_ref()),
            "",
        ),
        store_contact: pick(
            "store_contact",
            stored.and_then(|settings| settings.store_contact.as_ref()),
            "",
        ),
    }
}

pub fn money(value: &BigDecimal) -> String {
    value.with_scale_round(2, RoundingMode::HalfUp).to_string()
}

/// Missing, null, false, zero and empty-string fields count as 0.
fn decimal_field(item: &Value, key: &str, index: usize) -> ClientResult<BigDecimal> {
    let text = match item.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return Ok(BigDecimal::from(0)),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(BigDecimal::from(0)),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(_) => {
            return Err(ClientError::invalid_invoice(&format!(
                "Item {index} has a non-numeric `{key}`."
            )));
        }
    };

    BigDecimal::from_str(&text).map_err(|_| {
        ClientError::invalid_invoice(&format!(
            "Item {index} has a non-numeric `{key}`: `{text}`."
        ))
    })
}
