use std::path::Path;

use chrono::Local;
use serde_json::Value;

use crate::commands::common::{open_ledger, require_mobile};
use crate::commands::user::query_user;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::input::resolve_source;
use crate::invoice::compute_invoice;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct InvoiceOptions<'a> {
    pub path: Option<String>,
    /// Supplies store details the request leaves out.
    pub mobile: Option<String>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<String>, mobile: Option<String>) -> ClientResult<SuccessEnvelope> {
    run_with_options(InvoiceOptions {
        path,
        mobile,
        home_override: None,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: InvoiceOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let source = resolve_source(options.path.as_deref(), options.stdin_override, "invoice")?;
    let request = serde_json::from_str::<Value>(&source.content)
        .map_err(|_| ClientError::invalid_invoice("Invoice request is not valid JSON."))?;

    let stored = match options.mobile.as_deref() {
        Some(mobile) => {
            let mobile = require_mobile(mobile, "invoice")?;
            let ledger = open_ledger(options.home_override)?;
            let user = query_user(&ledger.connection, &ledger.db_path, &mobile)?
                .ok_or_else(|| ClientError::user_not_found(&mobile))?;
            Some(user.settings)
        }
        None => None,
    };

    let data = compute_invoice(&request, stored.as_ref(), Local::now())?;
    tracing::debug!(invoice_no = %data.invoice_no, lines = data.lines.len(), "invoice computed");
    success("invoice", data)
}
