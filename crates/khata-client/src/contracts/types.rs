use serde::{Deserialize, Serialize};

/// One structured ledger line derived from a free-text message.
///
/// `revenue` is signed: positive is money in (sale, customer repayment),
/// negative is money out (expense). `credit` reads as "sold on credit" for
/// sales and "payable" for expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntryCandidate {
    pub product: Option<String>,
    pub units: u64,
    pub revenue: f64,
    pub credit: bool,
    pub creditor: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsePath {
    CustomerRepayment,
    VendorRepayment,
    Fallback,
}

impl ParsePath {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CustomerRepayment => "customer_repayment",
            Self::VendorRepayment => "vendor_repayment",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseData {
    pub message: String,
    pub path: ParsePath,
    pub items: Vec<LedgerEntryCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<EntriesAddSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreSettings {
    pub store_name: Option<String>,
    pub store_address: Option<String>,
    pub store_gst: Option<String>,
    pub store_contact: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserData {
    pub mobile: String,
    pub name: String,
    #[serde(flatten)]
    pub settings: StoreSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub mobile: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsData {
    pub mobile: String,
    pub updated: Vec<String>,
    pub settings: StoreSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryRow {
    pub id: i64,
    pub product: Option<String>,
    pub units: i64,
    pub revenue: i64,
    pub credit: bool,
    pub creditor: Option<String>,
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntriesSummary {
    pub entry_count: i64,
    pub inflow_total: i64,
    pub outflow_total: i64,
    pub net_total: i64,
    pub latest_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntriesListData {
    pub mobile: String,
    pub summary: EntriesSummary,
    pub rows: Vec<EntryRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EntriesAddSummary {
    pub rows_read: i64,
    pub inserted: i64,
    pub skipped_zero_revenue: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntriesAddData {
    pub mobile: String,
    pub source_used: String,
    pub summary: EntriesAddSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntriesClearData {
    pub mobile: String,
    pub deleted: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceBusiness {
    pub store_name: String,
    pub store_address: String,
    pub store_gst: String,
    pub store_contact: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLine {
    pub index: usize,
    pub description: String,
    pub price: String,
    pub gst_percent: String,
    pub gst_amount: String,
    pub line_total: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: String,
    pub gst_total: String,
    pub grand_total: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceData {
    pub invoice_no: String,
    pub date: String,
    pub currency_label: String,
    pub business: InvoiceBusiness,
    pub customer: String,
    pub lines: Vec<InvoiceLine>,
    pub totals: InvoiceTotals,
    pub payment_terms: Option<String>,
}
