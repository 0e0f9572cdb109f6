use clap::{Args, Parser, Subcommand};

/// Extended help shown after `khata entry add --help`.
pub const ENTRY_ADD_AFTER_HELP: &str = "\
Accepted formats:
  JSON - an array of entry objects, or an object with an `items` array
         (the shape `khata parse --json` prints)
  CSV  - one header row using the field names below

  <path> is a local file path. Use `-` (or omit it) to read stdin.
  Example: khata parse \"ramesh paid 1000\" --json | khata entry add 9876543210 -

Fields:
  product   text or empty (null for repayments)
  units     whole number, defaults to 0
  revenue   required; positive = money in, negative = money out
            fractions are dropped, rows whose revenue is 0 are skipped
  credit    true when sold on credit or still payable
            (CSV accepts 1/0, true/false, yes/no)
  creditor  customer or vendor name, optional
  date      RFC 3339 timestamp, defaults to now

CSV example:
  product,units,revenue,credit,creditor
  500 gm haldi masala,1,250,true,Suresh
  rent,0,-5000,false,
";

/// Extended help shown after `khata invoice --help`.
pub const INVOICE_AFTER_HELP: &str = "\
Request format (JSON):
  {
    \"customer\": {\"name\": \"Ramesh\"},
    \"items\": [
      {\"description\": \"Haldi masala 500 gm\", \"price\": 250, \"gstPercent\": 5}
    ],
    \"paymentTerms\": \"Pay within 15 days\",
    \"business\": {\"store_name\": \"Sharma General Store\"}
  }

  `business` is optional. Missing store details come from the
  `--mobile` user's settings, then default to `My Shop`.
  Amounts round half-up to 2 decimal places.
";

#[derive(Debug, Parser)]
#[command(
    name = "khata",
    version,
    about = "shop ledger from free-text messages",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register shop users and manage store settings
    #[command(arg_required_else_help = true)]
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// List, add, and clear ledger entries
    #[command(arg_required_else_help = true)]
    Entry {
        #[command(subcommand)]
        command: EntryCommand,
    },
    /// Turn a transaction message into ledger entries
    Parse {
        /// Message text, e.g. `ramesh paid 1000`
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
        /// Store the parsed entries for this mobile
        #[arg(long, value_name = "MOBILE")]
        save: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Compute an invoice from a JSON request
    #[command(after_long_help = INVOICE_AFTER_HELP)]
    Invoice {
        /// Request file, or `-` for stdin
        path: Option<String>,
        /// Fill missing store details from this user's settings
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum UserCommand {
    /// Create a user, or replace its name
    Register {
        mobile: String,
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Show a user and its store settings
    Show {
        mobile: String,
        #[arg(long)]
        json: bool,
    },
    /// Show store settings, or update the ones given as flags
    Settings {
        mobile: String,
        #[command(flatten)]
        store: StoreArgs,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct StoreArgs {
    #[arg(long)]
    pub store_name: Option<String>,
    #[arg(long)]
    pub store_address: Option<String>,
    #[arg(long)]
    pub store_gst: Option<String>,
    #[arg(long)]
    pub store_contact: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum EntryCommand {
    /// List entries, newest first
    List {
        mobile: String,
        #[arg(long)]
        json: bool,
    },
    /// Add entries from a JSON or CSV file
    #[command(after_long_help = ENTRY_ADD_AFTER_HELP)]
    Add {
        mobile: String,
        /// Entries file, or `-` for stdin
        path: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Delete every entry for a mobile
    Clear {
        mobile: String,
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
