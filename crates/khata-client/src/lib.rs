pub mod commands;
pub mod completion;
pub mod contracts;
mod entries;
pub mod error;
mod input;
pub mod invoice;
pub mod message;
pub mod migrations;
pub mod setup;
pub mod state;

pub use completion::{Completer, CompletionError, CompletionRequest};
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use contracts::types::LedgerEntryCandidate;
pub use error::{ClientError, ClientResult, ParseErrorKind};
pub use message::parse_message;

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
