pub(crate) mod common;
pub mod entries;
pub mod invoice;
pub mod parse;
pub mod user;
