mod document;
mod extract;
mod parser;
mod types;

pub mod prelude {
    pub use super::document::{OfxDocument, OfxElement};
    pub use super::extract::{convert, extract_transaction};
    pub use super::parser::{OfxParser, reference_date};
    pub use super::types::OfxDate;
}
