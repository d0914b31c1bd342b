use super::document::{DTASOF, OfxDocument, STMTTRN, looks_like_ofx};
use super::extract::extract_transaction;
use super::types::OfxDate;
use crate::errors::StatementParseError;
use crate::parsers::traits::Parser;
use crate::types::TransactionRecord;

pub struct OfxParser;

impl Parser for OfxParser {
    type Output = TransactionRecord;

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        if let Some(name) = filename {
            let name = name.to_lowercase();
            if name.ends_with(".ofx") || name.ends_with(".qfx") {
                return true;
            }
        }

        looks_like_ofx(content)
    }

    fn parse(content: &str) -> Result<Vec<Self::Output>, StatementParseError> {
        let document = OfxDocument::parse(content)?;
        let reference = reference_date(&document)?;

        let records = document
            .select_all(&STMTTRN)
            .map(|element| extract_transaction(&element, reference.as_deref()))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(
            transactions = records.len(),
            reference = reference.as_deref().unwrap_or("none"),
            "Parsed OFX document"
        );
        Ok(records)
    }
}

/// The statement's as-of date (first `DTASOF`) as `YYYY-MM-DD`, if any.
pub fn reference_date(document: &OfxDocument) -> Result<Option<String>, StatementParseError> {
    document
        .first_text(&DTASOF)
        .map(|raw| OfxDate::from(raw).to_iso())
        .transpose()
}
