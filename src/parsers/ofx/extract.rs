use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::document::{CURRATE, DTPOSTED, MEMO, OfxElement, TRNAMT};
use super::types::OfxDate;
use crate::errors::StatementParseError;
use crate::types::{Amount, TransactionRecord};

/// The four fields read from one `STMTTRN`, as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct StmtTrnRaw<'a> {
    pub(super) dt_posted: Option<&'a str>,
    pub(super) memo: Option<&'a str>,
    pub(super) currate: Option<&'a str>,
    pub(super) trnamt: Option<&'a str>,
}

impl<'a> StmtTrnRaw<'a> {
    pub(super) fn from_element(element: &OfxElement<'a>) -> Self {
        StmtTrnRaw {
            dt_posted: element.first_text(&DTPOSTED),
            memo: element.first_text(&MEMO),
            currate: element.first_text(&CURRATE),
            trnamt: element.first_text(&TRNAMT),
        }
    }

    pub(super) fn into_record(
        self,
        reference: Option<&str>,
    ) -> Result<TransactionRecord, StatementParseError> {
        let date = self
            .dt_posted
            .map(OfxDate::from)
            .ok_or(StatementParseError::MissingPostedDate)?
            .to_iso()?;

        let amount = match self.currate {
            None => self.trnamt.map(|raw| Amount::Raw(raw.to_string())),
            Some(rate) => {
                let amount = self.trnamt.ok_or(StatementParseError::AmountInvalid {
                    field: "trnamt",
                    value: None,
                })?;
                Some(Amount::Converted(convert(amount, rate)?))
            }
        };

        Ok(TransactionRecord {
            date,
            description: self.memo.map(str::to_string),
            amount,
            reference: reference.map(str::to_string),
        })
    }
}

/// Builds the record for one `STMTTRN` element.
///
/// Missing `MEMO`, `TRNAMT` or `CURRATE` become `None`. A missing or short
/// `DTPOSTED` is an error, as is a non-numeric amount or rate when a rate is
/// present.
pub fn extract_transaction(
    element: &OfxElement<'_>,
    reference: Option<&str>,
) -> Result<TransactionRecord, StatementParseError> {
    StmtTrnRaw::from_element(element).into_record(reference)
}

/// Products at or above this magnitude are already whole numbers as `f64` and
/// exceed what `Decimal` can hold.
const EXACT_INTEGER_MAGNITUDE: f64 = 1e28;

/// `round(amount * rate, 2)`, rounding half to even on the exact binary value
/// of the product. A product that rounds to zero keeps its sign.
pub fn convert(amount: &str, rate: &str) -> Result<f64, StatementParseError> {
    let amount = parse_float("trnamt", amount)?;
    let rate = parse_float("currate", rate)?;
    let product = amount * rate;

    if !product.is_finite() {
        return Err(StatementParseError::NonFiniteAmount { amount, rate });
    }
    if product.abs() >= EXACT_INTEGER_MAGNITUDE {
        return Ok(product);
    }

    let rounded = Decimal::from_f64_retain(product)
        .map(|exact| exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(0.0);

    Ok(if rounded == 0.0 {
        0.0f64.copysign(product)
    } else {
        rounded
    })
}

fn parse_float(field: &'static str, text: &str) -> Result<f64, StatementParseError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| StatementParseError::AmountInvalid {
            field,
            value: Some(text.to_string()),
        })
}
