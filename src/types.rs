use serde::{Deserialize, Serialize};

/// The `valor` of a record.
///
/// Statements without a currency rate keep the amount exactly as written in the
/// file; converted amounts are numbers rounded to two decimal places. The two
/// cases serialize differently (JSON string vs JSON number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Raw(String),
    Converted(f64),
}

/// One extracted transaction, as written to the consolidated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Posted date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "valor")]
    pub amount: Option<Amount>,
    /// As-of date of the statement the record came from.
    #[serde(rename = "referencia")]
    pub reference: Option<String>,
}
