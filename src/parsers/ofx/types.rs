use crate::errors::StatementParseError;

/// Raw OFX date text such as `20251226`, `20251226120000` or
/// `20251226120000[-3:BRT]`.
///
/// Only the first eight characters are used; they are sliced positionally
/// into year, month and day without validating the calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfxDate(String);

impl OfxDate {
    /// Reformats to `YYYY-MM-DD`.
    pub fn to_iso(&self) -> Result<String, StatementParseError> {
        let head: Vec<char> = self.0.chars().take(8).collect();
        if head.len() < 8 {
            return Err(StatementParseError::OfxDateInvalidFormat {
                value: self.0.clone(),
            });
        }

        let year: String = head[0..4].iter().collect();
        let month: String = head[4..6].iter().collect();
        let day: String = head[6..8].iter().collect();
        Ok(format!("{year}-{month}-{day}"))
    }
}

impl From<&str> for OfxDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
