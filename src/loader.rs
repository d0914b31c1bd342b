use std::fs;
use std::path::Path;

use crate::errors::StatementResult;
use crate::parsers::prelude::*;
use crate::types::TransactionRecord;

/// Reads one statement file and extracts its transactions in document order.
///
/// The file content and the parsed document live only for the duration of the
/// call. Errors carry the offending path.
pub fn load(path: impl AsRef<Path>) -> StatementResult<Vec<TransactionRecord>> {
    let path = path.as_ref();

    fs::read_to_string(path)
        .map_err(Into::into)
        .and_then(|content| {
            let name = path.file_name().map(|name| name.to_string_lossy());
            if !OfxParser::is_supported(name.as_deref(), &content) {
                tracing::warn!(file = %path.display(), "File does not look like an OFX statement");
            }
            OfxParser::parse(&content)
        })
        .map_err(|err| err.in_file(path))
        .inspect(|records| {
            tracing::debug!(
                file = %path.display(),
                transactions = records.len(),
                "Loaded statement"
            );
        })
}
