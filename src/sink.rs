use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::errors::{StatementParseError, StatementResult};
use crate::types::TransactionRecord;

/// Writes the consolidated records as one indented JSON array.
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
    indent: usize,
    ensure_ascii: bool,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            indent: 4,
            ensure_ascii: true,
        }
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Escape every non-ASCII character as `\uXXXX`.
    pub fn ensure_ascii(mut self, ensure_ascii: bool) -> Self {
        self.ensure_ascii = ensure_ascii;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn render(&self, records: &[TransactionRecord]) -> StatementResult<String> {
        let indent = " ".repeat(self.indent);
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
        records.serialize(&mut serializer)?;

        let json = String::from_utf8_lossy(&buffer).into_owned();

        Ok(if self.ensure_ascii {
            escape_non_ascii(&json)
        } else {
            json
        })
    }

    /// Renders everything first, then replaces the target in one rename.
    pub fn write(&self, records: &[TransactionRecord]) -> StatementResult<()> {
        let json = self.render(records)?;
        let write_failed = |source| StatementParseError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        fs::write(&staging, json.as_bytes()).map_err(write_failed)?;
        fs::rename(&staging, &self.path).map_err(|source| {
            let _ = fs::remove_file(&staging);
            write_failed(source)
        })?;

        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            "Wrote consolidated statement"
        );
        Ok(())
    }
}

/// Non-ASCII characters only ever occur inside JSON strings, so the whole
/// document can be escaped in one pass. Characters outside the BMP become
/// UTF-16 surrogate pairs.
fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    let mut units = [0u16; 2];

    for ch in json.chars() {
        if ch.is_ascii() {
            escaped.push(ch);
            continue;
        }
        for unit in ch.encode_utf16(&mut units) {
            let _ = write!(escaped, "\\u{unit:04x}");
        }
    }

    escaped
}
