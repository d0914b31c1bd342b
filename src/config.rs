use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::discovery::FileFilter;
use crate::sink::JsonSink;

pub const DEFAULT_CARD_DIR: &str = "../../dados/cartao/";
pub const DEFAULT_OUTPUT: &str = "../../dados/tudo.json";
pub const DEFAULT_PATTERNS: &[&str] = &["19", "20"];
pub const DEFAULT_INDENT: usize = 4;

/// Where statements are read from and where the consolidated document goes.
///
/// The default reproduces the fixed layout: card statements only, filtered by
/// names containing `19` or `20`, written to `../../dados/tudo.json`. Account
/// statements (`../../dados/conta/`) are read only when listed as a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidateConfig {
    /// Source directories, processed in this order.
    pub sources: Vec<PathBuf>,
    /// File-name substrings; a file is ingested when its name contains any.
    pub patterns: Vec<String>,
    pub output: PathBuf,
    pub indent: usize,
    pub ensure_ascii: bool,
}

impl Default for ConsolidateConfig {
    fn default() -> Self {
        Self {
            sources: vec![DEFAULT_CARD_DIR.into()],
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            output: DEFAULT_OUTPUT.into(),
            indent: DEFAULT_INDENT,
            ensure_ascii: true,
        }
    }
}

impl ConsolidateConfig {
    pub fn filter(&self) -> FileFilter {
        FileFilter::new(self.patterns.iter().cloned())
    }

    pub fn sink(&self) -> JsonSink {
        JsonSink::new(&self.output)
            .indent(self.indent)
            .ensure_ascii(self.ensure_ascii)
    }
}
