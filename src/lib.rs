//! Extract transactions from OFX statement files and consolidate them into a
//! single JSON document.
//!
//! ```rust,ignore
//! use ofx_consolidate::{ConsolidateConfig, run};
//!
//! let summary = run(&ConsolidateConfig::default())?;
//! println!("{} records from {} files", summary.records, summary.files);
//! ```

mod types;

pub mod config;
pub mod discovery;
pub mod errors;
pub mod loader;
pub mod parsers;
pub mod pipeline;
pub mod sink;

pub use config::ConsolidateConfig;
pub use discovery::{FileFilter, discover};
pub use loader::load;
pub use parsers::prelude::*;
pub use pipeline::{Consolidation, RunSummary, consolidate, run};
pub use sink::JsonSink;
pub use types::{Amount, TransactionRecord};
