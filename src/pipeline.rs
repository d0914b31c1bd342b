use std::path::PathBuf;

use crate::config::ConsolidateConfig;
use crate::discovery::discover;
use crate::errors::StatementResult;
use crate::loader::load;
use crate::types::TransactionRecord;

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub records: usize,
    pub output: PathBuf,
}

/// Records of every ingested file, concatenated in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Consolidation {
    pub records: Vec<TransactionRecord>,
    pub files: usize,
}

/// Loads every discovered statement, in source order then file-name order,
/// into one sequence. The first failing file aborts the run.
pub fn consolidate(config: &ConsolidateConfig) -> StatementResult<Consolidation> {
    let filter = config.filter();
    let mut consolidation = Consolidation::default();

    for source in &config.sources {
        for path in discover(source, &filter)? {
            consolidation.records.extend(load(&path)?);
            consolidation.files += 1;
        }
    }

    Ok(consolidation)
}

/// Consolidates and writes the output document. Nothing is written unless
/// every file was loaded.
pub fn run(config: &ConsolidateConfig) -> StatementResult<RunSummary> {
    let Consolidation { records, files } = consolidate(config)?;
    let sink = config.sink();
    sink.write(&records)?;

    let summary = RunSummary {
        files,
        records: records.len(),
        output: sink.path().to_path_buf(),
    };
    tracing::info!(
        files = summary.files,
        records = summary.records,
        output = %summary.output.display(),
        "Consolidation finished"
    );
    Ok(summary)
}
