//! What a generation run did

use fsmgen_artifact::Identifier;
use serde::Serialize;
use std::path::PathBuf;

/// How the construction method was brought up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodAction {
    /// Existing body replaced
    Rebuilt,
    /// Method was missing and got inserted before the class end
    Inserted,
}

/// What happened to the aggregator file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AggregatorOutcome {
    /// File did not exist and was rendered fresh
    Created,
    /// Existing file was merged
    Merged {
        /// Declarations appended, in spec order
        declarations_added: Vec<Identifier>,
        /// Method handling
        method: MethodAction,
    },
}

/// Summary of one `generate` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Output directory
    pub directory: PathBuf,
    /// Whether the output directory had to be created
    pub directory_created: bool,
    /// Entity files written by this call
    pub entities_written: Vec<PathBuf>,
    /// Entity files left alone because they already existed
    pub entities_skipped: Vec<PathBuf>,
    /// Aggregator file
    pub aggregator_path: PathBuf,
    /// What happened to it
    pub aggregator: AggregatorOutcome,
}

impl GenerationReport {
    /// Total number of files written or rewritten
    #[must_use]
    pub fn files_written(&self) -> usize {
        self.entities_written.len() + 1
    }
}
