// InterPro Graph Module
//
// Turns an InterPro release into knowledge-graph nodes and relations.
//
// Data Flow:
// 1. Load entry.list + short_names.dat, keep Domain entries
// 2. Parse ParentChildTreeFile.txt into parent -> children
// 3. Reduce protein2ipr.dat.gz to known entries in one organism (cached)
// 4. Parse interpro2go into entry -> GO terms
// 5. Translate proteins to HGNC genes and emit nodes, then relations
//
// Every index is built once per run and only read afterwards.

pub mod entries;
pub mod go;
pub mod models;
pub mod pipeline;
pub mod processor;
pub mod proteins;
pub mod tree;

pub use entries::load_entries;
pub use go::{load_go_index, parse_go_line, parse_interpro2go};
pub use models::{EntryType, InterProEntry};
pub use pipeline::{reduce_proteins, run, PipelineStats};
pub use processor::{InterProProcessor, LoadStats};
pub use proteins::{load_protein_index, ReductionOutcome};
pub use tree::parse_tree;

use crate::fetch::FetchError;
use crate::oracle::OracleError;
use std::collections::{BTreeMap, BTreeSet};

/// InterPro accession, e.g. IPR000001
pub type InterProId = String;
/// GO term id, e.g. GO:0003677
pub type GoId = String;
/// UniProt accession, e.g. P04637
pub type ProteinAccession = String;

/// Parent entry -> children in file order
pub type ParentChildIndex = BTreeMap<InterProId, Vec<InterProId>>;
/// Entry -> proteins of the target organism
pub type ProteinIndex = BTreeMap<InterProId, BTreeSet<ProteinAccession>>;
/// Entry -> mapped GO terms
pub type GoIndex = BTreeMap<InterProId, BTreeSet<GoId>>;
/// Entry -> HGNC genes of its proteins
pub type GeneIndex = BTreeMap<InterProId, BTreeSet<crate::oracle::GeneId>>;

/// Result type for InterPro operations
pub type Result<T> = std::result::Result<T, InterProError>;

#[derive(Debug, thiserror::Error)]
pub enum InterProError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Common(#[from] iprkg_common::CommonError),

    #[error("Parse error in {file} at line {line}: {message}")]
    Parse {
        file: &'static str,
        line: usize,
        message: String,
    },

    #[error("Invalid entry type at line {line}: {value}")]
    InvalidEntryType { line: usize, value: String },

    #[error("Output error: {0}")]
    Output(String),
}

impl InterProError {
    pub(crate) fn parse(file: &'static str, line: usize, message: impl Into<String>) -> Self {
        InterProError::Parse {
            file,
            line,
            message: message.into(),
        }
    }

    /// Map a csv error to a parse error on `file`, keeping the line number
    pub(crate) fn from_csv(file: &'static str, err: csv::Error) -> Self {
        let line = err
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or_default();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => InterProError::Io(io),
            kind => InterProError::parse(file, line, csv_kind_message(&kind)),
        }
    }
}

fn csv_kind_message(kind: &csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} columns, found {}", expected_len, len),
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::Utf8 { err, .. } => err.to_string(),
        other => format!("{:?}", other),
    }
}
