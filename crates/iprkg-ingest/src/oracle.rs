//! Protein identifier oracle
//!
//! Answers two questions about a UniProt accession: which HGNC gene it
//! belongs to, and whether it comes from the organism being ingested.
//! Translation is partial. Most TrEMBL accessions have no gene, which is
//! reported as [`GeneLookup::NotFound`] rather than an error.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid protein mapping table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid HGNC id '{value}' at line {line}")]
    InvalidGeneId { line: usize, value: String },
}

/// Numeric HGNC gene identifier
///
/// Ordering is numeric, so `2 < 10 < 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeneId(u32);

impl GeneId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GeneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GeneId {
    type Err = std::num::ParseIntError;

    /// Accepts both `HGNC:5` and `5`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix("HGNC:").unwrap_or(s);
        digits.parse().map(GeneId)
    }
}

/// Result of translating a protein accession to a gene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneLookup {
    Found(GeneId),
    NotFound,
}

pub trait ProteinOracle {
    fn gene_for_protein(&self, accession: &str) -> GeneLookup;

    fn is_target_organism(&self, accession: &str) -> bool;
}

// ============================================================================
// Mapping table oracle
// ============================================================================

#[derive(Debug, Deserialize)]
struct MappingRow {
    accession: String,
    taxon_id: u32,
    hgnc_id: Option<String>,
}

/// Oracle backed by a tab-separated table with the header
/// `accession  taxon_id  hgnc_id`. The gene column may be empty.
#[derive(Debug, Clone, Default)]
pub struct MappingTableOracle {
    target_taxon: u32,
    taxa: HashMap<String, u32>,
    genes: HashMap<String, GeneId>,
}

impl MappingTableOracle {
    pub fn from_path(path: impl AsRef<Path>, target_taxon: u32) -> Result<Self, OracleError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let oracle = Self::from_reader(file, target_taxon)?;
        info!(
            path = %path.display(),
            proteins = oracle.taxa.len(),
            genes = oracle.genes.len(),
            "Loaded protein mapping table"
        );
        Ok(oracle)
    }

    pub fn from_reader<R: Read>(reader: R, target_taxon: u32) -> Result<Self, OracleError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .has_headers(true)
            .from_reader(reader);

        let mut oracle = Self {
            target_taxon,
            ..Self::default()
        };

        for (index, row) in rdr.deserialize::<MappingRow>().enumerate() {
            let row = row?;
            if let Some(hgnc) = row.hgnc_id.as_deref().filter(|s| !s.trim().is_empty()) {
                let gene = hgnc.parse().map_err(|_| OracleError::InvalidGeneId {
                    line: index + 2,
                    value: hgnc.to_string(),
                })?;
                oracle.genes.insert(row.accession.clone(), gene);
            }
            oracle.taxa.insert(row.accession, row.taxon_id);
        }

        Ok(oracle)
    }
}

impl ProteinOracle for MappingTableOracle {
    fn gene_for_protein(&self, accession: &str) -> GeneLookup {
        match self.genes.get(accession) {
            Some(gene) => GeneLookup::Found(*gene),
            None => GeneLookup::NotFound,
        }
    }

    fn is_target_organism(&self, accession: &str) -> bool {
        self.taxa.get(accession) == Some(&self.target_taxon)
    }
}
