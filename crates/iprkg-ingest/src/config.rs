// InterPro Configuration
//
// Environment-based configuration for InterPro graph ingestion

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://ftp.ebi.ac.uk/pub/databases/interpro/current_release/";

/// NCBI taxonomy id for Homo sapiens
pub const HUMAN_TAXON_ID: u32 = 9606;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterProConfig {
    /// Release directory the source files are fetched from (trailing slash)
    pub base_url: String,

    /// Local mirror of the release files; also holds the protein cache
    pub data_dir: PathBuf,

    /// Where nodes.jsonl and relations.jsonl are written
    pub output_dir: PathBuf,

    /// TSV table backing the protein oracle (accession, taxon_id, hgnc_id)
    pub protein_mapping: PathBuf,

    /// Organism the protein matches are reduced to
    pub taxon_id: u32,

    /// Short organism name used in the cache file name
    pub organism_label: String,

    /// Re-download sources and rebuild the protein cache
    pub force: bool,

    pub http_timeout_secs: u64,
}

impl Default for InterProConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from("./data/interpro"),
            output_dir: PathBuf::from("./output/interpro"),
            protein_mapping: PathBuf::from("./data/uniprot/uniprot_hgnc.tsv"),
            taxon_id: HUMAN_TAXON_ID,
            organism_label: "human".to_string(),
            force: false,
            http_timeout_secs: 3600,
        }
    }
}

impl InterProConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - INGEST_INTERPRO_BASE_URL
    /// - INGEST_INTERPRO_DATA_DIR
    /// - INGEST_INTERPRO_OUTPUT_DIR
    /// - INGEST_INTERPRO_PROTEIN_MAPPING
    /// - INGEST_INTERPRO_TAXON_ID
    /// - INGEST_INTERPRO_ORGANISM_LABEL
    /// - INGEST_INTERPRO_FORCE
    /// - INGEST_INTERPRO_HTTP_TIMEOUT_SECS
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: env::var("INGEST_INTERPRO_BASE_URL").unwrap_or(defaults.base_url),

            data_dir: env::var("INGEST_INTERPRO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),

            output_dir: env::var("INGEST_INTERPRO_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),

            protein_mapping: env::var("INGEST_INTERPRO_PROTEIN_MAPPING")
                .map(PathBuf::from)
                .unwrap_or(defaults.protein_mapping),

            taxon_id: env::var("INGEST_INTERPRO_TAXON_ID")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.taxon_id),

            organism_label: env::var("INGEST_INTERPRO_ORGANISM_LABEL")
                .unwrap_or(defaults.organism_label),

            force: env::var("INGEST_INTERPRO_FORCE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.force),

            http_timeout_secs: env::var("INGEST_INTERPRO_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),
        }
    }

    /// Location of the reduced protein2ipr cache for the configured organism
    pub fn protein_cache_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("protein2ipr_{}.tsv", self.organism_label))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Base URL cannot be empty".to_string());
        }

        if !self.base_url.ends_with('/') {
            return Err(format!("Base URL must end with '/': {}", self.base_url));
        }

        if self.organism_label.is_empty()
            || !self
                .organism_label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(format!("Invalid organism label: '{}'", self.organism_label));
        }

        if self.taxon_id == 0 {
            return Err("Taxon id must be greater than 0".to_string());
        }

        if self.http_timeout_secs == 0 {
            return Err("HTTP timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
