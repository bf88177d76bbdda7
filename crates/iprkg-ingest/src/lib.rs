//! IPRKG Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Converts InterPro release files into a knowledge-graph fragment of typed
//! nodes and relations.
//!
//! # Inputs
//!
//! - **entry.list** / **short_names.dat**: the entry catalog
//! - **ParentChildTreeFile.txt**: the entry hierarchy
//! - **protein2ipr.dat.gz**: protein matches, reduced to one organism and cached
//! - **interpro2go**: InterPro to GO term mappings
//!
//! Retrieval of raw files sits behind [`fetch::Fetcher`] and protein
//! identifier translation behind [`oracle::ProteinOracle`].
//!
//! # Example
//!
//! ```no_run
//! use iprkg_ingest::config::InterProConfig;
//! use iprkg_ingest::fetch::LocalMirror;
//! use iprkg_ingest::interpro::InterProProcessor;
//! use iprkg_ingest::oracle::MappingTableOracle;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = InterProConfig::from_env();
//!     let fetcher = LocalMirror::new(&config.data_dir);
//!     let oracle = MappingTableOracle::from_path(&config.protein_mapping, config.taxon_id)?;
//!
//!     let processor = InterProProcessor::load(&fetcher, &oracle, &config)?;
//!     for node in processor.nodes() {
//!         println!("{}", node.curie());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod fetch;
pub mod interpro;
pub mod oracle;
