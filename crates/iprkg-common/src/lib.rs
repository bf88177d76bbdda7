//! IPRKG Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types and utilities for the IPRKG workspace.
//!
//! # Overview
//!
//! - **Graph records**: the node and relation records emitted by every ingest
//! - **Logging**: `tracing` subscriber setup shared by the binaries
//! - **Checksums**: digests of cache artifacts
//! - **Error Handling**: common error and result types
//!
//! # Example
//!
//! ```no_run
//! use iprkg_common::checksum::sha256_file;
//!
//! fn main() -> iprkg_common::Result<()> {
//!     let digest = sha256_file("cache/protein2ipr_human.tsv")?;
//!     println!("cache digest: {}", digest);
//!     Ok(())
//! }
//! ```

pub mod checksum;
pub mod error;
pub mod graph;
pub mod logging;

// Re-export commonly used types
pub use error::{CommonError, Result};
pub use graph::{GraphNode, GraphRelation, Namespace, RelationKind};
