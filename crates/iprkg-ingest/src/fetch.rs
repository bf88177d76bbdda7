//! Retrieval of InterPro release files
//!
//! The pipeline never talks to the network directly. It asks a [`Fetcher`] to
//! resolve a [`SourceFile`] to a local path; how the file got there is the
//! fetcher's business.
//!
//! - [`LocalMirror`]: files already staged in a directory (offline runs, tests)
//! - [`HttpFetcher`]: downloads missing files over HTTP(S) into a cache directory

use crate::config::InterProConfig;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::runtime::Handle;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{source_file} is not available at {path}")]
    NotFound {
        source_file: SourceFile,
        path: PathBuf,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to download {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Files of an InterPro release consumed by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFile {
    EntryList,
    ShortNames,
    ParentChildTree,
    Protein2Ipr,
    InterPro2Go,
}

impl SourceFile {
    /// File name inside the release directory
    pub fn file_name(&self) -> &'static str {
        match self {
            SourceFile::EntryList => "entry.list",
            SourceFile::ShortNames => "short_names.dat",
            SourceFile::ParentChildTree => "ParentChildTreeFile.txt",
            SourceFile::Protein2Ipr => "protein2ipr.dat.gz",
            SourceFile::InterPro2Go => "interpro2go",
        }
    }

    /// URL of the file under a release directory ending in '/'
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.file_name())
    }
}

impl std::fmt::Display for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Resolves a release file to a readable local path
pub trait Fetcher {
    /// `force` asks for a fresh copy even when one is already cached
    fn ensure(&self, source: SourceFile, force: bool) -> Result<PathBuf, FetchError>;
}

// ============================================================================
// Local mirror
// ============================================================================

/// A directory that already contains the release files
#[derive(Debug, Clone)]
pub struct LocalMirror {
    root: PathBuf,
}

impl LocalMirror {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Fetcher for LocalMirror {
    fn ensure(&self, source: SourceFile, force: bool) -> Result<PathBuf, FetchError> {
        let path = self.root.join(source.file_name());
        if force {
            debug!(file = %source, "Local mirror cannot refresh, using staged copy");
        }
        if path.is_file() {
            Ok(path)
        } else {
            Err(FetchError::NotFound {
                source_file: source,
                path,
            })
        }
    }
}

// ============================================================================
// HTTP fetcher
// ============================================================================

/// Downloads release files on demand and caches them on disk.
///
/// `ensure` blocks on the runtime behind `handle`, so it must be called from
/// outside async context (e.g. inside `tokio::task::spawn_blocking`).
pub struct HttpFetcher {
    client: reqwest::Client,
    handle: Handle,
    base_url: String,
    cache_dir: PathBuf,
}

impl HttpFetcher {
    pub fn new(
        base_url: impl Into<String>,
        cache_dir: impl Into<PathBuf>,
        timeout: Duration,
        handle: Handle,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("iprkg-ingest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            handle,
            base_url: base_url.into(),
            cache_dir: cache_dir.into(),
        })
    }

    pub fn from_config(config: &InterProConfig, handle: Handle) -> Result<Self, FetchError> {
        Self::new(
            config.base_url.clone(),
            config.data_dir.clone(),
            Duration::from_secs(config.http_timeout_secs),
            handle,
        )
    }
}

impl Fetcher for HttpFetcher {
    fn ensure(&self, source: SourceFile, force: bool) -> Result<PathBuf, FetchError> {
        let path = self.cache_dir.join(source.file_name());
        if path.is_file() && !force {
            debug!(file = %source, path = %path.display(), "Using cached download");
            return Ok(path);
        }

        std::fs::create_dir_all(&self.cache_dir)?;
        let url = source.url(&self.base_url);
        info!(file = %source, url = %url, force, "Downloading");

        let bytes = self
            .handle
            .block_on(download_file(&self.client, &url, &path))?;
        info!(file = %source, bytes, path = %path.display(), "Download complete");

        Ok(path)
    }
}

/// Stream `url` into `output_path` with a progress bar.
///
/// The body lands in a `.part` sibling first and is renamed into place once
/// complete, so an interrupted download never looks cached.
pub async fn download_file(
    client: &reqwest::Client,
    url: &str,
    output_path: &Path,
) -> Result<u64, FetchError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let total_size = response.content_length().unwrap_or(0);
    let file_name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| url.to_string());

    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(format!("Downloading {}", file_name));

    let part_path = output_path.with_extension("part");
    let mut file = tokio::fs::File::create(&part_path).await?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    file.flush().await?;
    drop(file);
    tokio::fs::rename(&part_path, output_path).await?;

    pb.finish_with_message(format!("Downloaded {}", file_name));

    Ok(downloaded)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_names() {
        assert_eq!(SourceFile::EntryList.file_name(), "entry.list");
        assert_eq!(SourceFile::ShortNames.file_name(), "short_names.dat");
        assert_eq!(SourceFile::ParentChildTree.to_string(), "ParentChildTreeFile.txt");
    }

    #[test]
    fn test_source_file_url() {
        assert_eq!(
            SourceFile::Protein2Ipr.url(crate::config::DEFAULT_BASE_URL),
            "https://ftp.ebi.ac.uk/pub/databases/interpro/current_release/protein2ipr.dat.gz"
        );
        assert_eq!(
            SourceFile::InterPro2Go.url("http://127.0.0.1:8080/"),
            "http://127.0.0.1:8080/interpro2go"
        );
    }

    #[test]
    fn test_local_mirror_resolves_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("interpro2go"), "!date: 2024/01/01\n").unwrap();

        let mirror = LocalMirror::new(dir.path());
        let path = mirror.ensure(SourceFile::InterPro2Go, false).unwrap();
        assert_eq!(path, dir.path().join("interpro2go"));

        // force is accepted but cannot refresh a mirror
        assert!(mirror.ensure(SourceFile::InterPro2Go, true).is_ok());
    }

    #[test]
    fn test_local_mirror_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = LocalMirror::new(dir.path());

        let err = mirror.ensure(SourceFile::Protein2Ipr, false).unwrap_err();
        assert!(matches!(
            err,
            FetchError::NotFound {
                source_file: SourceFile::Protein2Ipr,
                ..
            }
        ));
        assert!(err.to_string().contains("protein2ipr.dat.gz"));
    }
}
