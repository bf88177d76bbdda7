//! IPRKG Ingest - InterPro to knowledge-graph tool

use anyhow::{Context, Result};
use clap::Parser;
use iprkg_common::logging::{init_logging, LogConfig, LogLevel};
use iprkg_ingest::config::InterProConfig;
use iprkg_ingest::fetch::{Fetcher, HttpFetcher, LocalMirror};
use iprkg_ingest::interpro;
use iprkg_ingest::oracle::MappingTableOracle;
use std::path::PathBuf;
use tokio::runtime::Handle;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "iprkg-ingest")]
#[command(author, version, about = "InterPro knowledge-graph ingestion tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Re-download raw files and rebuild the protein cache
    #[arg(short, long, global = true)]
    force: bool,

    /// Read raw files from the data directory only, never download
    #[arg(long, global = true)]
    offline: bool,

    /// Directory holding raw downloads and the protein cache
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Build nodes.jsonl and relations.jsonl from the current release
    Run {
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build or refresh only the reduced protein2ipr cache
    ReduceProteins,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over flags
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("iprkg-ingest")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    let mut config = InterProConfig::from_env();
    config.force |= cli.force;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Command::Run {
        output: Some(output),
    } = &cli.command
    {
        config.output_dir = output.clone();
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    let oracle = MappingTableOracle::from_path(&config.protein_mapping, config.taxon_id)
        .with_context(|| {
            format!(
                "Failed to load protein mapping table {}",
                config.protein_mapping.display()
            )
        })?;

    let fetcher: Box<dyn Fetcher + Send> = if cli.offline {
        info!(dir = %config.data_dir.display(), "Offline mode, using local mirror");
        Box::new(LocalMirror::new(&config.data_dir))
    } else {
        Box::new(HttpFetcher::from_config(&config, Handle::current())?)
    };

    match cli.command {
        Command::Run { .. } => {
            info!("Ingesting InterPro release");
            let stats = tokio::task::spawn_blocking(move || {
                interpro::run(fetcher.as_ref(), &oracle, &config)
            })
            .await??;

            info!(
                nodes = stats.nodes_written,
                relations = stats.relations_written,
                dropped_translations = stats.load.dropped_translations,
                cache_hit = stats.load.protein_cache_hit,
                "Ingestion complete"
            );
            println!("{}", serde_json::to_string_pretty(&stats)?);
        },
        Command::ReduceProteins => {
            info!("Reducing protein2ipr");
            let cache_path = config.protein_cache_path();
            let outcome = tokio::task::spawn_blocking(move || {
                interpro::reduce_proteins(fetcher.as_ref(), &oracle, &config)
            })
            .await??;

            info!(
                path = %cache_path.display(),
                entries = outcome.index.len(),
                pairs = outcome.pair_count(),
                cache_hit = outcome.cache_hit,
                sha256 = %outcome.cache_sha256,
                "Protein cache ready"
            );
        },
    }

    Ok(())
}
