// InterPro Ingestion Pipeline
//
// End-to-end run: load the release, then write nodes.jsonl and relations.jsonl.
// Output files are only created after every index has been built.

use super::entries::load_entries;
use super::processor::{InterProProcessor, LoadStats};
use super::proteins::{load_protein_index, ReductionOutcome};
use super::{InterProError, InterProId, Result};
use crate::config::InterProConfig;
use crate::fetch::Fetcher;
use crate::oracle::ProteinOracle;
use serde::Serialize;
use serde_jsonlines::JsonLinesWriter;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

pub const NODES_FILE: &str = "nodes.jsonl";
pub const RELATIONS_FILE: &str = "relations.jsonl";

/// Statistics from a pipeline run
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    pub load: LoadStats,
    pub nodes_written: usize,
    pub relations_written: usize,
    pub nodes_path: PathBuf,
    pub relations_path: PathBuf,
    pub duration_secs: f64,
}

/// Run the full pipeline
pub fn run<F, O>(fetcher: &F, oracle: &O, config: &InterProConfig) -> Result<PipelineStats>
where
    F: Fetcher + ?Sized,
    O: ProteinOracle + ?Sized,
{
    let start = Instant::now();
    info!(
        source = InterProProcessor::NAME,
        output_dir = %config.output_dir.display(),
        force = config.force,
        "Starting InterPro pipeline"
    );

    // Step 1: Build all indices
    let processor = InterProProcessor::load(fetcher, oracle, config)?;

    // Step 2: Emit graph
    let mut stats = write_outputs(&processor, &config.output_dir)?;
    stats.load = processor.stats().clone();
    stats.duration_secs = start.elapsed().as_secs_f64();

    info!(
        nodes = stats.nodes_written,
        relations = stats.relations_written,
        duration_secs = stats.duration_secs,
        "InterPro pipeline complete"
    );

    Ok(stats)
}

/// Write the processor's nodes and relations as JSON lines into `output_dir`
pub fn write_outputs(processor: &InterProProcessor, output_dir: &Path) -> Result<PipelineStats> {
    std::fs::create_dir_all(output_dir)?;

    let nodes_path = output_dir.join(NODES_FILE);
    let nodes = processor.nodes();
    let nodes_written = write_json_lines(&nodes_path, nodes)?;

    let relations_path = output_dir.join(RELATIONS_FILE);
    let relations_written = write_json_lines(&relations_path, processor.relations())?;

    info!(
        nodes = nodes_written,
        relations = relations_written,
        dir = %output_dir.display(),
        "Wrote graph output"
    );

    Ok(PipelineStats {
        nodes_written,
        relations_written,
        nodes_path,
        relations_path,
        ..PipelineStats::default()
    })
}

fn write_json_lines<I, T>(path: &Path, items: I) -> Result<usize>
where
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let file = File::create(path)
        .map_err(|e| InterProError::Output(format!("cannot create {}: {}", path.display(), e)))?;
    let mut writer = JsonLinesWriter::new(BufWriter::new(file));

    let mut count = 0;
    for item in items {
        writer
            .write(&item)
            .map_err(|e| InterProError::Output(format!("{}: {}", path.display(), e)))?;
        count += 1;
    }
    writer
        .flush()
        .map_err(|e| InterProError::Output(format!("{}: {}", path.display(), e)))?;

    Ok(count)
}

/// Build or refresh only the protein cache
///
/// Loads the entry catalog for the set of known entries, then runs the
/// reducer. With `config.force` the raw file is rescanned even when a cache
/// exists.
pub fn reduce_proteins<F, O>(
    fetcher: &F,
    oracle: &O,
    config: &InterProConfig,
) -> Result<ReductionOutcome>
where
    F: Fetcher + ?Sized,
    O: ProteinOracle + ?Sized,
{
    let entries = load_entries(fetcher, config.force)?;
    let known_ids: HashSet<InterProId> = entries.into_iter().map(|e| e.interpro_id).collect();

    load_protein_index(
        fetcher,
        oracle,
        &known_ids,
        &config.protein_cache_path(),
        config.force,
    )
}
