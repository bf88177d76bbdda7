// InterPro Protein Match Reducer
//
// protein2ipr.dat.gz has over a billion lines. It is streamed once, reduced to
// the entries we emit and to proteins of one organism, and the result is
// cached as a small TSV next to the raw downloads.
//
// File Formats:
// 1. protein2ipr.dat.gz - gzipped TSV, unsorted
//    Format: UniProtAccession InterProID InterProName SignatureAcc Start Stop
//    Example: A0A000 IPR004839 Aminotransferase, class I/classII PF00155 41 381
//
// 2. protein2ipr_<organism>.tsv - the cache
//    Format: InterProID UniProtAccession, sorted by entry then protein
//    Example: IPR000001 P00747

use super::{InterProError, InterProId, ProteinIndex, Result};
use crate::fetch::{Fetcher, SourceFile};
use crate::oracle::ProteinOracle;
use flate2::read::MultiGzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use iprkg_common::checksum::sha256_file;
use std::collections::HashSet;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

const RAW_FILE: &str = "protein2ipr.dat.gz";
const CACHE_FILE: &str = "protein cache";

const PROGRESS_EVERY: u64 = 1_000_000;
const LOG_EVERY: u64 = 100_000_000;

/// Reduced protein index plus how it was obtained
#[derive(Debug, Clone)]
pub struct ReductionOutcome {
    pub index: ProteinIndex,
    /// True when the cache was read and the raw file was never touched
    pub cache_hit: bool,
    /// Raw lines scanned; zero on a cache hit
    pub lines_scanned: u64,
    /// SHA-256 of the cache file after this call
    pub cache_sha256: String,
}

impl ReductionOutcome {
    pub fn pair_count(&self) -> usize {
        self.index.values().map(|proteins| proteins.len()).sum()
    }
}

/// Entry -> proteins of the target organism, from cache when possible.
///
/// The cache is consulted first unless `force` is set. A scan always
/// rewrites the cache.
pub fn load_protein_index<F, O>(
    fetcher: &F,
    oracle: &O,
    known_ids: &HashSet<InterProId>,
    cache_path: &Path,
    force: bool,
) -> Result<ReductionOutcome>
where
    F: Fetcher + ?Sized,
    O: ProteinOracle + ?Sized,
{
    if !force && cache_path.is_file() {
        let index = read_cache(BufReader::new(std::fs::File::open(cache_path)?))?;
        let cache_sha256 = sha256_file(cache_path)?;
        info!(
            path = %cache_path.display(),
            entries = index.len(),
            sha256 = %cache_sha256,
            "Loaded protein matches from cache"
        );
        return Ok(ReductionOutcome {
            index,
            cache_hit: true,
            lines_scanned: 0,
            cache_sha256,
        });
    }

    let raw_path = fetcher.ensure(SourceFile::Protein2Ipr, force)?;
    info!(path = %raw_path.display(), known_entries = known_ids.len(), "Scanning protein matches");

    let reader = BufReader::with_capacity(
        1 << 20,
        MultiGzDecoder::new(std::fs::File::open(&raw_path)?),
    );
    let (index, lines_scanned) = reduce_protein_matches(reader, known_ids, oracle)?;

    write_cache(&index, cache_path)?;
    let cache_sha256 = sha256_file(cache_path)?;

    let outcome = ReductionOutcome {
        index,
        cache_hit: false,
        lines_scanned,
        cache_sha256,
    };
    info!(
        lines = lines_scanned,
        entries = outcome.index.len(),
        pairs = outcome.pair_count(),
        path = %cache_path.display(),
        sha256 = %outcome.cache_sha256,
        "Wrote protein cache"
    );

    Ok(outcome)
}

/// Stream raw protein2ipr lines, keeping known entries in the target organism.
///
/// Returns the index and the number of lines read.
pub fn reduce_protein_matches<R, O>(
    mut reader: R,
    known_ids: &HashSet<InterProId>,
    oracle: &O,
) -> Result<(ProteinIndex, u64)>
where
    R: BufRead,
    O: ProteinOracle + ?Sized,
{
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {human_pos} lines ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.set_message("Processing protein2ipr");

    let mut index = ProteinIndex::new();
    let mut line = String::new();
    let mut line_number = 0u64;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        line_number += 1;

        if line_number % PROGRESS_EVERY == 0 {
            progress.inc(PROGRESS_EVERY);
        }
        if line_number % LOG_EVERY == 0 {
            info!(lines = line_number, entries = index.len(), "Protein scan progress");
        }

        let mut fields = line.trim_end_matches(['\n', '\r']).splitn(3, '\t');
        let (Some(protein), Some(interpro_id), Some(_rest)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(InterProError::parse(
                RAW_FILE,
                line_number as usize,
                "expected at least 3 tab-separated fields",
            ));
        };

        if !known_ids.contains(interpro_id) {
            continue;
        }
        if oracle.is_target_organism(protein) {
            index
                .entry(interpro_id.to_string())
                .or_default()
                .insert(protein.to_string());
        }
    }

    progress.finish_and_clear();
    debug!(lines = line_number, entries = index.len(), "Protein scan complete");

    Ok((index, line_number))
}

/// Read a cache written by [`write_cache`]
pub fn read_cache<R: BufRead>(reader: R) -> Result<ProteinIndex> {
    let mut index = ProteinIndex::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (interpro_id, protein) = line.split_once('\t').ok_or_else(|| {
            InterProError::parse(CACHE_FILE, number + 1, "expected '<interpro id>\\t<protein>'")
        })?;
        index
            .entry(interpro_id.to_string())
            .or_default()
            .insert(protein.to_string());
    }

    Ok(index)
}

/// Write the index sorted by entry, then protein, one pair per line.
///
/// Goes through a temporary sibling file that is renamed into place.
pub fn write_cache(index: &ProteinIndex, cache_path: &Path) -> Result<()> {
    if let Some(parent) = cache_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = cache_path.with_extension("tsv.tmp");
    {
        let mut writer = BufWriter::new(std::fs::File::create(&tmp_path)?);
        for (interpro_id, proteins) in index {
            for protein in proteins {
                writeln!(writer, "{}\t{}", interpro_id, protein)?;
            }
        }
        writer.flush()?;
    }
    std::fs::rename(&tmp_path, cache_path)?;

    Ok(())
}
