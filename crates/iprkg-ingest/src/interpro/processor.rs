// InterPro Graph Assembler
//
// Holds the four indices of one release and turns them into graph output.
//
// Node order:
//   1. one interpro node per Domain entry, in entry.list order
//   2. one GO node per referenced term, sorted by id
//   3. one HGNC node per referenced gene, sorted numerically
//
// Relations are grouped by entry, in entry.list order:
//   child  -isa->            entry
//   entry  -associated_with-> GO term
//   entry  -has_member->     HGNC gene

use super::{
    entries::load_entries, go::load_go_index, proteins::load_protein_index, tree::parse_tree,
    GeneIndex, GoIndex, InterProEntry, InterProId, ParentChildIndex, ProteinIndex, Result,
};
use crate::config::InterProConfig;
use crate::fetch::Fetcher;
use crate::oracle::{GeneId, GeneLookup, ProteinOracle};
use iprkg_common::graph::BIO_ENTITY_LABEL;
use iprkg_common::{GraphNode, GraphRelation, Namespace, RelationKind};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

// ============================================================================
// Load statistics
// ============================================================================

/// Counts gathered while the indices are built
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadStats {
    pub domains: usize,
    pub parents: usize,
    pub go_mapped_entries: usize,
    pub protein_pairs: usize,
    pub gene_pairs: usize,
    /// Proteins the oracle could not translate to a gene
    pub dropped_translations: usize,
    pub protein_cache_hit: bool,
    pub protein_lines_scanned: u64,
    pub protein_cache_sha256: String,
}

// ============================================================================
// Processor
// ============================================================================

pub struct InterProProcessor {
    entries: Vec<InterProEntry>,
    parents: ParentChildIndex,
    go_terms: GoIndex,
    genes: GeneIndex,
    stats: LoadStats,
}

impl InterProProcessor {
    pub const NAME: &'static str = "interpro";
    pub const NODE_TYPES: [&'static str; 1] = [BIO_ENTITY_LABEL];

    /// Build every index of the release. Nothing is emitted until all succeed.
    pub fn load<F, O>(fetcher: &F, oracle: &O, config: &InterProConfig) -> Result<Self>
    where
        F: Fetcher + ?Sized,
        O: ProteinOracle + ?Sized,
    {
        let force = config.force;

        let entries = load_entries(fetcher, force)?;
        let parents = parse_tree(fetcher, force)?;
        let go_terms = load_go_index(fetcher, force)?;

        let known_ids: HashSet<InterProId> =
            entries.iter().map(|e| e.interpro_id.clone()).collect();
        let proteins = load_protein_index(
            fetcher,
            oracle,
            &known_ids,
            &config.protein_cache_path(),
            force,
        )?;

        let (genes, dropped) = translate_proteins(&proteins.index, oracle);
        debug!(dropped, "Proteins without an HGNC gene");

        let mut processor = Self::from_parts(entries, parents, go_terms, genes);
        processor.stats.protein_pairs = proteins.pair_count();
        processor.stats.dropped_translations = dropped;
        processor.stats.protein_cache_hit = proteins.cache_hit;
        processor.stats.protein_lines_scanned = proteins.lines_scanned;
        processor.stats.protein_cache_sha256 = proteins.cache_sha256;

        info!(
            domains = processor.stats.domains,
            parents = processor.stats.parents,
            go_mapped_entries = processor.stats.go_mapped_entries,
            gene_pairs = processor.stats.gene_pairs,
            "Loaded InterPro release"
        );

        Ok(processor)
    }

    /// Assemble from indices that are already built
    pub fn from_parts(
        entries: Vec<InterProEntry>,
        parents: ParentChildIndex,
        go_terms: GoIndex,
        genes: GeneIndex,
    ) -> Self {
        let stats = LoadStats {
            domains: entries.len(),
            parents: parents.len(),
            go_mapped_entries: go_terms.len(),
            gene_pairs: genes.values().map(|g| g.len()).sum(),
            ..LoadStats::default()
        };

        Self {
            entries,
            parents,
            go_terms,
            genes,
            stats,
        }
    }

    pub fn entries(&self) -> &[InterProEntry] {
        &self.entries
    }

    pub fn parents(&self) -> &ParentChildIndex {
        &self.parents
    }

    pub fn go_terms(&self) -> &GoIndex {
        &self.go_terms
    }

    pub fn genes(&self) -> &GeneIndex {
        &self.genes
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    pub fn nodes(&self) -> Vec<GraphNode> {
        let mut nodes = Vec::with_capacity(self.entries.len());
        let mut go_ids: BTreeSet<&str> = BTreeSet::new();
        let mut gene_ids: BTreeSet<GeneId> = BTreeSet::new();

        for entry in &self.entries {
            nodes.push(
                GraphNode::bio_entity(Namespace::InterPro, entry.interpro_id.as_str())
                    .with_attribute("name", entry.name.as_str())
                    .with_attribute("short_name", entry.short_name.clone())
                    .with_attribute("type", entry.entry_type.as_str()),
            );

            if let Some(terms) = self.go_terms.get(&entry.interpro_id) {
                go_ids.extend(terms.iter().map(String::as_str));
            }
            if let Some(genes) = self.genes.get(&entry.interpro_id) {
                gene_ids.extend(genes.iter().copied());
            }
        }

        nodes.extend(
            go_ids
                .into_iter()
                .map(|id| GraphNode::bio_entity(Namespace::Go, id)),
        );
        nodes.extend(
            gene_ids
                .into_iter()
                .map(|gene| GraphNode::bio_entity(Namespace::Hgnc, gene.to_string())),
        );

        nodes
    }

    /// Relations, produced on demand
    pub fn relations(&self) -> impl Iterator<Item = GraphRelation> + '_ {
        self.entries.iter().flat_map(move |entry| {
            let id = entry.interpro_id.as_str();

            let isa = self
                .parents
                .get(id)
                .into_iter()
                .flatten()
                .map(move |child| {
                    GraphRelation::new(
                        Namespace::InterPro,
                        child.as_str(),
                        Namespace::InterPro,
                        id,
                        RelationKind::Isa,
                    )
                });

            let go = self
                .go_terms
                .get(id)
                .into_iter()
                .flatten()
                .map(move |term| {
                    GraphRelation::new(
                        Namespace::InterPro,
                        id,
                        Namespace::Go,
                        term.as_str(),
                        RelationKind::AssociatedWith,
                    )
                });

            let genes = self
                .genes
                .get(id)
                .into_iter()
                .flatten()
                .map(move |gene| {
                    GraphRelation::new(
                        Namespace::InterPro,
                        id,
                        Namespace::Hgnc,
                        gene.to_string(),
                        RelationKind::HasMember,
                    )
                });

            isa.chain(go).chain(genes)
        })
    }
}

/// Translate entry -> proteins into entry -> genes.
///
/// Returns the gene index and the number of proteins that had no gene.
pub fn translate_proteins<O: ProteinOracle + ?Sized>(
    proteins: &ProteinIndex,
    oracle: &O,
) -> (GeneIndex, usize) {
    let mut genes = GeneIndex::new();
    let mut dropped = 0;

    for (interpro_id, accessions) in proteins {
        for accession in accessions {
            match oracle.gene_for_protein(accession) {
                GeneLookup::Found(gene) => {
                    genes.entry(interpro_id.clone()).or_default().insert(gene);
                },
                GeneLookup::NotFound => dropped += 1,
            }
        }
    }

    (genes, dropped)
}
