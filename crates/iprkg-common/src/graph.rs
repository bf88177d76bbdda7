//! Graph records emitted by ingest processors
//!
//! Processors produce a finite sequence of [`GraphNode`]s followed by a finite
//! sequence of [`GraphRelation`]s. Both are plain serde records; loading them
//! into a graph store is left to the consumer.

use crate::error::CommonError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label carried by every biological entity node
pub const BIO_ENTITY_LABEL: &str = "BioEntity";

/// Identifier namespace of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Namespace {
    #[serde(rename = "interpro")]
    InterPro,
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "HGNC")]
    Hgnc,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::InterPro => "interpro",
            Namespace::Go => "GO",
            Namespace::Hgnc => "HGNC",
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Namespace {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interpro" => Ok(Namespace::InterPro),
            "GO" => Ok(Namespace::Go),
            "HGNC" => Ok(Namespace::Hgnc),
            _ => Err(CommonError::InvalidNamespace(s.to_string())),
        }
    }
}

/// Kind of a directed relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Child classification points at its parent
    Isa,
    /// Classification points at an ontology term
    AssociatedWith,
    /// Classification points at a member gene
    HasMember,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Isa => "isa",
            RelationKind::AssociatedWith => "associated_with",
            RelationKind::HasMember => "has_member",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationKind {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "isa" => Ok(RelationKind::Isa),
            "associated_with" => Ok(RelationKind::AssociatedWith),
            "has_member" => Ok(RelationKind::HasMember),
            _ => Err(CommonError::InvalidRelationKind(s.to_string())),
        }
    }
}

/// A typed node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub namespace: Namespace,
    pub id: String,
    pub labels: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl GraphNode {
    /// Node labelled as a biological entity, without attributes
    pub fn bio_entity(namespace: Namespace, id: impl Into<String>) -> Self {
        Self {
            namespace,
            id: id.into(),
            labels: vec![BIO_ENTITY_LABEL.to_string()],
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// `namespace:id` form used in log messages
    pub fn curie(&self) -> String {
        format!("{}:{}", self.namespace, self.id)
    }
}

/// A typed, directed relation between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphRelation {
    pub source_namespace: Namespace,
    pub source_id: String,
    pub target_namespace: Namespace,
    pub target_id: String,
    pub kind: RelationKind,
}

impl GraphRelation {
    pub fn new(
        source_namespace: Namespace,
        source_id: impl Into<String>,
        target_namespace: Namespace,
        target_id: impl Into<String>,
        kind: RelationKind,
    ) -> Self {
        Self {
            source_namespace,
            source_id: source_id.into(),
            target_namespace,
            target_id: target_id.into(),
            kind,
        }
    }
}
