// InterPro Data Models
//
// Row schemas of the tabular release files and the joined entry record.

use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// InterPro entry type as written in entry.list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    #[serde(rename = "Family")]
    Family,
    #[serde(rename = "Domain")]
    Domain,
    #[serde(rename = "Repeat")]
    Repeat,
    #[serde(rename = "Site")]
    Site,
    #[serde(rename = "Homologous_superfamily")]
    HomologousSuperfamily,
    #[serde(rename = "Active_site")]
    ActiveSite,
    #[serde(rename = "Binding_site")]
    BindingSite,
    #[serde(rename = "Conserved_site")]
    ConservedSite,
    #[serde(rename = "PTM")]
    Ptm,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Family => "Family",
            EntryType::Domain => "Domain",
            EntryType::Repeat => "Repeat",
            EntryType::Site => "Site",
            EntryType::HomologousSuperfamily => "Homologous_superfamily",
            EntryType::ActiveSite => "Active_site",
            EntryType::BindingSite => "Binding_site",
            EntryType::ConservedSite => "Conserved_site",
            EntryType::Ptm => "PTM",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Family" => Ok(EntryType::Family),
            "Domain" => Ok(EntryType::Domain),
            "Repeat" => Ok(EntryType::Repeat),
            "Site" => Ok(EntryType::Site),
            "Homologous_superfamily" => Ok(EntryType::HomologousSuperfamily),
            "Active_site" => Ok(EntryType::ActiveSite),
            "Binding_site" => Ok(EntryType::BindingSite),
            "Conserved_site" => Ok(EntryType::ConservedSite),
            "PTM" => Ok(EntryType::Ptm),
            _ => Err(format!("Invalid entry type: {}", s)),
        }
    }
}

// ============================================================================
// Row schemas
// ============================================================================

/// One row of entry.list: ENTRY_AC ENTRY_TYPE ENTRY_NAME
#[derive(Debug, Clone, Deserialize)]
pub struct EntryRow {
    pub accession: String,
    pub entry_type: String,
    pub name: String,
}

/// One row of short_names.dat: ENTRY_AC ENTRY_SHORT_NAME
#[derive(Debug, Clone, Deserialize)]
pub struct ShortNameRow {
    pub accession: String,
    pub short_name: String,
}

// ============================================================================
// Joined entry
// ============================================================================

/// Entry after the short-name join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterProEntry {
    pub interpro_id: String,
    pub entry_type: EntryType,
    pub name: String,
    pub short_name: Option<String>,
}
