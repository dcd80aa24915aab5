use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HarvestError;

/// Literal written when a derived set is empty.
pub const EMPTY_SENTINEL: &str = "NA";

/// Identifier of one deposited structure. Kept exactly as the search service
/// returned it; user-supplied ids are upper-cased on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(value: impl Into<String>) -> Result<Self, HarvestError> {
        let value = value.into();
        let trimmed = value.trim();
        let is_valid = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
        if !is_valid {
            return Err(HarvestError::InvalidEntryId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Local file name the structure is archived under.
    pub fn pdb_filename(&self) -> String {
        format!("pdb{}.ent", self.0.to_lowercase())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = HarvestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase();
        let is_valid =
            normalized.len() == 4 && normalized.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !is_valid {
            return Err(HarvestError::InvalidEntryId(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

/// Polymer entity id within an entry ("1", "2", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Result<Self, HarvestError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(HarvestError::RcsbParse(format!(
                "invalid polymer entity id: {value:?}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipKind {
    Entry,
    Chain,
}

impl fmt::Display for SkipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipKind::Entry => write!(f, "entry"),
            SkipKind::Chain => write!(f, "chain"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipReason {
    pub kind: SkipKind,
    pub message: String,
}

impl SkipReason {
    pub fn entry(err: &HarvestError) -> Self {
        Self {
            kind: SkipKind::Entry,
            message: err.to_string(),
        }
    }

    pub fn chain(err: &HarvestError) -> Self {
        Self {
            kind: SkipKind::Chain,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} skipped: {}", self.kind, self.message)
    }
}

/// Result of a lookup that may be skipped without aborting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Skipped(SkipReason),
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Skipped(_) => None,
        }
    }
}

/// Column names of the output file, in order.
pub const OUTPUT_HEADER: [&str; 6] = [
    "UniqueID",
    "PBD ID",
    "PDB_ID",
    "Ligand(s)",
    "All Ligand Candidates",
    "All Residues",
];

/// One row of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    #[serde(rename = "UniqueID")]
    pub unique_id: String,
    #[serde(rename = "PBD ID")]
    pub pdb_filename: String,
    #[serde(rename = "PDB_ID")]
    pub pdb_id: String,
    #[serde(rename = "Ligand(s)")]
    pub ligands: String,
    #[serde(rename = "All Ligand Candidates")]
    pub ligand_candidates: String,
    #[serde(rename = "All Residues")]
    pub residues: String,
}

pub fn unique_id(label: &str, ordinal: usize) -> String {
    format!("{label}_{ordinal}")
}
