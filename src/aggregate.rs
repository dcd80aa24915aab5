use std::collections::BTreeSet;

use crate::chain::fetch_chain;
use crate::domain::{EMPTY_SENTINEL, EntryId, Lookup, OutputRecord, unique_id};
use crate::entry::fetch_entry;
use crate::rcsb::RcsbClient;

/// Component ids the original spreadsheets treated as solvent or ions.
pub const SOLVENT_COMPONENTS: [&str; 10] =
    ["HOH", "WAT", "SO4", "PO4", "CL", "NA", "MG", "ZN", "K", "CA"];

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub label: String,
    pub exclude_components: BTreeSet<String>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            label: "entry".to_string(),
            exclude_components: BTreeSet::new(),
        }
    }
}

/// Builds one output record per entry from the entry document and the
/// documents of each of its polymer entities.
pub struct RecordAggregator<'a, R: RcsbClient + ?Sized> {
    client: &'a R,
    options: &'a AggregateOptions,
}

impl<'a, R: RcsbClient + ?Sized> RecordAggregator<'a, R> {
    pub fn new(client: &'a R, options: &'a AggregateOptions) -> Self {
        Self { client, options }
    }

    pub fn aggregate(&self, ordinal: usize, id: &EntryId) -> Lookup<OutputRecord> {
        let metadata = match fetch_entry(self.client, id) {
            Lookup::Found(metadata) => metadata,
            Lookup::Skipped(reason) => return Lookup::Skipped(reason),
        };

        let ligands: BTreeSet<String> = metadata
            .nonpolymer_entity_ids
            .into_iter()
            .filter(|component| !self.options.exclude_components.contains(component))
            .collect();

        let mut residues = BTreeSet::new();
        for entity in &metadata.polymer_entity_ids {
            if let Some(letters) = fetch_chain(self.client, id, entity).found() {
                residues.extend(letters);
            }
        }

        let ligands = render_set(ligands.iter().map(String::as_str));
        Lookup::Found(OutputRecord {
            unique_id: unique_id(&self.options.label, ordinal),
            pdb_filename: id.pdb_filename(),
            pdb_id: id.as_str().to_string(),
            ligand_candidates: ligands.clone(),
            ligands,
            residues: render_set(residues.iter().map(|ch| ch.to_string())),
        })
    }
}

/// Joins already-sorted items with ", ", or the sentinel when there are none.
pub fn render_set<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        EMPTY_SENTINEL.to_string()
    } else {
        joined
    }
}

pub fn solvent_components() -> BTreeSet<String> {
    SOLVENT_COMPONENTS
        .iter()
        .map(|component| component.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_set_joins_with_comma_space() {
        assert_eq!(render_set(["ATP", "LIG"]), "ATP, LIG");
    }

    #[test]
    fn render_set_empty_is_sentinel() {
        assert_eq!(render_set(Vec::<String>::new()), "NA");
    }

    #[test]
    fn solvent_list_matches_spreadsheet_filter() {
        let solvents = solvent_components();
        assert_eq!(solvents.len(), 10);
        assert!(solvents.contains("HOH"));
        assert!(!solvents.contains("ATP"));
    }
}
