use serde_json::Value;

use crate::domain::{EntityId, EntryId, Lookup, SkipReason};
use crate::error::HarvestError;
use crate::rcsb::RcsbClient;

/// Fields of the entry document the harvester consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryMetadata {
    pub nonpolymer_entity_ids: Vec<String>,
    pub polymer_entity_ids: Vec<EntityId>,
}

pub fn fetch_entry<R: RcsbClient + ?Sized>(client: &R, id: &EntryId) -> Lookup<EntryMetadata> {
    let metadata = client
        .entry(id)
        .and_then(|value| extract_entry_metadata(&value));
    match metadata {
        Ok(metadata) => Lookup::Found(metadata),
        Err(err) => Lookup::Skipped(SkipReason::entry(&err)),
    }
}

/// Missing lists mean "no ligands" / "no chains", not an error.
pub fn extract_entry_metadata(raw: &Value) -> Result<EntryMetadata, HarvestError> {
    if !raw.is_object() {
        return Err(HarvestError::RcsbParse(
            "entry response is not a JSON object".to_string(),
        ));
    }

    // Bound component codes (e.g. "ATP") name the ligand; non-polymer entity ids are only ordinals.
    let nonpolymer_entity_ids = string_list(
        raw.get("rcsb_entry_info")
            .and_then(|value| value.get("nonpolymer_bound_components")),
    );
    let polymer_entity_ids = string_list(
        raw.get("rcsb_entry_container_identifiers")
            .and_then(|value| value.get("polymer_entity_ids")),
    )
    .into_iter()
    .map(EntityId::new)
    .collect::<Result<Vec<_>, HarvestError>>()?;

    Ok(EntryMetadata {
        nonpolymer_entity_ids,
        polymer_entity_ids,
    })
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(|value| value.as_array())
        .map(|array| {
            array
                .iter()
                .filter_map(|item| item.as_str())
                .map(|item| item.to_string())
                .collect()
        })
        .unwrap_or_default()
}
