use serde_json::Value;
use tracing::warn;

use crate::domain::{EntityId, EntryId, Lookup, SkipReason};
use crate::error::HarvestError;
use crate::rcsb::RcsbClient;

/// Fetches one polymer entity and returns the letters of its one-letter
/// sequence. A failure skips this chain only.
pub fn fetch_chain<R: RcsbClient + ?Sized>(
    client: &R,
    id: &EntryId,
    entity: &EntityId,
) -> Lookup<Vec<char>> {
    let sequence = client
        .polymer_entity(id, entity)
        .and_then(|value| extract_sequence(&value));
    match sequence {
        Ok(sequence) => Lookup::Found(residue_letters(&sequence)),
        Err(err) => {
            warn!(entry = %id, chain = %entity, error = %err, "skipping chain");
            Lookup::Skipped(SkipReason::chain(&err))
        }
    }
}

pub fn extract_sequence(raw: &Value) -> Result<String, HarvestError> {
    if !raw.is_object() {
        return Err(HarvestError::RcsbParse(
            "polymer entity response is not a JSON object".to_string(),
        ));
    }
    Ok(raw
        .get("entity_poly")
        .and_then(|value| value.get("pdbx_seq_one_letter_code_can"))
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string())
}

/// Drops gap markers, digits, whitespace and other placeholders. Letters are
/// passed through unmapped.
pub fn residue_letters(sequence: &str) -> Vec<char> {
    sequence.chars().filter(|ch| ch.is_alphabetic()).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extract_reads_canonical_sequence() {
        let raw = json!({
            "entity_poly": {
                "pdbx_seq_one_letter_code": "MK(MSE)V",
                "pdbx_seq_one_letter_code_can": "MKMV"
            }
        });
        assert_eq!(extract_sequence(&raw).unwrap(), "MKMV");
    }

    #[test]
    fn extract_defaults_to_empty_sequence() {
        assert_eq!(extract_sequence(&json!({})).unwrap(), "");
        assert_eq!(
            extract_sequence(&json!({ "entity_poly": { "pdbx_seq_one_letter_code_can": null } }))
                .unwrap(),
            ""
        );
    }

    #[test]
    fn residue_letters_keeps_only_alphabetic() {
        assert_eq!(
            residue_letters("AC-D\nG1X?*"),
            vec!['A', 'C', 'D', 'G', 'X']
        );
    }
}
