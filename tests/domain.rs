use assert_matches::assert_matches;

use kira_ligand_harvest::domain::{EntityId, EntryId, Lookup, SkipKind, SkipReason, unique_id};
use kira_ligand_harvest::error::HarvestError;

#[test]
fn parse_entry_id_valid() {
    let id: EntryId = "1eve".parse().unwrap();
    assert_eq!(id.as_str(), "1EVE");
    assert_eq!(id.pdb_filename(), "pdb1eve.ent");
}

#[test]
fn parse_entry_id_invalid() {
    let err = "1EVE2".parse::<EntryId>().unwrap_err();
    assert_matches!(err, HarvestError::InvalidEntryId(_));
}

#[test]
fn extended_search_ids_are_accepted() {
    let id = EntryId::new("pdb_00001abc").unwrap();
    assert_eq!(id.pdb_filename(), "pdbpdb_00001abc.ent");
}

#[test]
fn entity_id_rejects_blank() {
    assert_matches!(EntityId::new(""), Err(HarvestError::RcsbParse(_)));
}

#[test]
fn skip_reason_names_kind_and_cause() {
    let reason = SkipReason::chain(&HarvestError::RcsbStatus {
        status: 404,
        message: "not found".to_string(),
    });
    assert_eq!(reason.kind, SkipKind::Chain);
    assert_eq!(
        reason.to_string(),
        "chain skipped: RCSB returned status 404: not found"
    );
}

#[test]
fn lookup_found_and_skipped() {
    let found: Lookup<u8> = Lookup::Found(1);
    assert_eq!(found.found(), Some(1));

    let skipped: Lookup<u8> = Lookup::Skipped(SkipReason::entry(&HarvestError::RcsbHttp(
        "timed out".to_string(),
    )));
    assert_matches!(&skipped, Lookup::Skipped(reason) if reason.kind == SkipKind::Entry);
    assert_eq!(skipped.found(), None);
}

#[test]
fn unique_ids_are_label_ordinal() {
    assert_eq!(unique_id("BD2", 12), "BD2_12");
}
