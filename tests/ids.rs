use std::fs;

use camino::Utf8PathBuf;

use kira_ligand_harvest::ids::{parse_entry_arg, read_entry_file};

#[test]
fn read_curated_list_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(temp.path().join("ache.txt")).unwrap();
    fs::write(
        path.as_std_path(),
        "# AChE sheet\nPDB: 1eve\n4EY7\u{a0}\n\nnot-an-id!\n7RUI\n",
    )
    .unwrap();

    let ids = read_entry_file(&path).unwrap();
    let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["1EVE", "4EY7", "7RUI"]);
}

#[test]
fn missing_list_file_is_filesystem_error() {
    let err = read_entry_file(&Utf8PathBuf::from("/nonexistent/ids.txt")).unwrap_err();
    assert!(err.to_string().starts_with("filesystem error"));
}

#[test]
fn arg_list_preserves_order() {
    let ids = parse_entry_arg("7RUI,8b96,8B98");
    let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["7RUI", "8B96", "8B98"]);
}
