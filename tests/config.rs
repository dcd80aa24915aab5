use std::fs;

use assert_matches::assert_matches;
use camino::Utf8PathBuf;

use kira_ligand_harvest::config::{Config, ConfigLoader, ConfigOverrides};
use kira_ligand_harvest::error::HarvestError;
use kira_ligand_harvest::rcsb::ENTRY_URL;

#[test]
fn load_config_file_with_endpoints() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("kira-lh.json");
    fs::write(
        &path,
        r#"{
            "organism": "Homo sapiens",
            "title": "acetylcholinesterase",
            "description": "Acetylcholinesterase",
            "label": "AChE",
            "exclude_components": ["edo", " gol "],
            "endpoints": { "search": "http://localhost:9000/query" }
        }"#,
    )
    .unwrap();

    let resolved =
        ConfigLoader::resolve(path.to_str(), ConfigOverrides::default()).unwrap();
    assert_eq!(resolved.label, "AChE");
    assert_eq!(resolved.endpoints.search, "http://localhost:9000/query");
    assert_eq!(resolved.endpoints.entry, ENTRY_URL);
    assert!(resolved.exclude_components.contains("EDO"));
    assert!(resolved.exclude_components.contains("GOL"));

    let criteria = resolved.criteria().unwrap();
    assert_eq!(criteria.organism, "Homo sapiens");
}

#[test]
fn overrides_win_over_file_values() {
    let config = Config {
        organism: Some("Mus musculus".to_string()),
        label: Some("file".to_string()),
        ..Config::default()
    };
    let overrides = ConfigOverrides {
        organism: Some("Homo sapiens".to_string()),
        output: Some(Utf8PathBuf::from("out/bd2.csv")),
        exclude_solvents: true,
        ..ConfigOverrides::default()
    };

    let resolved = ConfigLoader::resolve_config(config, overrides);
    assert_eq!(resolved.organism.as_deref(), Some("Homo sapiens"));
    assert_eq!(resolved.label, "file");
    assert_eq!(resolved.output, Utf8PathBuf::from("out/bd2.csv"));
    assert!(resolved.exclude_components.contains("HOH"));
}

#[test]
fn explicit_missing_config_is_an_error() {
    let err = ConfigLoader::resolve(
        Some("/nonexistent/kira-lh.json"),
        ConfigOverrides::default(),
    )
    .unwrap_err();
    assert_matches!(err, HarvestError::ConfigRead(_));
}

#[test]
fn malformed_config_is_a_parse_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("kira-lh.json");
    fs::write(&path, "{ \"label\": 3 }").unwrap();

    let err = ConfigLoader::resolve(path.to_str(), ConfigOverrides::default()).unwrap_err();
    assert_matches!(err, HarvestError::ConfigParse(_));
}
