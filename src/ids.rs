//! Curated identifier lists supplied instead of a search.

use std::fs;
use std::sync::OnceLock;

use camino::Utf8Path;
use regex::Regex;
use tracing::warn;

use crate::domain::EntryId;
use crate::error::HarvestError;

fn trailing_code() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([0-9A-Za-z]{4})$").expect("static regex"))
}

/// Cleans a spreadsheet-style label ("PDB: 7rui", "7RUI\u{a0}") down to its
/// trailing four-character code.
pub fn clean_entry_label(label: &str) -> Option<EntryId> {
    let cleaned = label.replace('\u{a0}', "");
    let cleaned = cleaned.trim();
    let code = trailing_code().captures(cleaned)?.get(1)?.as_str();
    code.parse().ok()
}

/// Parses labels in order. Blank lines and `#` comments are ignored,
/// unusable labels are dropped with a warning.
pub fn parse_entry_list<'a, I>(labels: I) -> Vec<EntryId>
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .map(str::trim)
        .filter(|label| !label.is_empty() && !label.starts_with('#'))
        .filter_map(|label| {
            let id = clean_entry_label(label);
            if id.is_none() {
                warn!(label, "ignoring unusable entry label");
            }
            id
        })
        .collect()
}

pub fn parse_entry_arg(value: &str) -> Vec<EntryId> {
    parse_entry_list(value.split(','))
}

pub fn read_entry_file(path: &Utf8Path) -> Result<Vec<EntryId>, HarvestError> {
    let content = fs::read_to_string(path.as_std_path())
        .map_err(|err| HarvestError::Filesystem(format!("read {path}: {err}")))?;
    Ok(parse_entry_list(content.lines()))
}
