use std::fs::{self, File};
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};

use crate::domain::{OUTPUT_HEADER, OutputRecord};
use crate::error::HarvestError;

/// Destination for output rows. Rows are appended in the order produced.
pub trait RecordSink {
    fn append(&mut self, record: &OutputRecord) -> Result<(), HarvestError>;
}

/// CSV file sink. The header is written on creation and every row is
/// flushed immediately, so an interrupted run keeps the rows written so far.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    pub fn create(path: &Utf8Path) -> Result<Self, HarvestError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
            fs::create_dir_all(parent.as_std_path())
                .map_err(|err| HarvestError::Filesystem(format!("create {parent}: {err}")))?;
        }
        let file = File::create(path.as_std_path())
            .map_err(|err| HarvestError::Filesystem(format!("create {path}: {err}")))?;
        Self::new(file)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Result<Self, HarvestError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer
            .write_record(OUTPUT_HEADER)
            .map_err(|err| HarvestError::Output(err.to_string()))?;
        writer
            .flush()
            .map_err(|err| HarvestError::Output(err.to_string()))?;
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> Result<W, HarvestError> {
        self.writer
            .into_inner()
            .map_err(|err| HarvestError::Output(err.to_string()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn append(&mut self, record: &OutputRecord) -> Result<(), HarvestError> {
        self.writer
            .serialize(record)
            .map_err(|err| HarvestError::Output(err.to_string()))?;
        self.writer
            .flush()
            .map_err(|err| HarvestError::Output(err.to_string()))
    }
}

impl RecordSink for Vec<OutputRecord> {
    fn append(&mut self, record: &OutputRecord) -> Result<(), HarvestError> {
        self.push(record.clone());
        Ok(())
    }
}

pub fn default_output_path() -> Utf8PathBuf {
    Utf8PathBuf::from("data").join("ligand_mapping.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> OutputRecord {
        OutputRecord {
            unique_id: "BRD4_1".to_string(),
            pdb_filename: "pdb7rui.ent".to_string(),
            pdb_id: "7RUI".to_string(),
            ligands: "EDO, I01".to_string(),
            ligand_candidates: "EDO, I01".to_string(),
            residues: "A, C".to_string(),
        }
    }

    #[test]
    fn header_written_without_rows() {
        let sink = CsvSink::new(Vec::new()).unwrap();
        let bytes = sink.into_inner().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "UniqueID,PBD ID,PDB_ID,Ligand(s),All Ligand Candidates,All Residues\n"
        );
    }

    #[test]
    fn rows_quote_comma_joined_fields() {
        let mut sink = CsvSink::new(Vec::new()).unwrap();
        sink.append(&record()).unwrap();
        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "BRD4_1,pdb7rui.ent,7RUI,\"EDO, I01\",\"EDO, I01\",\"A, C\""
        );
    }
}
