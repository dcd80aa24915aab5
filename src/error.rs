use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HarvestError {
    #[error("RCSB search request failed: {0}")]
    SearchHttp(String),

    #[error("RCSB search returned status {status}: {message}")]
    SearchStatus { status: u16, message: String },

    #[error("failed to parse RCSB search response: {0}")]
    SearchParse(String),

    #[error("RCSB request failed: {0}")]
    RcsbHttp(String),

    #[error("RCSB returned status {status}: {message}")]
    RcsbStatus { status: u16, message: String },

    #[error("failed to parse RCSB response: {0}")]
    RcsbParse(String),

    #[error("invalid entry id: {0}")]
    InvalidEntryId(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("missing search criterion: {0}")]
    #[diagnostic(help("pass --organism, --title and --description, or set them in kira-lh.json"))]
    MissingCriterion(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("failed to write output: {0}")]
    Output(String),
}

impl HarvestError {
    /// Search-phase failures abort the whole run.
    pub fn is_remote_query(&self) -> bool {
        matches!(
            self,
            HarvestError::SearchHttp(_)
                | HarvestError::SearchStatus { .. }
                | HarvestError::SearchParse(_)
        )
    }

    /// Process exit status: 2 for configuration, 3 for RCSB, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_remote_query() {
            return 3;
        }
        match self {
            HarvestError::MissingCriterion(_)
            | HarvestError::ConfigRead(_)
            | HarvestError::ConfigParse(_) => 2,
            HarvestError::RcsbHttp(_)
            | HarvestError::RcsbStatus { .. }
            | HarvestError::RcsbParse(_) => 3,
            _ => 1,
        }
    }
}
