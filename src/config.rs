use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregateOptions, solvent_components};
use crate::error::HarvestError;
use crate::pipeline::HarvestOptions;
use crate::query::SearchCriteria;
use crate::rcsb::Endpoints;
use crate::sink::default_output_path;

pub const DEFAULT_CONFIG_FILE: &str = "kira-lh.json";
pub const DEFAULT_LABEL: &str = "entry";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub organism: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub output: Option<Utf8PathBuf>,
    #[serde(default)]
    pub exclude_components: Vec<String>,
    #[serde(default)]
    pub exclude_solvents: bool,
    #[serde(default)]
    pub require_ligands: bool,
    #[serde(default)]
    pub endpoints: Option<Endpoints>,
}

/// Command-line values; any `Some` wins over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub organism: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub label: Option<String>,
    pub output: Option<Utf8PathBuf>,
    pub exclude_solvents: bool,
    pub require_ligands: bool,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub organism: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub label: String,
    pub output: Utf8PathBuf,
    pub exclude_components: BTreeSet<String>,
    pub require_ligands: bool,
    pub endpoints: Endpoints,
}

impl ResolvedConfig {
    pub fn criteria(&self) -> Result<SearchCriteria, HarvestError> {
        let required = |value: &Option<String>, name: &str| {
            value
                .clone()
                .ok_or_else(|| HarvestError::MissingCriterion(name.to_string()))
        };
        Ok(SearchCriteria {
            organism: required(&self.organism, "organism")?,
            title: required(&self.title, "title")?,
            description: required(&self.description, "description")?,
        })
    }

    pub fn harvest_options(&self) -> HarvestOptions {
        HarvestOptions {
            aggregate: AggregateOptions {
                label: self.label.clone(),
                exclude_components: self.exclude_components.clone(),
            },
            require_ligands: self.require_ligands,
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads the config file. Without an explicit path a missing
    /// `kira-lh.json` yields an empty config.
    pub fn load(path: Option<&str>) -> Result<Config, HarvestError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| HarvestError::ConfigRead(config_path.clone()))?;
        serde_json::from_str(&content).map_err(|err| HarvestError::ConfigParse(err.to_string()))
    }

    pub fn resolve(
        path: Option<&str>,
        overrides: ConfigOverrides,
    ) -> Result<ResolvedConfig, HarvestError> {
        let config = Self::load(path)?;
        Ok(Self::resolve_config(config, overrides))
    }

    pub fn resolve_config(config: Config, overrides: ConfigOverrides) -> ResolvedConfig {
        let mut exclude_components: BTreeSet<String> = config
            .exclude_components
            .into_iter()
            .map(|component| component.trim().to_uppercase())
            .filter(|component| !component.is_empty())
            .collect();
        if config.exclude_solvents || overrides.exclude_solvents {
            exclude_components.extend(solvent_components());
        }

        ResolvedConfig {
            organism: overrides.organism.or(config.organism),
            title: overrides.title.or(config.title),
            description: overrides.description.or(config.description),
            label: overrides
                .label
                .or(config.label)
                .unwrap_or_else(|| DEFAULT_LABEL.to_string()),
            output: overrides
                .output
                .or(config.output)
                .unwrap_or_else(default_output_path),
            exclude_components,
            require_ligands: config.require_ligands || overrides.require_ligands,
            endpoints: config.endpoints.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn resolve_defaults() {
        let resolved = ConfigLoader::resolve_config(Config::default(), ConfigOverrides::default());
        assert_eq!(resolved.label, DEFAULT_LABEL);
        assert_eq!(resolved.output, default_output_path());
        assert!(resolved.exclude_components.is_empty());
        assert!(!resolved.require_ligands);
        assert_eq!(resolved.endpoints, Endpoints::default());
    }

    #[test]
    fn missing_criterion_is_reported_by_name() {
        let resolved = ConfigLoader::resolve_config(
            Config {
                organism: Some("Homo sapiens".to_string()),
                title: Some("BRD4".to_string()),
                ..Config::default()
            },
            ConfigOverrides::default(),
        );
        let err = resolved.criteria().unwrap_err();
        assert_matches!(err, HarvestError::MissingCriterion(name) if name == "description");
    }
}
