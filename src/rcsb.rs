use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::{EntityId, EntryId};
use crate::error::HarvestError;
use crate::query::SearchQuery;

pub const SEARCH_URL: &str = "https://search.rcsb.org/rcsbsearch/v2/query";
pub const ENTRY_URL: &str = "https://data.rcsb.org/rest/v1/core/entry";
pub const POLYMER_ENTITY_URL: &str = "https://data.rcsb.org/rest/v1/core/polymer_entity";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_search_url")]
    pub search: String,
    #[serde(default = "default_entry_url")]
    pub entry: String,
    #[serde(default = "default_polymer_entity_url")]
    pub polymer_entity: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            search: default_search_url(),
            entry: default_entry_url(),
            polymer_entity: default_polymer_entity_url(),
        }
    }
}

fn default_search_url() -> String {
    SEARCH_URL.to_string()
}

fn default_entry_url() -> String {
    ENTRY_URL.to_string()
}

fn default_polymer_entity_url() -> String {
    POLYMER_ENTITY_URL.to_string()
}

/// Raw request/response access to the RCSB search and data APIs.
///
/// `search` returns `Value::Null` when the service answers with no content,
/// which is how it reports zero hits.
pub trait RcsbClient: Send + Sync {
    fn search(&self, query: &SearchQuery) -> Result<Value, HarvestError>;
    fn entry(&self, id: &EntryId) -> Result<Value, HarvestError>;
    fn polymer_entity(&self, id: &EntryId, entity: &EntityId) -> Result<Value, HarvestError>;
}

#[derive(Clone)]
pub struct RcsbHttpClient {
    client: Client,
    endpoints: Endpoints,
}

impl RcsbHttpClient {
    pub fn new(endpoints: Endpoints) -> Result<Self, HarvestError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("kira-lh/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| HarvestError::RcsbHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| HarvestError::RcsbHttp(err.to_string()))?;
        Ok(Self { client, endpoints })
    }

    pub fn entry_url(&self, id: &EntryId) -> String {
        format!("{}/{}", self.endpoints.entry.trim_end_matches('/'), id)
    }

    pub fn polymer_entity_url(&self, id: &EntryId, entity: &EntityId) -> String {
        format!(
            "{}/{}/{}",
            self.endpoints.polymer_entity.trim_end_matches('/'),
            id,
            entity
        )
    }

    fn get_json(&self, url: &str) -> Result<Value, HarvestError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| HarvestError::RcsbHttp(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "RCSB request failed".to_string());
            return Err(HarvestError::RcsbStatus { status, message });
        }
        response
            .json()
            .map_err(|err| HarvestError::RcsbParse(err.to_string()))
    }
}

impl RcsbClient for RcsbHttpClient {
    fn search(&self, query: &SearchQuery) -> Result<Value, HarvestError> {
        debug!(url = %self.endpoints.search, "POST");
        let response = self
            .client
            .post(&self.endpoints.search)
            .json(query)
            .send()
            .map_err(|err| HarvestError::SearchHttp(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "RCSB search failed".to_string());
            return Err(HarvestError::SearchStatus {
                status: status.as_u16(),
                message,
            });
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        response
            .json()
            .map_err(|err| HarvestError::SearchParse(err.to_string()))
    }

    fn entry(&self, id: &EntryId) -> Result<Value, HarvestError> {
        self.get_json(&self.entry_url(id))
    }

    fn polymer_entity(&self, id: &EntryId, entity: &EntityId) -> Result<Value, HarvestError> {
        self.get_json(&self.polymer_entity_url(id, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_urls_interpolate_ids() {
        let client = RcsbHttpClient::new(Endpoints {
            entry: "http://localhost:8080/entry/".to_string(),
            ..Endpoints::default()
        })
        .unwrap();
        let id = EntryId::new("1abc").unwrap();
        let entity = EntityId::new("2").unwrap();

        assert_eq!(client.entry_url(&id), "http://localhost:8080/entry/1abc");
        assert_eq!(
            client.polymer_entity_url(&id, &entity),
            "https://data.rcsb.org/rest/v1/core/polymer_entity/1abc/2"
        );
    }

    #[test]
    fn endpoints_default_when_missing_from_json() {
        let endpoints: Endpoints =
            serde_json::from_str(r#"{"search": "http://mirror/query"}"#).unwrap();
        assert_eq!(endpoints.search, "http://mirror/query");
        assert_eq!(endpoints.entry, ENTRY_URL);
        assert_eq!(endpoints.polymer_entity, POLYMER_ENTITY_URL);
    }
}
