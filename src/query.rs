//! Structured search expressions for the RCSB search API.
//!
//! https://search.rcsb.org/#search-api

use serde::Serialize;

pub const ORGANISM_ATTRIBUTE: &str = "rcsb_entity_source_organism.taxonomy_lineage.name";
pub const TITLE_ATTRIBUTE: &str = "struct.title";
pub const DESCRIPTION_ATTRIBUTE: &str = "struct.pdbx_descriptor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    ExactMatch,
    ContainsPhrase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    And,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnType {
    Entry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalParameters {
    pub attribute: String,
    pub operator: Operator,
    pub value: String,
}

/// Node of a search expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchNode {
    Terminal {
        service: Service,
        parameters: TerminalParameters,
    },
    Group {
        logical_operator: LogicalOperator,
        nodes: Vec<SearchNode>,
    },
}

impl SearchNode {
    pub fn text(attribute: &str, operator: Operator, value: &str) -> Self {
        SearchNode::Terminal {
            service: Service::Text,
            parameters: TerminalParameters {
                attribute: attribute.to_string(),
                operator,
                value: value.to_string(),
            },
        }
    }

    pub fn and(nodes: Vec<SearchNode>) -> Self {
        SearchNode::Group {
            logical_operator: LogicalOperator::And,
            nodes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestOptions {
    pub return_all_hits: bool,
}

/// Complete request body sent to the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub query: SearchNode,
    pub return_type: ReturnType,
    pub request_options: RequestOptions,
}

impl SearchQuery {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    pub organism: String,
    pub title: String,
    pub description: String,
}

pub struct QueryBuilder;

impl QueryBuilder {
    /// Entries whose organism lineage matches exactly, whose title contains
    /// the title phrase and whose chain descriptions contain the description
    /// phrase. Inputs are not validated locally.
    pub fn build(criteria: &SearchCriteria) -> SearchQuery {
        SearchQuery {
            query: SearchNode::and(vec![
                SearchNode::text(
                    ORGANISM_ATTRIBUTE,
                    Operator::ExactMatch,
                    &criteria.organism,
                ),
                SearchNode::text(TITLE_ATTRIBUTE, Operator::ContainsPhrase, &criteria.title),
                SearchNode::text(
                    DESCRIPTION_ATTRIBUTE,
                    Operator::ContainsPhrase,
                    &criteria.description,
                ),
            ]),
            return_type: ReturnType::Entry,
            request_options: RequestOptions {
                return_all_hits: true,
            },
        }
    }
}
