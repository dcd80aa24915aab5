pub mod aggregate;
pub mod chain;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod ids;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod rcsb;
pub mod search;
pub mod sink;
