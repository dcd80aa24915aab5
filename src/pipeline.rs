use camino::Utf8PathBuf;
use serde::Serialize;
use tracing::{info, warn};

use crate::aggregate::{AggregateOptions, RecordAggregator};
use crate::domain::{EMPTY_SENTINEL, EntryId, Lookup};
use crate::error::HarvestError;
use crate::query::SearchQuery;
use crate::rcsb::RcsbClient;
use crate::search::search;
use crate::sink::RecordSink;

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

/// Where the entry ids of a run come from.
#[derive(Debug, Clone)]
pub enum IdSource {
    Search(SearchQuery),
    Explicit(Vec<EntryId>),
}

#[derive(Debug, Clone, Default)]
pub struct HarvestOptions {
    pub aggregate: AggregateOptions,
    /// Entries with no ligands are not written.
    pub require_ligands: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HarvestSummary {
    pub found: usize,
    pub written: usize,
    pub skipped: usize,
    pub filtered: usize,
    pub output: Option<Utf8PathBuf>,
}

impl HarvestSummary {
    pub fn with_output(mut self, output: Utf8PathBuf) -> Self {
        self.output = Some(output);
        self
    }
}

/// Pairs each item with its 1-based position in the original list.
pub fn ordinals<T>(items: &[T]) -> impl Iterator<Item = (usize, &T)> {
    items.iter().enumerate().map(|(index, item)| (index + 1, item))
}

pub struct Harvester<R: RcsbClient> {
    client: R,
    options: HarvestOptions,
}

impl<R: RcsbClient> Harvester<R> {
    pub fn new(client: R, options: HarvestOptions) -> Self {
        Self { client, options }
    }

    pub fn into_client(self) -> R {
        self.client
    }

    pub fn resolve_ids(
        &self,
        source: IdSource,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<Lookup<EntryId>>, HarvestError> {
        match source {
            IdSource::Search(query) => {
                progress.event(ProgressEvent {
                    message: "phase=Search; querying RCSB".to_string(),
                });
                search(&self.client, &query)
            }
            IdSource::Explicit(ids) => Ok(ids.into_iter().map(Lookup::Found).collect()),
        }
    }

    /// Processes entries one at a time and appends each record as soon as it
    /// is built. Only search and sink failures abort the run.
    pub fn run(
        &self,
        source: IdSource,
        sink: &mut dyn RecordSink,
        progress: &dyn ProgressSink,
    ) -> Result<HarvestSummary, HarvestError> {
        let ids = self.resolve_ids(source, progress)?;
        let aggregator = RecordAggregator::new(&self.client, &self.options.aggregate);
        let mut summary = HarvestSummary {
            found: ids.len(),
            ..HarvestSummary::default()
        };

        for (ordinal, hit) in ordinals(&ids) {
            let id = match hit {
                Lookup::Found(id) => id,
                Lookup::Skipped(reason) => {
                    warn!(ordinal, %reason, "skipping search hit");
                    progress.event(ProgressEvent {
                        message: format!("phase=Fetch; skipped hit {ordinal}: {reason}"),
                    });
                    summary.skipped += 1;
                    continue;
                }
            };
            progress.event(ProgressEvent {
                message: format!("phase=Fetch; {ordinal}/{} {id}", ids.len()),
            });
            let record = match aggregator.aggregate(ordinal, id) {
                Lookup::Found(record) => record,
                Lookup::Skipped(reason) => {
                    warn!(entry = %id, ordinal, %reason, "skipping entry");
                    progress.event(ProgressEvent {
                        message: format!("phase=Fetch; skipped {id}: {reason}"),
                    });
                    summary.skipped += 1;
                    continue;
                }
            };
            if self.options.require_ligands && record.ligands == EMPTY_SENTINEL {
                info!(entry = %id, ordinal, "no ligands; not written");
                summary.filtered += 1;
                continue;
            }
            sink.append(&record)?;
            summary.written += 1;
        }

        info!(
            found = summary.found,
            written = summary.written,
            skipped = summary.skipped,
            filtered = summary.filtered,
            "harvest finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_start_at_one() {
        let ids = vec![EntryId::new("1ABC").unwrap(), EntryId::new("2XYZ").unwrap()];
        let numbered: Vec<(usize, &str)> = ordinals(&ids)
            .map(|(ordinal, id)| (ordinal, id.as_str()))
            .collect();
        assert_eq!(numbered, vec![(1, "1ABC"), (2, "2XYZ")]);
    }
}
