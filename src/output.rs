use std::io::{self, Write};

use serde::Serialize;

use crate::pipeline::{HarvestSummary, ProgressEvent, ProgressSink};
use crate::query::SearchQuery;

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Interactive,
    NonInteractive,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_summary(summary: &HarvestSummary) -> io::Result<()> {
        Self::print_json(summary)
    }

    pub fn print_query(query: &SearchQuery) -> io::Result<()> {
        Self::print_json(query)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, _event: ProgressEvent) {}
}

/// Progress lines on stderr, summary on stdout.
pub struct TextOutput;

impl TextOutput {
    pub fn print_summary(summary: &HarvestSummary) {
        let green = "\x1b[32m";
        let yellow = "\x1b[33m";
        let cyan = "\x1b[36m";
        let reset = "\x1b[0m";

        println!("{cyan}KIRA-LH summary{reset}");
        println!("{cyan}Entries found: {}{reset}", summary.found);
        println!("{green}Rows written: {}{reset}", summary.written);
        if summary.skipped > 0 {
            println!("{yellow}Entries skipped: {}{reset}", summary.skipped);
        }
        if summary.filtered > 0 {
            println!("{yellow}Entries without ligands: {}{reset}", summary.filtered);
        }
        if let Some(output) = &summary.output {
            println!("{green}Output: {output}{reset}");
        }
    }
}

impl ProgressSink for TextOutput {
    fn event(&self, event: ProgressEvent) {
        eprintln!("{}", event.message);
    }
}
