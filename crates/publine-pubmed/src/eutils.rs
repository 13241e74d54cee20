//! NCBI E-utilities requests (esearch, efetch)
//!
//! One GET per call, no retry: any transport failure or non-success status
//! is returned to the caller.

use anyhow::{Context, Result};
use publine_core::get_text;

use crate::config::Config;
use crate::search::Query;

/// Query parameters for an esearch call
fn esearch_params(config: &Config, query: &Query) -> [(&'static str, String); 4] {
    [
        ("db", config.database.clone()),
        ("term", query.term.clone()),
        ("retmax", query.max_results.to_string()),
        ("retmode", "xml".to_string()),
    ]
}

/// Query parameters for an efetch call
fn efetch_params(config: &Config, pmid: &str) -> [(&'static str, String); 3] {
    [
        ("db", config.database.clone()),
        ("id", pmid.to_string()),
        ("retmode", "xml".to_string()),
    ]
}

/// Run an esearch and return the raw XML body
pub fn esearch(config: &Config, query: &Query) -> Result<String> {
    log::debug!("esearch {} term={:?}", config.esearch_url, query.term);
    get_text(&config.esearch_url, &esearch_params(config, query))
        .with_context(|| format!("esearch failed for query {:?}", query.term))
}

/// Fetch one record and return the raw XML body
pub fn efetch(config: &Config, pmid: &str) -> Result<String> {
    get_text(&config.efetch_url, &efetch_params(config, pmid))
        .with_context(|| format!("efetch failed for PMID {pmid}"))
}
