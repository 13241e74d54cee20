//! Per-record processing: efetch → parse → rows

use anyhow::{Context, Result};

use crate::config::Config;
use crate::eutils::efetch;
use crate::parser::parse_articles;
use crate::transform::{ExtractedPaper, extract_paper};

/// Fetch one PMID and turn every `PubmedArticle` in the response into a row.
///
/// Normally yields exactly one row; an efetch body with no article yields none.
pub fn process_record(config: &Config, pmid: &str) -> Result<Vec<ExtractedPaper>> {
    let body = efetch(config, pmid)?;
    extract_rows(&body).with_context(|| format!("Failed to parse efetch response for PMID {pmid}"))
}

/// Parse an efetch body into rows, one per article, in document order
pub fn extract_rows(xml: &str) -> Result<Vec<ExtractedPaper>> {
    let articles = parse_articles(xml)?;
    Ok(articles.iter().map(extract_paper).collect())
}
