//! Main runner for PubMed pipeline

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use publine_core::{CsvSink, ProgressContext};

use crate::config::Config;
use crate::eutils::esearch;
use crate::schema::COLUMNS;
use crate::search::{Query, parse_id_list};
use crate::transform::ExtractedPaper;
use crate::worker;

/// Pipeline execution summary
#[derive(Debug)]
pub struct Summary {
    pub pmids_found: usize,
    pub papers_written: usize,
    pub output_path: PathBuf,
    pub elapsed: Duration,
}

/// Run the PubMed pipeline: search, fetch each PMID in order, write the CSV.
///
/// Strictly sequential with `config.request_delay` between fetches. Any
/// failure aborts before the CSV is written, so no partial file is produced.
pub fn run(config: &Config, query: &Query, progress: &ProgressContext) -> Result<Summary> {
    let start = Instant::now();

    log::info!(
        "Searching PubMed for {:?} (max {} results)",
        query.term,
        query.max_results
    );
    let body = esearch(config, query)?;
    let pmids = parse_id_list(&body).context("Failed to parse esearch response")?;
    log::info!("Found {} PMIDs", pmids.len());

    let pb = progress.count_bar("fetch", pmids.len() as u64);
    let mut papers: Vec<ExtractedPaper> = Vec::with_capacity(pmids.len());

    for (i, pmid) in pmids.iter().enumerate() {
        if i > 0 && !config.request_delay.is_zero() {
            std::thread::sleep(config.request_delay);
        }

        pb.set_message(pmid.clone());
        log::debug!("Fetching details for PMID {pmid}");

        let rows = match worker::process_record(config, pmid) {
            Ok(rows) => rows,
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        };
        if rows.is_empty() {
            log::warn!("PMID {pmid}: efetch response contained no PubmedArticle");
        }
        papers.extend(rows);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let papers_written = write_csv(&config.output_path, &papers)?;
    log::info!("Results saved to {}", config.output_path.display());

    let summary = Summary {
        pmids_found: pmids.len(),
        papers_written,
        output_path: config.output_path.clone(),
        elapsed: start.elapsed(),
    };
    log::debug!("Pipeline finished in {:.1}s", summary.elapsed.as_secs_f64());

    Ok(summary)
}

/// Write header + one row per paper to `path`, replacing any existing file.
pub fn write_csv(path: &Path, papers: &[ExtractedPaper]) -> Result<usize> {
    let mut sink = CsvSink::create(path, &COLUMNS)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    for paper in papers {
        sink.write_row(paper.to_record())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    sink.finalize()
        .with_context(|| format!("Failed to finalize {}", path.display()))
}
