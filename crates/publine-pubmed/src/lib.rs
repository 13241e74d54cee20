//! Publine PubMed - PubMed search-to-CSV pipeline
//!
//! Searches PubMed through NCBI E-utilities, fetches each hit, pulls out
//! title, publication date, author affiliations and corresponding-author
//! email, and writes one CSV row per article.
//!
//! # Example
//!
//! ```ignore
//! use publine_core::ProgressContext;
//! use publine_pubmed::{Config, Query, run};
//!
//! let config = Config {
//!     output_path: "papers.csv".into(),
//!     ..Default::default()
//! };
//! let query = Query::new("crispr therapy").with_max_results(20);
//!
//! let summary = run(&config, &query, &ProgressContext::new())?;
//! println!("Wrote {} papers", summary.papers_written);
//! ```

pub mod config;
pub mod eutils;
pub mod parser;
pub mod runner;
pub mod schema;
pub mod search;
pub mod transform;
pub mod worker;
mod xml;

// Re-exports
pub use config::Config;
pub use runner::{Summary, run, write_csv};
pub use search::{Query, parse_id_list};
pub use transform::{ExtractedPaper, extract_paper, is_industry_affiliation};
