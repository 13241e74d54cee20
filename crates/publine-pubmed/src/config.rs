//! PubMed pipeline configuration

use std::path::PathBuf;
use std::time::Duration;

/// E-utilities search endpoint
pub const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
/// E-utilities fetch endpoint
pub const EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Runtime configuration for PubMed pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// esearch.fcgi URL
    pub esearch_url: String,
    /// efetch.fcgi URL
    pub efetch_url: String,
    /// Entrez database name
    pub database: String,
    /// CSV output file (overwritten)
    pub output_path: PathBuf,
    /// Pause between consecutive efetch calls
    pub request_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            esearch_url: ESEARCH_URL.to_string(),
            efetch_url: EFETCH_URL.to_string(),
            database: "pubmed".to_string(),
            output_path: PathBuf::from("papers.csv"),
            request_delay: Duration::from_secs(1),
        }
    }
}

impl Config {
    /// Point both endpoints at `<base_url>/esearch.fcgi` and `<base_url>/efetch.fcgi`.
    ///
    /// Used for mirrors and local mock servers.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.esearch_url = format!("{base}/esearch.fcgi");
        self.efetch_url = format!("{base}/efetch.fcgi");
        self
    }
}
