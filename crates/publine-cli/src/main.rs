//! publine - PubMed search to CSV
//!
//! Searches PubMed for a query, fetches every hit and writes one CSV row per
//! article with its non-academic authors and company affiliations.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

mod config;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "publine")]
#[command(about = "Fetch PubMed papers and flag industry-affiliated authors")]
#[command(version)]
struct Cli {
    /// PubMed search query (full PubMed syntax)
    query: String,

    /// Output CSV file [default: papers.csv]
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Warnings and errors only
    #[arg(short, long, conflicts_with = "debug")]
    quiet: bool,

    /// Maximum number of search hits to fetch (passed to PubMed as-is) [default: 10]
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    max_results: Option<i64>,

    /// Milliseconds to wait between record fetches [default: 1000]
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Config file path (default: ./publine.toml or ~/.config/publine/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Pipeline settings: config file values, CLI overrides
    fn pipeline(&self, config: &Config) -> (publine_pubmed::Config, publine_pubmed::Query) {
        let pm_config = publine_pubmed::Config {
            esearch_url: config.pubmed.esearch_url.clone(),
            efetch_url: config.pubmed.efetch_url.clone(),
            database: config.pubmed.database.clone(),
            output_path: self
                .file
                .clone()
                .unwrap_or_else(|| config.output.default_file.clone()),
            request_delay: Duration::from_millis(
                self.delay_ms.unwrap_or(config.pubmed.request_delay_ms),
            ),
        };
        let query = publine_pubmed::Query::new(self.query.clone())
            .with_max_results(self.max_results.unwrap_or(config.pubmed.max_results));
        (pm_config, query)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = publine_core::ProgressContext::new();

    // Logging:
    //   TTY:     quiet (warn) unless --debug, the progress bar shows activity
    //   non-TTY: info unless --debug/--quiet, logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = cli.quiet || (is_tty && !cli.debug);
    publine_core::init_logging(quiet, cli.debug, multi)?;

    let config = if let Some(path) = &cli.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    let (pm_config, query) = cli.pipeline(&config);
    log::debug!("Output: {}", pm_config.output_path.display());
    log::debug!("Request delay: {:?}", pm_config.request_delay);

    let summary = publine_pubmed::run(&pm_config, &query, &progress)?;

    if !cli.quiet {
        print_summary(
            "PubMed",
            &[
                ("Query", query.term.clone()),
                ("PMIDs found", summary.pmids_found.to_string()),
                ("Papers written", summary.papers_written.to_string()),
                ("Output", summary.output_path.display().to_string()),
                ("Time", format!("{:.1}s", summary.elapsed.as_secs_f64())),
            ],
        );
    }

    Ok(())
}

fn print_summary(title: &str, rows: &[(&str, String)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new(title).fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    eprintln!("\n{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("publine").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn query_is_required() {
        assert!(Cli::try_parse_from(["publine"]).is_err());
    }

    #[test]
    fn defaults_come_from_config() {
        let cli = parse(&["cancer immunotherapy"]);
        let (pm_config, query) = cli.pipeline(&Config::default());

        assert_eq!(pm_config.output_path, PathBuf::from("papers.csv"));
        assert_eq!(pm_config.request_delay, Duration::from_secs(1));
        assert_eq!(pm_config.database, "pubmed");
        assert_eq!(query.term, "cancer immunotherapy");
        assert_eq!(query.max_results, 10);
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        config.output.default_file = PathBuf::from("from-config.csv");
        config.pubmed.max_results = 99;
        config.pubmed.request_delay_ms = 5000;

        let cli = parse(&["-f", "out.csv", "-n", "3", "--delay-ms", "250", "crispr"]);
        let (pm_config, query) = cli.pipeline(&config);

        assert_eq!(pm_config.output_path, PathBuf::from("out.csv"));
        assert_eq!(pm_config.request_delay, Duration::from_millis(250));
        assert_eq!(query.max_results, 3);
    }

    #[test]
    fn negative_cap_accepted() {
        let cli = parse(&["--max-results", "-1", "crispr"]);
        assert_eq!(cli.max_results, Some(-1));
        let cli = parse(&["-n", "-5", "crispr"]);
        assert_eq!(cli.max_results, Some(-5));
    }

    #[test]
    fn debug_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["publine", "-d", "-q", "x"]).is_err());
        assert!(parse(&["-d", "x"]).debug);
        assert!(parse(&["--quiet", "x"]).quiet);
    }
}
