//! Search query and esearch result parsing

use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::xml::{RootTracker, read_text, reader};

/// A PubMed search: free-text term plus result cap.
///
/// The cap is passed to esearch verbatim; zero or negative values are the
/// remote service's problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub term: String,
    pub max_results: i64,
}

impl Query {
    pub const DEFAULT_MAX_RESULTS: i64 = 10;

    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            max_results: Self::DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: i64) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Extract PMIDs from an esearch response, in response order.
///
/// Reads every `Id` child of every `IdList` child of the root element.
/// A missing or empty `IdList` yields an empty list; malformed XML is an error.
pub fn parse_id_list(xml: &str) -> Result<Vec<String>> {
    let mut reader = reader(xml);
    let mut tracker = RootTracker::default();
    let mut ids = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).context("XML parse error")? {
            Event::Start(e) if tracker.depth() == 1 && e.name().as_ref() == b"IdList" => {
                tracker.open()?;
                parse_id_list_element(&mut reader, &mut ids)?;
                tracker.close();
            }
            Event::Start(_) => tracker.open()?,
            Event::Empty(_) => {
                tracker.open()?;
                tracker.close();
            }
            Event::End(_) => tracker.close(),
            Event::Text(e) => tracker.text(&e)?,
            Event::CData(e) => tracker.text(&e)?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    tracker.finish()?;
    Ok(ids)
}

/// Parse `<IdList>` block: collect direct `Id` children.
fn parse_id_list_element(reader: &mut Reader<&[u8]>, ids: &mut Vec<String>) -> Result<()> {
    let mut buf = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf).context("XML parse error")? {
            Event::Start(e) if depth == 0 && e.name().as_ref() == b"Id" => {
                let id = read_text(reader)?;
                let id = id.trim();
                if id.is_empty() {
                    log::warn!("Skipping empty <Id> in esearch response");
                } else {
                    ids.push(id.to_string());
                }
            }
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => anyhow::bail!("unexpected end of document inside <IdList>"),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
