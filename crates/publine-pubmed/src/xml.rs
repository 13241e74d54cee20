//! Shared quick-xml helpers for E-utilities responses

use anyhow::{Context, Result, bail, ensure};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Build a reader with the settings every E-utilities parser uses.
///
/// Text is not trimmed: element text reaches the output verbatim.
pub(crate) fn reader(xml: &str) -> Reader<&[u8]> {
    Reader::from_str(xml)
}

/// Read the text of the current element up to its first child element.
///
/// The remainder of the element (children and trailing text) is skipped,
/// so `<T>Effect of <i>X</i> on Y</T>` reads as `Effect of ` (trailing
/// space kept).
/// Call right after the element's `Start` event.
pub(crate) fn read_text(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut leading = true;
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf).context("XML parse error")? {
            Event::Text(e) if leading => text.push_str(&e.unescape()?),
            Event::CData(e) if leading => text.push_str(&String::from_utf8_lossy(&e.into_inner())),
            Event::Start(_) => {
                leading = false;
                depth += 1;
            }
            Event::Empty(_) => leading = false,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => bail!("unexpected end of document inside text element"),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Tracks document shape at the top level: exactly one root element, fully closed.
///
/// quick-xml rejects mismatched end tags on its own but happily stops at
/// EOF with elements still open; this catches truncated bodies.
#[derive(Debug, Default)]
pub(crate) struct RootTracker {
    depth: usize,
    roots: usize,
}

impl RootTracker {
    /// Element opened at the current depth
    pub(crate) fn open(&mut self) -> Result<()> {
        if self.depth == 0 {
            ensure!(self.roots == 0, "multiple root elements");
            self.roots += 1;
        }
        self.depth += 1;
        Ok(())
    }

    /// Element closed
    pub(crate) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current nesting depth (root element = 1)
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Text seen at the current depth; only whitespace may sit outside the root
    pub(crate) fn text(&self, content: &[u8]) -> Result<()> {
        ensure!(
            self.depth > 0 || content.iter().all(u8::is_ascii_whitespace),
            "text outside root element"
        );
        Ok(())
    }

    /// Document ended
    pub(crate) fn finish(&self) -> Result<()> {
        ensure!(self.roots == 1, "no root element");
        ensure!(
            self.depth == 0,
            "unexpected end of document ({} unclosed element(s))",
            self.depth
        );
        Ok(())
    }
}
