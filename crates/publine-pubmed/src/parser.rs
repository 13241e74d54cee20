//! efetch XML parser using quick-xml
//!
//! Pulls the handful of fields the CSV export needs out of each
//! `PubmedArticle`. Absent elements stay `None`; an element that is present
//! but empty reads as `Some("")`.

use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::xml::{RootTracker, read_text, reader};

/// Fields extracted from one `PubmedArticle` element
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PubmedArticle {
    /// First `PMID` descendant
    pub pmid: Option<String>,
    /// First `ArticleTitle` descendant
    pub title: Option<String>,
    /// First `PubDate` descendant
    pub pub_date: Option<PubDate>,
    /// Every `Author` descendant, document order
    pub authors: Vec<Author>,
    /// `Email` under the first `CorrespondingAuthor` that has one
    pub corresponding_email: Option<String>,
}

/// `PubDate` components, verbatim (`Month` may be `05` or `May`)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PubDate {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Author {
    pub last_name: Option<String>,
    pub fore_name: Option<String>,
    /// First `AffiliationInfo/Affiliation`
    pub affiliation: Option<String>,
}

/// Parse every `PubmedArticle` below the root of an efetch response.
///
/// Any XML error fails the whole document.
pub fn parse_articles(xml: &str) -> Result<Vec<PubmedArticle>> {
    let mut reader = reader(xml);
    let mut tracker = RootTracker::default();
    let mut articles = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).context("XML parse error")? {
            Event::Start(e) if tracker.depth() > 0 && e.name().as_ref() == b"PubmedArticle" => {
                tracker.open()?;
                articles.push(parse_article(&mut reader)?);
                tracker.close();
            }
            Event::Start(_) => tracker.open()?,
            Event::Empty(e) => {
                if tracker.depth() > 0 && e.name().as_ref() == b"PubmedArticle" {
                    articles.push(PubmedArticle::default());
                }
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
    Ok(articles)
}

/// Walk one `PubmedArticle` subtree, taking the first match for single-valued fields.
fn parse_article(reader: &mut Reader<&[u8]>) -> Result<PubmedArticle> {
    let mut article = PubmedArticle::default();
    let mut buf = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf).context("XML parse error")? {
            Event::Start(e) => match e.name().as_ref() {
                b"PMID" if article.pmid.is_none() => article.pmid = Some(read_text(reader)?),
                b"ArticleTitle" if article.title.is_none() => {
                    article.title = Some(read_text(reader)?)
                }
                b"PubDate" if article.pub_date.is_none() => {
                    article.pub_date = Some(parse_pub_date(reader)?)
                }
                b"Author" => article.authors.push(parse_author(reader)?),
                b"CorrespondingAuthor" if article.corresponding_email.is_none() => {
                    article.corresponding_email = parse_corresponding_author(reader)?
                }
                _ => depth += 1,
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"PMID" if article.pmid.is_none() => article.pmid = Some(String::new()),
                b"ArticleTitle" if article.title.is_none() => article.title = Some(String::new()),
                b"PubDate" if article.pub_date.is_none() => {
                    article.pub_date = Some(PubDate::default())
                }
                b"Author" => article.authors.push(Author::default()),
                _ => {}
            },
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => bail!("unexpected end of document inside <PubmedArticle>"),
            _ => {}
        }
        buf.clear();
    }

    Ok(article)
}

/// Direct `Year`/`Month`/`Day` children of `<PubDate>`; `MedlineDate` is ignored.
fn parse_pub_date(reader: &mut Reader<&[u8]>) -> Result<PubDate> {
    let mut date = PubDate::default();
    let mut buf = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf).context("XML parse error")? {
            Event::Start(e) if depth == 0 => match date_slot(&mut date, e.name().as_ref()) {
                Some(slot) if slot.is_none() => *slot = Some(read_text(reader)?),
                _ => depth += 1,
            },
            Event::Start(_) => depth += 1,
            Event::Empty(e) if depth == 0 => {
                if let Some(slot) = date_slot(&mut date, e.name().as_ref()) {
                    slot.get_or_insert_with(String::new);
                }
            }
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => bail!("unexpected end of document inside <PubDate>"),
            _ => {}
        }
        buf.clear();
    }

    Ok(date)
}

fn date_slot<'a>(date: &'a mut PubDate, name: &[u8]) -> Option<&'a mut Option<String>> {
    match name {
        b"Year" => Some(&mut date.year),
        b"Month" => Some(&mut date.month),
        b"Day" => Some(&mut date.day),
        _ => None,
    }
}

/// Direct `LastName`/`ForeName` children and the first affiliation of `<Author>`.
fn parse_author(reader: &mut Reader<&[u8]>) -> Result<Author> {
    let mut author = Author::default();
    let mut buf = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf).context("XML parse error")? {
            Event::Start(e) if depth == 0 => match e.name().as_ref() {
                b"LastName" if author.last_name.is_none() => {
                    author.last_name = Some(read_text(reader)?)
                }
                b"ForeName" if author.fore_name.is_none() => {
                    author.fore_name = Some(read_text(reader)?)
                }
                b"AffiliationInfo" if author.affiliation.is_none() => {
                    author.affiliation = parse_affiliation_info(reader)?
                }
                _ => depth += 1,
            },
            Event::Start(_) => depth += 1,
            Event::Empty(e) if depth == 0 => match e.name().as_ref() {
                b"LastName" if author.last_name.is_none() => author.last_name = Some(String::new()),
                b"ForeName" if author.fore_name.is_none() => author.fore_name = Some(String::new()),
                _ => {}
            },
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => bail!("unexpected end of document inside <Author>"),
            _ => {}
        }
        buf.clear();
    }

    Ok(author)
}

/// First direct `Affiliation` child of `<AffiliationInfo>`, if any
fn parse_affiliation_info(reader: &mut Reader<&[u8]>) -> Result<Option<String>> {
    first_child_text(reader, b"Affiliation", "AffiliationInfo")
}

/// First direct `Email` child of `<CorrespondingAuthor>`, if any
fn parse_corresponding_author(reader: &mut Reader<&[u8]>) -> Result<Option<String>> {
    first_child_text(reader, b"Email", "CorrespondingAuthor")
}

/// Consume the current element, returning the text of its first direct `child`.
fn first_child_text(
    reader: &mut Reader<&[u8]>,
    child: &[u8],
    parent: &str,
) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut found = None;

    loop {
        match reader.read_event_into(&mut buf).context("XML parse error")? {
            Event::Start(e) if depth == 0 && found.is_none() && e.name().as_ref() == child => {
                found = Some(read_text(reader)?);
            }
            Event::Start(_) => depth += 1,
            Event::Empty(e) if depth == 0 && found.is_none() && e.name().as_ref() == child => {
                found = Some(String::new());
            }
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => bail!("unexpected end of document inside <{parent}>"),
            _ => {}
        }
        buf.clear();
    }

    Ok(found)
}
