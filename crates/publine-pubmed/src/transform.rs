//! Transform PubmedArticle into an output row
//!
//! Absence stays `Option` all the way through; the `N/A` placeholder only
//! appears in [`ExtractedPaper::to_record`].

use std::fmt;

use crate::parser::{Author, PubDate, PubmedArticle};
use crate::schema::{LIST_SEPARATOR, NOT_AVAILABLE};

/// Lowercase substrings that mark an affiliation as industry
pub const INDUSTRY_KEYWORDS: [&str; 2] = ["pharma", "biotech"];

/// Case-insensitive substring test against [`INDUSTRY_KEYWORDS`].
pub fn is_industry_affiliation(affiliation: &str) -> bool {
    let lower = affiliation.to_lowercase();
    INDUSTRY_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Author name as listed in the non-academic column
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuthorName {
    pub fore_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<&Author> for AuthorName {
    fn from(author: &Author) -> Self {
        Self {
            fore_name: author.fore_name.clone(),
            last_name: author.last_name.clone(),
        }
    }
}

/// `"{ForeName} {LastName}"`, `N/A` for a missing part
impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.fore_name.as_deref().unwrap_or(NOT_AVAILABLE),
            self.last_name.as_deref().unwrap_or(NOT_AVAILABLE)
        )
    }
}

/// One CSV row worth of data
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractedPaper {
    pub pmid: Option<String>,
    pub title: Option<String>,
    pub publication_date: Option<PubDate>,
    pub non_academic_authors: Vec<AuthorName>,
    pub company_affiliations: Vec<String>,
    pub corresponding_email: Option<String>,
}

/// Split authors by affiliation and copy the scalar fields.
///
/// Authors with no affiliation, or one that fails the industry test, are
/// listed by name as non-academic. Industry authors contribute their raw
/// affiliation string instead of a name.
pub fn extract_paper(article: &PubmedArticle) -> ExtractedPaper {
    let mut non_academic_authors = Vec::new();
    let mut company_affiliations = Vec::new();

    for author in &article.authors {
        match author.affiliation.as_deref() {
            Some(aff) if is_industry_affiliation(aff) => company_affiliations.push(aff.to_string()),
            _ => non_academic_authors.push(AuthorName::from(author)),
        }
    }

    ExtractedPaper {
        pmid: article.pmid.clone(),
        title: article.title.clone(),
        publication_date: article.pub_date.clone(),
        non_academic_authors,
        company_affiliations,
        corresponding_email: article.corresponding_email.clone(),
    }
}

impl ExtractedPaper {
    /// `N/A` without a PubDate, otherwise `year-month-day` with `N/A` per missing part
    pub fn publication_date_text(&self) -> String {
        match &self.publication_date {
            None => NOT_AVAILABLE.to_string(),
            Some(date) => format!(
                "{}-{}-{}",
                date.year.as_deref().unwrap_or(NOT_AVAILABLE),
                date.month.as_deref().unwrap_or(NOT_AVAILABLE),
                date.day.as_deref().unwrap_or(NOT_AVAILABLE)
            ),
        }
    }

    /// Render cells in [`crate::schema::COLUMNS`] order
    pub fn to_record(&self) -> [String; 6] {
        let or_na = |v: &Option<String>| v.as_deref().unwrap_or(NOT_AVAILABLE).to_string();
        let names: Vec<String> = self
            .non_academic_authors
            .iter()
            .map(ToString::to_string)
            .collect();

        [
            or_na(&self.pmid),
            or_na(&self.title),
            self.publication_date_text(),
            names.join(LIST_SEPARATOR),
            self.company_affiliations.join(LIST_SEPARATOR),
            or_na(&self.corresponding_email),
        ]
    }
}
