//! CSV output layout

/// Placeholder written for any field missing from the source record
pub const NOT_AVAILABLE: &str = "N/A";

/// Separator for multi-valued cells (author names, affiliations)
pub const LIST_SEPARATOR: &str = ", ";

/// Output columns, in file order
pub const COLUMNS: [&str; 6] = [
    "PubMedID",
    "Title",
    "Publication Date",
    "Non-academic Authors",
    "Company Affiliations",
    "Corresponding Author Email",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_order() {
        assert_eq!(COLUMNS[0], "PubMedID");
        assert_eq!(COLUMNS[2], "Publication Date");
        assert_eq!(COLUMNS[5], "Corresponding Author Email");
    }
}
