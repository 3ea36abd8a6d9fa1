//! In-memory search filtering.

use regex::{Regex, RegexBuilder};

use crate::column::{ColumnDef, Row};
use crate::state::Search;

/// Compiled form of a [`Search`].
#[derive(Debug)]
enum Matcher {
    /// Blank search or an invalid pattern: everything matches.
    All,
    Regex(Regex),
    /// Lower-cased whitespace-separated terms; all must be found.
    Terms(Vec<String>),
}

impl Matcher {
    fn new(search: &Search) -> Self {
        if search.value.is_empty() {
            return Self::All;
        }

        if search.regex {
            return match RegexBuilder::new(&search.value)
                .case_insensitive(true)
                .build()
            {
                Ok(re) => Self::Regex(re),
                Err(err) => {
                    log::debug!("ignoring invalid search pattern {:?}: {err}", search.value);
                    Self::All
                }
            };
        }

        let terms: Vec<String> = search
            .value
            .trim()
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if terms.is_empty() {
            Self::All
        } else {
            Self::Terms(terms)
        }
    }

    fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// `texts` holds the text of each searchable column of one row.
    fn matches(&self, texts: &[String]) -> bool {
        match self {
            Self::All => true,
            Self::Regex(re) => texts.iter().any(|text| re.is_match(text)),
            Self::Terms(terms) => {
                let lowered: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();
                terms
                    .iter()
                    .all(|term| lowered.iter().any(|text| text.contains(term.as_str())))
            }
        }
    }
}

/// Rows of `rows` matching `search`, in their original order.
///
/// - blank search: no filtering
/// - regex search: case-insensitive, any searchable column may match; an
///   invalid pattern disables filtering
/// - plain search: every whitespace-separated term must appear in at least
///   one searchable column
pub fn filter_rows<'r>(rows: &'r [Row], columns: &[ColumnDef], search: &Search) -> Vec<&'r Row> {
    let matcher = Matcher::new(search);
    if matcher.is_all() {
        return rows.iter().collect();
    }

    rows.iter()
        .filter(|row| {
            let texts: Vec<String> = columns
                .iter()
                .enumerate()
                .filter(|(_, col)| col.is_searchable())
                .map(|(index, col)| col.display_text(row, index))
                .collect();
            matcher.matches(&texts)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<ColumnDef> {
        vec![ColumnDef::new("Name"), ColumnDef::new("Position")]
    }

    fn rows() -> Vec<Row> {
        vec![
            json!(["Tiger Nixon", "System Architect"]),
            json!(["Garrett Winters", "Accountant"]),
        ]
    }

    #[test]
    fn test_terms_and_across_terms_or_across_columns() {
        let rows = rows();
        let matched = filter_rows(&rows, &columns(), &Search::text("tiger architect"));
        assert_eq!(matched, vec![&rows[0]]);

        let matched = filter_rows(&rows, &columns(), &Search::text("tiger accountant"));
        assert!(matched.is_empty());
    }

    #[test]
    fn test_blank_search_keeps_everything() {
        let rows = rows();
        assert_eq!(filter_rows(&rows, &columns(), &Search::text("")).len(), 2);
        assert_eq!(filter_rows(&rows, &columns(), &Search::text("   ")).len(), 2);
    }

    #[test]
    fn test_case_insensitive_terms() {
        let rows = rows();
        let matched = filter_rows(&rows, &columns(), &Search::text("  GARRETT  "));
        assert_eq!(matched, vec![&rows[1]]);
    }

    #[test]
    fn test_regex_matches_any_column() {
        let rows = rows();
        let matched = filter_rows(&rows, &columns(), &Search::regex("^acc"));
        assert_eq!(matched, vec![&rows[1]]);

        let matched = filter_rows(&rows, &columns(), &Search::regex("NIXON$"));
        assert_eq!(matched, vec![&rows[0]]);
    }

    #[test]
    fn test_invalid_regex_is_a_no_op() {
        let rows = rows();
        let matched = filter_rows(&rows, &columns(), &Search::regex("(unclosed"));
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn test_unsearchable_columns_are_skipped() {
        let rows = rows();
        let columns = vec![
            ColumnDef::new("Name"),
            ColumnDef::new("Position").searchable(false),
        ];
        assert!(filter_rows(&rows, &columns, &Search::text("architect")).is_empty());
    }
}
