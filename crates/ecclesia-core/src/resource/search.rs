//! Search/category filter over fetched records.

use super::Resource;

/// A search term, prepared once per filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    lower: String,
}

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            lower: raw.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Case-insensitive substring match. Absent text never matches.
    pub fn matches_text(&self, text: Option<&str>) -> bool {
        text.is_some_and(|t| t.to_lowercase().contains(&self.lower))
    }

    /// Exact substring match, for identifiers such as document numbers.
    pub fn matches_exact(&self, text: Option<&str>) -> bool {
        text.is_some_and(|t| t.contains(&self.raw))
    }
}

/// Records matching `term` and, when given, equal to `category`.
///
/// An empty term matches everything, so `filter_records(r, "", None)`
/// returns every record in order.
pub fn filter_records<'a, R: Resource>(
    records: &'a [R],
    term: &str,
    category: Option<R::Category>,
) -> Vec<&'a R> {
    let term = SearchTerm::new(term);

    records
        .iter()
        .filter(|record| term.is_empty() || record.matches(&term))
        .filter(|record| match category {
            Some(wanted) => record.category() == Some(wanted),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_matching() {
        let term = SearchTerm::new("SIL");
        assert!(term.matches_text(Some("Maria Silva")));
        assert!(!term.matches_text(None));
        assert!(!term.matches_exact(Some("Maria Silva")));
        assert!(SearchTerm::new("123.4").matches_exact(Some("123.456.789-00")));
    }
}
