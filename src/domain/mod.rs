//! Domain types for the photo search core.

pub mod events;

use crate::constants::paging::FIRST_PAGE;

/// One concrete page request: the text being searched and the 1-indexed page.
///
/// A fresh query always starts at [`FIRST_PAGE`]; paging forward clones the
/// text and advances the page by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub page: u32,
}

impl SearchQuery {
    #[must_use]
    pub fn first_page(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            page: FIRST_PAGE,
        }
    }

    #[must_use]
    pub fn next_page(&self) -> Self {
        Self {
            text: self.text.clone(),
            page: self.page + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_query_starts_at_first_page() {
        let query = SearchQuery::first_page("Amsterdam");
        assert_eq!(query.page, 1);
        assert_eq!(query.text, "Amsterdam");
    }

    #[test]
    fn next_page_keeps_text_and_advances() {
        let query = SearchQuery::first_page("Amsterdam").next_page();
        assert_eq!(query.page, 2);
        assert_eq!(query.text, "Amsterdam");
    }
}
