// Case-insensitive substring search over list view models.

use crate::model::{DraftSummary, Friend, PublicDraft};

/// A list item that can be matched against a search box.
pub trait Searchable {
    /// The text the search box matches against (a title or a name).
    fn search_text(&self) -> &str;
}

impl Searchable for DraftSummary {
    fn search_text(&self) -> &str {
        &self.title
    }
}

impl Searchable for PublicDraft {
    fn search_text(&self) -> &str {
        &self.title
    }
}

impl Searchable for Friend {
    fn search_text(&self) -> &str {
        &self.name
    }
}

/// Keep the items whose search text contains `query`, ignoring case.
///
/// An empty query matches everything. Order is preserved.
pub fn filter_by_query<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let query_lower = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            query_lower.is_empty() || item.search_text().to_lowercase().contains(&query_lower)
        })
        .collect()
}
