//! Search capability: cursor-paginated retrieval of raw posts.

use super::error::CapabilityError;
use crate::model::RawItem;

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    /// Raw posts, in the order the service returned them.
    pub items: Vec<RawItem>,
    /// Opaque continuation token for the next page.
    pub next_cursor: Option<String>,
    /// Whether the service claims there is more to read.
    pub has_more: bool,
}

impl SearchPage {
    /// Whether another page can be requested after this one.
    pub fn can_continue(&self) -> bool {
        self.has_more && self.next_cursor.is_some() && !self.items.is_empty()
    }
}

/// The ability to page through a search index.
///
/// # Laws
///
/// - **L1 (Cursor-Continuation)**: passing a page's `next_cursor` back in
///   returns the page that follows it.
///   ```text
///   search(q, None) == p1
///   search(q, p1.next_cursor) == p2   // the page after p1
///   ```
///
/// - **L2 (Exhaustion)**: a page without `next_cursor` is the last page.
///
/// This trait is **object-safe** and can be used as `dyn SearchSource`.
pub trait SearchSource {
    fn search(&self, query: &str, cursor: Option<&str>) -> Result<SearchPage, CapabilityError>;
}

impl<T: SearchSource + ?Sized> SearchSource for &T {
    fn search(&self, query: &str, cursor: Option<&str>) -> Result<SearchPage, CapabilityError> {
        (**self).search(query, cursor)
    }
}
