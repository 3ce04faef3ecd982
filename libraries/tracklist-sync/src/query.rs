//! Query parameter builder
//!
//! Holds the independent pieces of list UI state and folds them into the
//! canonical `QueryParams` sent to the server.

use tracklist_core::{QueryParams, SortField, SortOrder};

/// Independent filter/sort/search/page fields.
///
/// Any change to `search`, `sort`, `order`, `genre` or `artist` resets the
/// page to 1; only [`set_page`](Self::set_page) moves the page on its own.
/// Setters return whether the value actually changed, so callers know when a
/// fetch is due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    page: u32,
    search: String,
    sort: SortField,
    order: SortOrder,
    genre: String,
    artist: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            sort: SortField::default(),
            order: SortOrder::default(),
            genre: String::new(),
            artist: String::new(),
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortField {
        self.sort
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Move to another page (clamped to 1). Keeps every other field.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// Apply a (debounced) search string
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if self.search == search {
            return false;
        }
        self.search = search;
        self.reset_page();
        true
    }

    pub fn set_sort(&mut self, sort: SortField) -> bool {
        if self.sort == sort {
            return false;
        }
        self.sort = sort;
        self.reset_page();
        true
    }

    pub fn set_order(&mut self, order: SortOrder) -> bool {
        if self.order == order {
            return false;
        }
        self.order = order;
        self.reset_page();
        true
    }

    /// Flip asc/desc
    pub fn toggle_order(&mut self) {
        self.set_order(self.order.reversed());
    }

    /// Filter by genre; an empty string clears the filter
    pub fn set_genre(&mut self, genre: impl Into<String>) -> bool {
        let genre = genre.into();
        if self.genre == genre {
            return false;
        }
        self.genre = genre;
        self.reset_page();
        true
    }

    /// Filter by artist; an empty string clears the filter
    pub fn set_artist(&mut self, artist: impl Into<String>) -> bool {
        let artist = artist.into();
        if self.artist == artist {
            return false;
        }
        self.artist = artist;
        self.reset_page();
        true
    }

    /// Canonical request descriptor; empty filters become `None`
    pub fn params(&self) -> QueryParams {
        QueryParams {
            page: self.page,
            search: self.search.clone(),
            sort: self.sort,
            order: self.order,
            genre: non_empty(&self.genre),
            artist: non_empty(&self.artist),
        }
    }

    fn reset_page(&mut self) {
        self.page = 1;
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
