//! Bulk selection state

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracklist_core::TrackId;

/// Whether the list is in multi-select mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    Browsing,
    Selecting,
}

/// Selected ids plus the mode toggle.
///
/// The set survives page navigation and mode toggles; bulk actions only act
/// on the part of it that is visible (see [`Selection::bulk_targets`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    mode: SelectionMode,
    selected: BTreeSet<TrackId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_selecting(&self) -> bool {
        self.mode == SelectionMode::Selecting
    }

    /// Flip between browsing and selecting; the set is kept
    pub fn toggle_selection_mode(&mut self) -> SelectionMode {
        self.mode = match self.mode {
            SelectionMode::Browsing => SelectionMode::Selecting,
            SelectionMode::Selecting => SelectionMode::Browsing,
        };
        self.mode
    }

    /// Flip membership of `id`. Ignored while browsing.
    ///
    /// Returns whether `id` is selected afterwards.
    pub fn toggle_select(&mut self, id: &TrackId) -> bool {
        if !self.is_selecting() {
            return self.is_selected(id);
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
        self.is_selected(id)
    }

    /// Select exactly the visible ids, or clear if they already are.
    ///
    /// Applying it twice restores the original set when that set was empty
    /// or exactly the visible ids.
    pub fn select_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a TrackId>) {
        let visible: BTreeSet<TrackId> = visible.into_iter().cloned().collect();
        if !visible.is_empty() && self.selected == visible {
            self.selected.clear();
        } else {
            self.selected = visible;
        }
    }

    pub fn is_selected(&self, id: &TrackId) -> bool {
        self.selected.contains(id)
    }

    /// Whether every visible id is selected
    pub fn all_selected<'a>(&self, visible: impl IntoIterator<Item = &'a TrackId>) -> bool {
        let mut any = false;
        for id in visible {
            any = true;
            if !self.selected.contains(id) {
                return false;
            }
        }
        any
    }

    pub fn selected(&self) -> impl Iterator<Item = &TrackId> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected ids that are on the current page, in page order
    pub fn bulk_targets<'a>(&self, visible: impl IntoIterator<Item = &'a TrackId>) -> Vec<TrackId> {
        visible
            .into_iter()
            .filter(|id| self.selected.contains(*id))
            .cloned()
            .collect()
    }

    /// Reset after a successful bulk action
    pub fn finish_bulk_action(&mut self) {
        self.selected.clear();
        self.mode = SelectionMode::Browsing;
    }
}
