//! Property-based tests for query state, selection and pagination
//!
//! Uses proptest to check invariants across random operation sequences.

use proptest::prelude::*;
use tracklist_core::{SortField, SortOrder, TrackId};
use tracklist_sync::{page_window, PageButton, QueryState, Selection};

// ===== Helpers =====

#[derive(Debug, Clone)]
enum QueryOp {
    Page(u32),
    Search(String),
    Sort(SortField),
    Order(SortOrder),
    ToggleOrder,
    Genre(String),
    Artist(String),
}

fn arbitrary_sort() -> impl Strategy<Value = SortField> {
    prop::sample::select(SortField::ALL.to_vec())
}

fn arbitrary_order() -> impl Strategy<Value = SortOrder> {
    prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)]
}

fn arbitrary_op() -> impl Strategy<Value = QueryOp> {
    prop_oneof![
        (0u32..50).prop_map(QueryOp::Page),
        "[a-c]{0,3}".prop_map(QueryOp::Search),
        arbitrary_sort().prop_map(QueryOp::Sort),
        arbitrary_order().prop_map(QueryOp::Order),
        Just(QueryOp::ToggleOrder),
        "(|Rock|Jazz)".prop_map(QueryOp::Genre),
        "(|Adele|Miles)".prop_map(QueryOp::Artist),
    ]
}

fn visible_ids() -> impl Strategy<Value = Vec<TrackId>> {
    prop::collection::hash_set("[a-z]{1,6}", 0..12)
        .prop_map(|set| set.into_iter().map(TrackId::new).collect())
}

// ===== Property Tests =====

proptest! {
    /// Property: any change other than the page lands on page 1
    #[test]
    fn non_page_change_resets_page(ops in prop::collection::vec(arbitrary_op(), 1..40)) {
        let mut query = QueryState::default();

        for op in ops {
            let before = query.clone();
            let changed = match op {
                QueryOp::Page(page) => {
                    query.set_page(page);
                    prop_assert_eq!(query.page(), page.max(1));
                    prop_assert_eq!(query.search(), before.search());
                    continue;
                }
                QueryOp::Search(text) => query.set_search(text),
                QueryOp::Sort(sort) => query.set_sort(sort),
                QueryOp::Order(order) => query.set_order(order),
                QueryOp::ToggleOrder => {
                    query.toggle_order();
                    true
                }
                QueryOp::Genre(genre) => query.set_genre(genre),
                QueryOp::Artist(artist) => query.set_artist(artist),
            };

            if changed {
                prop_assert_eq!(query.page(), 1);
            } else {
                prop_assert_eq!(&query, &before);
            }
        }
    }

    /// Property: empty filters never reach the request
    #[test]
    fn params_never_carry_empty_filters(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let mut query = QueryState::default();
        for op in ops {
            match op {
                QueryOp::Page(page) => { query.set_page(page); }
                QueryOp::Search(text) => { query.set_search(text); }
                QueryOp::Sort(sort) => { query.set_sort(sort); }
                QueryOp::Order(order) => { query.set_order(order); }
                QueryOp::ToggleOrder => query.toggle_order(),
                QueryOp::Genre(genre) => { query.set_genre(genre); }
                QueryOp::Artist(artist) => { query.set_artist(artist); }
            }
        }

        let params = query.params();
        prop_assert!(params.page >= 1);
        prop_assert!(params.genre.as_deref() != Some(""));
        prop_assert!(params.artist.as_deref() != Some(""));
    }

    /// Property: select-all twice from an empty selection is a round trip
    #[test]
    fn select_all_twice_restores_empty(visible in visible_ids()) {
        let mut selection = Selection::new();
        selection.select_all(&visible);
        selection.select_all(&visible);
        prop_assert!(selection.is_empty());
    }

    /// Property: select-all twice from a full selection is a round trip
    #[test]
    fn select_all_twice_restores_full(visible in visible_ids()) {
        let mut selection = Selection::new();
        selection.select_all(&visible);
        let original: Vec<TrackId> = selection.selected().cloned().collect();

        selection.select_all(&visible);
        selection.select_all(&visible);

        prop_assert_eq!(selection.selected().cloned().collect::<Vec<_>>(), original);
    }

    /// Property: bulk targets are always a subset of the visible ids
    #[test]
    fn bulk_targets_subset_of_visible(
        visible in visible_ids(),
        extra in prop::collection::vec("[a-z]{1,6}", 0..6),
    ) {
        let mut selection = Selection::new();
        selection.toggle_selection_mode();
        for raw in extra {
            selection.toggle_select(&TrackId::new(raw));
        }
        for id in visible.iter().step_by(2) {
            selection.toggle_select(id);
        }

        for id in selection.bulk_targets(&visible) {
            prop_assert!(visible.contains(&id));
            prop_assert!(selection.is_selected(&id));
        }
    }

    /// Property: the page window always shows first, current and last page
    #[test]
    fn page_window_contains_anchors(total in 2u32..200, page in 1u32..200) {
        let buttons = page_window(page, total);
        let current = page.min(total);

        prop_assert_eq!(buttons.first(), Some(&PageButton::Page(1)));
        prop_assert_eq!(buttons.last(), Some(&PageButton::Page(total)));
        prop_assert!(buttons.contains(&PageButton::Page(current)));

        let pages: Vec<u32> = buttons
            .iter()
            .filter_map(|b| match b {
                PageButton::Page(p) => Some(*p),
                PageButton::Ellipsis => None,
            })
            .collect();
        prop_assert!(pages.windows(2).all(|w| w[0] < w[1]));
    }
}
