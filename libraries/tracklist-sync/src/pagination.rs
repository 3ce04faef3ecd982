//! Page button window for pagination controls

use serde::{Deserialize, Serialize};

/// Pages shown either side of the current one
const WINDOW_DELTA: i64 = 2;

/// One slot in a pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageButton {
    Page(u32),
    Ellipsis,
}

/// Buttons for `page` out of `total_pages`.
///
/// The first and last pages are always present, the current page is
/// surrounded by up to two neighbours each side, and gaps collapse into
/// `Ellipsis`. Nothing is shown for fewer than two pages.
pub fn page_window(page: u32, total_pages: u32) -> Vec<PageButton> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let total = i64::from(total_pages);
    let page = i64::from(page).clamp(1, total);
    let left = (page - WINDOW_DELTA).max(2);
    let right = (page + WINDOW_DELTA).min(total - 1);

    let mut buttons = Vec::new();

    if left > 2 {
        buttons.push(PageButton::Page(1));
        buttons.push(PageButton::Ellipsis);
    } else {
        buttons.extend((1..left).map(|p| PageButton::Page(p as u32)));
    }

    buttons.extend((left..=right).map(|p| PageButton::Page(p as u32)));

    if right < total - 1 {
        buttons.push(PageButton::Ellipsis);
        buttons.push(PageButton::Page(total_pages));
    } else {
        buttons.extend((right + 1..=total).map(|p| PageButton::Page(p as u32)));
    }

    buttons
}
