//! Page-number strip shown below a result list.

use std::collections::BTreeSet;

/// Pages shown on each side of the current page before widening.
pub const HALF_WINDOW: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEntry {
    /// Jumps to the first page.
    Prev { target: u32, enabled: bool },
    Page { number: u32, is_current: bool },
    Ellipsis,
    /// Jumps to the last page.
    Next { target: u32, enabled: bool },
}

impl PageEntry {
    /// Page this entry navigates to, if it is clickable.
    pub fn target(&self) -> Option<u32> {
        match *self {
            PageEntry::Prev { target, enabled } | PageEntry::Next { target, enabled } => {
                enabled.then_some(target)
            }
            PageEntry::Page { number, is_current } => (!is_current).then_some(number),
            PageEntry::Ellipsis => None,
        }
    }
}

/// Builds the strip for `current` out of `total` pages.
///
/// The window around `current` grows near either edge so that roughly the same
/// number of pages is visible wherever the current page sits. `current` must
/// lie in `1..=total`.
pub fn compute_entries(current: u32, total: u32) -> Vec<PageEntry> {
    let half = widened_half_window(current, total);

    let mut pages = BTreeSet::new();
    pages.insert(1);
    pages.insert(total);
    let low = current.saturating_sub(half).max(1);
    let high = current.saturating_add(half).min(total);
    pages.extend(low..=high);

    let mut entries = Vec::with_capacity(pages.len() + 4);
    entries.push(PageEntry::Prev {
        target: 1,
        enabled: current != 1,
    });
    let mut previous: Option<u32> = None;
    for number in pages {
        if previous.is_some_and(|prev| number - prev > 1) {
            entries.push(PageEntry::Ellipsis);
        }
        entries.push(PageEntry::Page {
            number,
            is_current: number == current,
        });
        previous = Some(number);
    }
    entries.push(PageEntry::Next {
        target: total,
        enabled: current < total,
    });
    entries
}

fn widened_half_window(current: u32, total: u32) -> u32 {
    let mut half = HALF_WINDOW;
    if current < HALF_WINDOW {
        half += HALF_WINDOW - current;
    }
    let remaining = total.saturating_sub(current);
    if remaining < half {
        half += half - remaining;
    }
    half
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_window_widens_at_both_edges() {
        assert_eq!(widened_half_window(50, 100), 6);
        assert_eq!(widened_half_window(2, 100), 10);
        assert_eq!(widened_half_window(98, 100), 10);
        // Start shortfall first, then the end uses the widened value.
        assert_eq!(widened_half_window(3, 8), 9 + (9 - 5));
    }

    #[test]
    fn ellipsis_and_current_have_no_target() {
        assert_eq!(PageEntry::Ellipsis.target(), None);
        assert_eq!(
            PageEntry::Page {
                number: 4,
                is_current: true
            }
            .target(),
            None
        );
        assert_eq!(
            PageEntry::Next {
                target: 9,
                enabled: true
            }
            .target(),
            Some(9)
        );
    }
}
