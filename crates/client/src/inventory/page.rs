//! Pure pagination derivation.
//!
//! The page view is a recomputed slice of the full collection, never stored
//! independently. Recomputation runs after every mutation that changes the
//! item count and on explicit navigation.

/// Resolved page bounds for a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// The requested page clamped into `1..=total_pages`.
    pub current_page: usize,
    /// `max(ceil(total_items / page_size), 1)`; an empty collection still
    /// has one (empty) page.
    pub total_pages: usize,
    /// Start index of the visible slice (inclusive).
    pub start: usize,
    /// End index of the visible slice (exclusive).
    pub end: usize,
}

/// Derive page bounds for `total_items` items at `page_size` per page.
///
/// `requested_page` is clamped into `[1, total_pages]`, so a page left
/// dangling by deletions collapses onto the last non-empty page.
#[must_use]
pub fn bounds(total_items: usize, page_size: usize, requested_page: usize) -> PageBounds {
    debug_assert!(page_size > 0, "page size must be positive");
    let page_size = page_size.max(1);

    let total_pages = total_items.div_ceil(page_size).max(1);
    let current_page = requested_page.clamp(1, total_pages);
    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(total_items);

    PageBounds {
        current_page,
        total_pages,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_has_one_empty_page() {
        let b = bounds(0, 10, 1);
        assert_eq!(b.current_page, 1);
        assert_eq!(b.total_pages, 1);
        assert_eq!(b.start..b.end, 0..0);
    }

    #[test]
    fn partial_last_page() {
        let b = bounds(25, 10, 3);
        assert_eq!(b.total_pages, 3);
        assert_eq!(b.start..b.end, 20..25);
    }

    #[test]
    fn page_past_the_end_is_clamped_down() {
        let b = bounds(10, 10, 2);
        assert_eq!(b.current_page, 1);
        assert_eq!(b.start..b.end, 0..10);
    }

    #[test]
    fn page_zero_is_clamped_up() {
        let b = bounds(5, 10, 0);
        assert_eq!(b.current_page, 1);
    }

    #[test]
    fn invariant_holds_over_a_grid_of_inputs() {
        for total_items in 0..40 {
            for page_size in 1..7 {
                for requested in 0..9 {
                    let b = bounds(total_items, page_size, requested);
                    assert!(b.current_page >= 1);
                    assert!(b.current_page <= b.total_pages);
                    assert!(b.end - b.start <= page_size);
                    assert!(b.end <= total_items.max(b.start));
                }
            }
        }
    }
}
