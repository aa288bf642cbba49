//! Client-side pagination over an in-memory collection.
//!
//! Pages are 1-based. With `N` rows and page size `P` there are
//! `ceil(N / P)` pages and page `K` holds rows `[(K-1)*P, K*P)`. An empty
//! collection still has one (empty) page so the current page is always
//! valid.

use serde::{Deserialize, Serialize};

/// Default rows per list page.
pub const DEFAULT_PAGE_SIZE: usize = 17;

/// Current page and page size for one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginator {
    page: usize,
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// A paginator on page 1. A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` rows, never less than 1.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Move to page `k`, clamped to `[1, page_count]`. Returns the page
    /// actually selected.
    pub fn go_to(&mut self, k: usize, total: usize) -> usize {
        self.page = clamp_page(k, self.page_count(total));
        self.page
    }

    pub fn next(&mut self, total: usize) -> usize {
        self.go_to(self.page.saturating_add(1), total)
    }

    pub fn prev(&mut self, total: usize) -> usize {
        self.go_to(self.page.saturating_sub(1), total)
    }

    /// Re-clamp after the collection shrank (e.g. the last row of the last
    /// page was deleted).
    pub fn reclamp(&mut self, total: usize) {
        self.page = clamp_page(self.page, self.page_count(total));
    }

    /// Index range of the current page within `total` rows.
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let start = (self.page - 1).saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    /// Rows of the current page.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.range(rows.len())]
    }
}

/// Clamp a requested page to `[1, page_count]`.
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.max(1).min(page_count.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    // -- page_count ----------------------------------------------------------

    #[test]
    fn page_count_is_ceiling() {
        let p = Paginator::new(17);
        assert_eq!(p.page_count(0), 1);
        assert_eq!(p.page_count(1), 1);
        assert_eq!(p.page_count(17), 1);
        assert_eq!(p.page_count(18), 2);
        assert_eq!(p.page_count(40), 3);
    }

    #[test]
    fn zero_page_size_is_floored() {
        assert_eq!(Paginator::new(0).page_size(), 1);
    }

    // -- slicing -------------------------------------------------------------

    #[test]
    fn page_k_holds_expected_rows() {
        let data = rows(40);
        let mut p = Paginator::new(17);
        assert_eq!(p.slice(&data), &data[0..17]);
        p.go_to(2, data.len());
        assert_eq!(p.slice(&data), &data[17..34]);
        p.go_to(3, data.len());
        assert_eq!(p.slice(&data), &data[34..40]);
    }

    #[test]
    fn every_row_appears_on_exactly_one_page() {
        for n in [0, 1, 16, 17, 18, 34, 35, 100] {
            let data = rows(n);
            let mut p = Paginator::new(17);
            let mut seen = Vec::new();
            for k in 1..=p.page_count(n) {
                p.go_to(k, n);
                seen.extend_from_slice(p.slice(&data));
            }
            assert_eq!(seen, data, "n = {n}");
        }
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn navigation_is_clamped() {
        let mut p = Paginator::new(10);
        assert_eq!(p.prev(25), 1);
        assert_eq!(p.next(25), 2);
        assert_eq!(p.next(25), 3);
        assert_eq!(p.next(25), 3);
        assert_eq!(p.go_to(0, 25), 1);
        assert_eq!(p.go_to(99, 25), 3);
    }

    #[test]
    fn reclamp_after_shrink() {
        let mut p = Paginator::new(10);
        p.go_to(3, 21);
        p.reclamp(20);
        assert_eq!(p.page(), 2);
    }
}
