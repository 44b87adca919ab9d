use serde::Serialize;

/// Page size used when the caller does not request one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;
/// Upper bound on the page size accepted from callers.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Clamps a requested page size into `1..=MAX_ITEMS_PER_PAGE`.
pub fn per_page_or_default(per_page: Option<usize>) -> usize {
    per_page
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
        .min(MAX_ITEMS_PER_PAGE)
}

/// Page links to render: `None` marks an ellipsis between windows.
///
/// Shows `edge` pages at both ends and a window of `before`/`after` pages
/// around `current`.
fn page_links(
    total_pages: usize,
    current: usize,
    edge: usize,
    before: usize,
    after: usize,
) -> Vec<Option<usize>> {
    let visible = |page: usize| {
        page <= edge
            || page > total_pages.saturating_sub(edge)
            || (page + before >= current && page <= current.saturating_add(after))
    };

    let mut links = Vec::new();
    let mut skipped = false;
    for page in 1..=total_pages {
        if visible(page) {
            links.push(Some(page));
            skipped = false;
        } else if !skipped {
            links.push(None);
            skipped = true;
        }
    }
    links
}

/// A page of items ready for the grid together with its navigation links.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total: usize, per_page: usize) -> Self {
        let current_page = current_page.max(1);
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        Self {
            items,
            total,
            pages: page_links(total_pages, current_page, 2, 2, 4),
            page: current_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pages_for_empty_result() {
        let page: Paginated<i32> = Paginated::new(vec![], 1, 0, 20);
        assert!(page.pages.is_empty());
        assert_eq!(page.page, 1);
    }

    #[test]
    fn short_lists_show_every_page() {
        assert_eq!(
            page_links(5, 3, 2, 2, 4),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5)]
        );
    }

    #[test]
    fn long_lists_collapse_into_ellipses() {
        assert_eq!(
            page_links(30, 15, 2, 2, 4),
            vec![
                Some(1),
                Some(2),
                None,
                Some(13),
                Some(14),
                Some(15),
                Some(16),
                Some(17),
                Some(18),
                Some(19),
                None,
                Some(29),
                Some(30),
            ]
        );
    }

    #[test]
    fn page_zero_is_first_page() {
        let page = Paginated::new(vec![1, 2], 0, 2, 20);
        assert_eq!(page.page, 1);
        assert_eq!(page.pages, vec![Some(1)]);
    }

    #[test]
    fn huge_current_page_keeps_edge_links() {
        let page: Paginated<i32> = Paginated::new(vec![], usize::MAX, 100, 20);
        assert_eq!(page.page, usize::MAX);
        assert_eq!(page.pages, vec![Some(1), Some(2), None, Some(4), Some(5)]);
    }

    #[test]
    fn per_page_is_clamped() {
        assert_eq!(per_page_or_default(None), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(per_page_or_default(Some(0)), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(per_page_or_default(Some(5)), 5);
        assert_eq!(per_page_or_default(Some(1000)), MAX_ITEMS_PER_PAGE);
    }
}
