//! Filtering and pagination over the loaded disease set.
//!
//! The view only holds the filter text and paging position. It borrows the
//! records when asked for a page and never modifies them or the change queue.

use dsf_model::DiseaseRecord;

/// Page sizes offered to the user.
pub const ROWS_PER_PAGE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Default page size.
pub const DEFAULT_ROWS_PER_PAGE: usize = 25;

/// Filter text and paging position of the disease table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    filter: String,
    current_page: usize,
    rows_per_page: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self::with_rows_per_page(DEFAULT_ROWS_PER_PAGE)
    }
}

impl TableView {
    /// Create a view with a custom page size (zero is treated as one).
    pub fn with_rows_per_page(rows_per_page: usize) -> Self {
        Self {
            filter: String::new(),
            current_page: 0,
            rows_per_page: rows_per_page.max(1),
        }
    }

    /// Current filter text.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Set the filter text and return to the first page.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.current_page = 0;
    }

    /// Clear the filter and return to the first page.
    pub fn clear_filter(&mut self) {
        self.set_filter(String::new());
    }

    /// Change the page size and return to the first page.
    pub fn set_rows_per_page(&mut self, rows: usize) {
        self.rows_per_page = rows.max(1);
        self.current_page = 0;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1);
    }

    /// Records matching the filter, in load order.
    pub fn filtered<'a>(&self, records: &'a [DiseaseRecord]) -> Vec<&'a DiseaseRecord> {
        let needle = self.filter.to_lowercase();
        records
            .iter()
            .filter(|record| record.matches_lowercase(&needle))
            .collect()
    }

    /// The visible page.
    ///
    /// A page position past the end is clamped to the last page, so a filter
    /// that shrinks the result never shows an empty table while rows exist.
    pub fn page<'a>(&self, records: &'a [DiseaseRecord]) -> TablePage<'a> {
        let filtered = self.filtered(records);
        let total_rows = filtered.len();
        let total_pages = total_rows.div_ceil(self.rows_per_page).max(1);
        let page = self.current_page.min(total_pages - 1);
        let start_row = page * self.rows_per_page;
        let rows = filtered
            .into_iter()
            .skip(start_row)
            .take(self.rows_per_page)
            .collect();

        TablePage {
            rows,
            page,
            total_pages,
            total_rows,
            start_row,
        }
    }
}

/// One page of the disease table.
#[derive(Debug, Clone)]
pub struct TablePage<'a> {
    /// Rows on this page.
    pub rows: Vec<&'a DiseaseRecord>,
    /// Zero-based page index actually shown.
    pub page: usize,
    /// Number of pages (at least one).
    pub total_pages: usize,
    /// Rows matching the filter across all pages.
    pub total_rows: usize,
    /// Index of the first row within the filtered rows.
    pub start_row: usize,
}

impl TablePage<'_> {
    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.page > 0
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// Human-readable range, e.g. `"26-50 of 112"`.
    #[must_use]
    pub fn range_label(&self) -> String {
        if self.total_rows == 0 {
            return "0 of 0".to_string();
        }
        format!(
            "{}-{} of {}",
            self.start_row + 1,
            self.start_row + self.rows.len(),
            self.total_rows
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(count: usize) -> Vec<DiseaseRecord> {
        (0..count)
            .map(|i| {
                DiseaseRecord::new(format!("d{i}"), format!("Disease {i}"))
                    .with_nando_id(format!("NANDO:1{i:06}"))
            })
            .collect()
    }

    #[test]
    fn test_default_page_size() {
        let view = TableView::default();
        assert_eq!(view.rows_per_page(), 25);
        assert!(ROWS_PER_PAGE_OPTIONS.contains(&view.rows_per_page()));
    }

    #[test]
    fn test_paging() {
        let data = records(60);
        let mut view = TableView::default();

        let page = view.page(&data);
        assert_eq!(page.rows.len(), 25);
        assert_eq!(page.total_pages, 3);
        assert!(!page.can_go_previous());
        assert!(page.can_go_next());

        view.next_page();
        view.next_page();
        let page = view.page(&data);
        assert_eq!(page.rows.len(), 10);
        assert_eq!(page.rows[0].id, "d50");
        assert_eq!(page.range_label(), "51-60 of 60");
        assert!(!page.can_go_next());
    }

    #[test]
    fn test_page_clamped_after_filter() {
        let data = records(60);
        let mut view = TableView::default();
        view.go_to_page(2);
        view.filter = "disease 5".to_string();

        let page = view.page(&data);
        assert_eq!(page.page, 0);
        assert_eq!(page.total_rows, 11); // "Disease 5" and "Disease 50".."Disease 59"
    }

    #[test]
    fn test_set_filter_resets_page() {
        let mut view = TableView::default();
        view.go_to_page(4);
        view.set_filter("fabry");
        assert_eq!(view.current_page(), 0);

        view.go_to_page(2);
        view.set_rows_per_page(50);
        assert_eq!(view.current_page(), 0);
    }

    #[test]
    fn test_filter_matches_name_nando_and_english() {
        let data = vec![
            DiseaseRecord::new("d1", "ファブリー病").with_name_en("Fabry disease"),
            DiseaseRecord::new("d2", "ゴーシェ病").with_nando_id("NANDO:2100001"),
            DiseaseRecord::new("d3", "Pompe"),
        ];
        let mut view = TableView::default();

        view.set_filter("FABRY");
        assert_eq!(view.filtered(&data).len(), 1);

        view.set_filter("nando:21");
        assert_eq!(view.filtered(&data)[0].id, "d2");

        view.set_filter("pom");
        assert_eq!(view.filtered(&data)[0].id, "d3");
    }

    #[test]
    fn test_filter_whitespace_is_part_of_needle() {
        let data = vec![
            DiseaseRecord::new("d1", "Pompe"),
            DiseaseRecord::new("d2", "Fabry disease"),
        ];
        let mut view = TableView::default();

        view.set_filter(" ");
        let ids: Vec<_> = view.filtered(&data).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["d2"]);

        view.set_filter("  pompe ");
        assert!(view.filtered(&data).is_empty());
    }

    #[test]
    fn test_empty_result() {
        let data = records(3);
        let mut view = TableView::default();
        view.set_filter("nothing matches");

        let page = view.page(&data);
        assert!(page.rows.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.range_label(), "0 of 0");
    }

    #[test]
    fn test_zero_rows_per_page_is_one() {
        let mut view = TableView::with_rows_per_page(0);
        assert_eq!(view.rows_per_page(), 1);
        view.set_rows_per_page(0);
        assert_eq!(view.rows_per_page(), 1);
    }
}
