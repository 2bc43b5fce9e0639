//! Client-side pagination, search, and sorting over a row list.
//!
//! [`TableQuery`] holds the query parameters and current page. It never owns
//! the rows; every computation takes the full row slice and produces a view.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::data::Row;

/// Column to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Category,
}

impl SortKey {
    /// Column label shown in the header.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::Name => "Name",
            SortKey::Category => "Category",
        }
    }

    /// The next key in display order, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            SortKey::Id => SortKey::Name,
            SortKey::Name => SortKey::Category,
            SortKey::Category => SortKey::Id,
        }
    }

    fn field<'a>(&self, row: &'a Row) -> &'a str {
        match self {
            SortKey::Id => &row.id,
            SortKey::Name => &row.name,
            SortKey::Category => &row.category,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Arrow glyph for the header.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    /// Rows on this page, in display order.
    pub rows: Vec<&'a Row>,
    /// 1-based page number.
    pub number: usize,
    /// Total pages, at least 1.
    pub total_pages: usize,
    /// Number of rows matching the search.
    pub total_matches: usize,
    /// 1-based index of the first row on this page, or 0 if empty.
    pub start: usize,
    /// 1-based index of the last row on this page, or 0 if empty.
    pub end: usize,
}

impl Page<'_> {
    /// "Showing X to Y of Z results".
    pub fn range_label(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.start, self.end, self.total_matches
        )
    }
}

/// Pagination, search, and sort parameters.
#[derive(Debug, Clone)]
pub struct TableQuery {
    search: String,
    sort_key: SortKey,
    sort_order: SortOrder,
    page_size: usize,
    page_size_options: Vec<usize>,
    /// 1-based.
    page: usize,
}

impl TableQuery {
    /// Create a query with the given page size and selectable sizes.
    ///
    /// Zero sizes are dropped. If `page_size` is not among the options it is
    /// added, so the current size is always selectable.
    pub fn new(page_size: usize, page_size_options: &[usize]) -> Self {
        let mut options: Vec<usize> = page_size_options.iter().copied().filter(|&n| n > 0).collect();
        let page_size = page_size.max(1);
        if !options.contains(&page_size) {
            options.push(page_size);
        }
        options.sort_unstable();
        options.dedup();

        Self {
            search: String::new(),
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
            page_size,
            page_size_options: options,
            page: 1,
        }
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current sort column.
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Current sort direction.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Current page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Selectable page sizes.
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Current 1-based page number (unclamped).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Set the search text and go back to the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 1;
        }
    }

    /// Set the sort column and direction and go back to the first page.
    pub fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        self.sort_key = key;
        self.sort_order = order;
        self.page = 1;
    }

    /// Sort by `key`. Selecting the active column flips the direction;
    /// selecting a new column sorts it ascending.
    pub fn sort_by(&mut self, key: SortKey) {
        if key == self.sort_key {
            self.set_sort(key, self.sort_order.toggled());
        } else {
            self.set_sort(key, SortOrder::Ascending);
        }
    }

    /// Set the page size and go back to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        let size = size.max(1);
        if size != self.page_size {
            self.page_size = size;
            self.page = 1;
        }
    }

    /// Switch to the next larger page size option, wrapping around.
    pub fn cycle_page_size(&mut self) {
        let next = self
            .page_size_options
            .iter()
            .copied()
            .find(|&n| n > self.page_size)
            .or_else(|| self.page_size_options.first().copied())
            .unwrap_or(self.page_size);
        self.set_page_size(next);
    }

    /// Rows matching the search, sorted.
    pub fn filtered<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        let needle = self.search.trim().to_lowercase();
        let mut matches: Vec<&Row> = rows
            .iter()
            .filter(|row| {
                needle.is_empty()
                    || row.id.to_lowercase().contains(&needle)
                    || row.name.to_lowercase().contains(&needle)
                    || row.category.to_lowercase().contains(&needle)
            })
            .collect();

        let key = self.sort_key;
        let order = self.sort_order;
        matches.sort_by(|a, b| {
            let ordering = compare_field(key.field(a), key.field(b)).then_with(|| a.id.cmp(&b.id));
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        matches
    }

    /// Total pages for `rows` under the current search, at least 1.
    pub fn total_pages(&self, rows: &[Row]) -> usize {
        pages_for(self.filtered(rows).len(), self.page_size)
    }

    /// Compute the current page, clamping the page number into range.
    pub fn page_of<'a>(&mut self, rows: &'a [Row]) -> Page<'a> {
        let matches = self.filtered(rows);
        let total_matches = matches.len();
        let total_pages = pages_for(total_matches, self.page_size);
        self.page = self.page.clamp(1, total_pages);

        let offset = (self.page - 1) * self.page_size;
        let page_rows: Vec<&Row> = matches
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .collect();

        let (start, end) = if page_rows.is_empty() {
            (0, 0)
        } else {
            (offset + 1, offset + page_rows.len())
        };

        Page {
            rows: page_rows,
            number: self.page,
            total_pages,
            total_matches,
            start,
            end,
        }
    }

    /// Advance one page, stopping at the last page.
    pub fn next_page(&mut self, rows: &[Row]) {
        let total = self.total_pages(rows);
        self.page = (self.page + 1).min(total);
    }

    /// Go back one page, stopping at the first page.
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Jump to the first page.
    pub fn first_page(&mut self) {
        self.page = 1;
    }

    /// Jump to the last page.
    pub fn last_page(&mut self, rows: &[Row]) {
        self.page = self.total_pages(rows);
    }
}

fn pages_for(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

fn compare_field(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
