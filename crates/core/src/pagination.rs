//! Fixed-size pagination over an ordered list.
//!
//! Page numbers come straight from the query string, so they are clamped
//! instead of rejected: absent or non-numeric values select the first page,
//! numbers below one select the first page, and numbers past the end select
//! the last page. An empty list still has one (empty) page.

/// Products shown per page on the list view.
pub const PAGE_SIZE: usize = 12;

/// Splits an ordered list into pages of `per_page` items.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    per_page: usize,
}

impl<T> Paginator<T> {
    /// Create a paginator. A `per_page` of zero is treated as one.
    #[must_use]
    pub fn new(items: Vec<T>, per_page: usize) -> Self {
        Self {
            items,
            per_page: per_page.max(1),
        }
    }

    /// Total number of items.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Number of pages, never less than one.
    #[must_use]
    pub fn num_pages(&self) -> usize {
        self.items.len().div_ceil(self.per_page).max(1)
    }

    /// Resolve a raw page parameter to a valid 1-based page number.
    #[must_use]
    pub fn resolve(&self, requested: Option<&str>) -> usize {
        let last = self.num_pages();
        let Some(raw) = requested.map(str::trim).filter(|s| !s.is_empty()) else {
            return 1;
        };

        match raw.parse::<i64>() {
            Ok(n) if n < 1 => 1,
            Ok(n) => usize::try_from(n).map_or(last, |n| n.min(last)),
            // All digits but too large for i64: still "past the end".
            Err(_) if raw.bytes().all(|b| b.is_ascii_digit()) => last,
            Err(_) => 1,
        }
    }

    /// Page for a raw query-string value; see [`Paginator::resolve`].
    #[must_use]
    pub fn get_page(self, requested: Option<&str>) -> Page<T> {
        let number = self.resolve(requested);
        self.page(number)
    }

    /// Page `number` (1-based), clamped into range.
    #[must_use]
    pub fn page(self, number: usize) -> Page<T> {
        let num_pages = self.num_pages();
        let number = number.clamp(1, num_pages);
        let total_items = self.items.len();
        let items = self
            .items
            .into_iter()
            .skip((number - 1) * self.per_page)
            .take(self.per_page)
            .collect();

        Page {
            items,
            number,
            num_pages,
            total_items,
            per_page: self.per_page,
        }
    }
}

/// One window over a paginated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number.
    pub number: usize,
    pub num_pages: usize,
    pub total_items: usize,
    per_page: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub const fn next_page_number(&self) -> Option<usize> {
        if self.has_next() {
            Some(self.number + 1)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn previous_page_number(&self) -> Option<usize> {
        if self.has_previous() {
            Some(self.number - 1)
        } else {
            None
        }
    }

    /// 1-based index of the first item on this page (0 for an empty list).
    #[must_use]
    pub const fn start_index(&self) -> usize {
        if self.total_items == 0 {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }

    /// 1-based index of the last item on this page.
    #[must_use]
    pub const fn end_index(&self) -> usize {
        if self.number == self.num_pages {
            self.total_items
        } else {
            self.number * self.per_page
        }
    }

    /// Transform the items while keeping the page metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            total_items: self.total_items,
            per_page: self.per_page,
        }
    }
}
