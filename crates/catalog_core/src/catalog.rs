use crate::CatalogEntry;

/// Number of entries shown per catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

/// Fetched entry collection plus the derived page cursor.
///
/// `current_page` always stays within `1..=total_pages()`. Pagination is a
/// pure derivation over `entries`; nothing here reorders or edits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogListState {
    entries: Vec<CatalogEntry>,
    page_size: usize,
    current_page: usize,
    status: LoadStatus,
}

impl Default for CatalogListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogListState {
    /// A page size of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            page_size: page_size.max(1),
            current_page: 1,
            status: LoadStatus::Idle,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Never less than one, even for an empty collection.
    pub fn total_pages(&self) -> usize {
        self.entries.len().div_ceil(self.page_size).max(1)
    }

    pub fn current_page_entries(&self) -> &[CatalogEntry] {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        if start >= self.entries.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(self.entries.len());
        &self.entries[start..end]
    }

    /// Returns whether the page changed. Out-of-range pages are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    /// Marks a fetch as started. Returns `false` when one is already in
    /// flight, in which case the caller must not issue another request.
    pub(crate) fn begin_load(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.status = LoadStatus::Loading;
        true
    }

    /// Replaces the collection wholesale. The current page survives unless
    /// it no longer exists, in which case the cursor returns to page one.
    pub(crate) fn finish_load(&mut self, entries: Vec<CatalogEntry>) {
        self.entries = entries;
        self.status = LoadStatus::Idle;
        if self.current_page > self.total_pages() {
            self.current_page = 1;
        }
    }

    pub(crate) fn fail_load(&mut self, message: String) {
        self.status = LoadStatus::Failed(message);
    }

    /// Drops a pending load without recording an error.
    pub(crate) fn abandon_load(&mut self) {
        if self.is_loading() {
            self.status = LoadStatus::Idle;
        }
    }
}
