use crate::db::{cursor::Cursor, direction::ScanDirection, executor::PageRequest};

///
/// Page
///
/// One fetched page: rows in declared order, each row's own cursor, and the
/// navigation state around it. `next_cursor` is the last row's cursor and
/// `previous_cursor` the first's; both are absent for an empty page.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<R> {
    items: Vec<R>,
    cursors: Vec<Cursor>,
    has_next: bool,
    has_previous: bool,
    request: PageRequest,
}

impl<R> Page<R> {
    /// Assemble a page; `cursors` must align 1:1 with `items`.
    pub(crate) fn new(
        items: Vec<R>,
        cursors: Vec<Cursor>,
        has_next: bool,
        has_previous: bool,
        request: PageRequest,
    ) -> Self {
        debug_assert_eq!(items.len(), cursors.len(), "one cursor per row");

        Self {
            items,
            cursors,
            has_next,
            has_previous,
            request,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[R] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<R> {
        self.items
    }

    /// Per-row cursors, aligned with `items`.
    #[must_use]
    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.has_previous
    }

    #[must_use]
    pub fn next_cursor(&self) -> Option<&Cursor> {
        self.cursors.last()
    }

    #[must_use]
    pub fn previous_cursor(&self) -> Option<&Cursor> {
        self.cursors.first()
    }

    /// The request that produced this page.
    #[must_use]
    pub const fn request(&self) -> &PageRequest {
        &self.request
    }

    /// More rows exist in the direction this page was scanned.
    #[must_use]
    pub const fn further(&self) -> bool {
        match self.request.scan() {
            ScanDirection::Forward => self.has_next,
            ScanDirection::Backward => self.has_previous,
        }
    }

    /// Request for the following page, when there is one.
    ///
    /// An empty page falls back to the cursor it was requested from, so an
    /// exhausted `Before` scan can still step forward again.
    #[must_use]
    pub fn next_request(&self) -> Option<PageRequest> {
        if !self.has_next {
            return None;
        }

        self.next_cursor()
            .or_else(|| self.request.cursor())
            .cloned()
            .map(PageRequest::After)
    }

    /// Request for the preceding page, when there is one.
    ///
    /// Mirrors `next_request`: an empty `After` page steps back from its
    /// own cursor.
    #[must_use]
    pub fn previous_request(&self) -> Option<PageRequest> {
        if !self.has_previous {
            return None;
        }

        self.previous_cursor()
            .or_else(|| self.request.cursor())
            .cloned()
            .map(PageRequest::Before)
    }

    #[must_use]
    pub fn cursor_at(&self, index: usize) -> Option<&Cursor> {
        self.cursors.get(index)
    }

    pub fn iter_with_cursors(&self) -> impl Iterator<Item = (&R, &Cursor)> {
        self.items.iter().zip(&self.cursors)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the page and return `(items, cursors)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<R>, Vec<Cursor>) {
        (self.items, self.cursors)
    }
}
