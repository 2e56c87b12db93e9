use serde::{Deserialize, Serialize};

/// Number of rows the report endpoint returns per page.
pub const PAGE_SIZE: usize = 20;

/// Offset-based position within one establishment's report.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub offset: usize,
    pub limit: usize,
}

impl Cursor {
    pub fn start() -> Self {
        Cursor {
            offset: 0,
            limit: PAGE_SIZE,
        }
    }

    /// Cursor for the page right after this one.
    pub fn next(&self) -> Self {
        Cursor {
            offset: self.offset + self.limit,
            limit: self.limit,
        }
    }

    /// True when a page of `row_count` rows may be followed by another.
    pub fn is_full_page(&self, row_count: usize) -> bool {
        row_count >= self.limit
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::start()
    }
}
