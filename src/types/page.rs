use serde::{Deserialize, Serialize};

use super::work_item::WorkItem;

/// Forward/backward navigation for one page of results.
///
/// Built only from upstream pagination hints. A page number is present exactly
/// when the matching `has_*` flag is set; the constructors keep the two in
/// step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCursor {
    has_next: bool,
    has_prev: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_page_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prev_page_number: Option<u32>,
}

impl PageCursor {
    /// A cursor with neither neighbour.
    pub const fn empty() -> Self {
        Self {
            has_next: false,
            has_prev: false,
            next_page_number: None,
            prev_page_number: None,
        }
    }

    pub const fn with_next(mut self, page: u32) -> Self {
        self.has_next = true;
        self.next_page_number = Some(page);
        self
    }

    pub const fn with_prev(mut self, page: u32) -> Self {
        self.has_prev = true;
        self.prev_page_number = Some(page);
        self
    }

    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    pub const fn has_prev(&self) -> bool {
        self.has_prev
    }

    pub const fn next_page_number(&self) -> Option<u32> {
        self.next_page_number
    }

    pub const fn prev_page_number(&self) -> Option<u32> {
        self.prev_page_number
    }
}

/// One page of normalized items plus its cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssuePage {
    pub items: Vec<WorkItem>,
    pub cursor: PageCursor,
}
