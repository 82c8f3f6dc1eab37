use crate::item::{Category, ItemId, SortOrder};
use crate::state::SessionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one listing request. Responses must be reported back tagged
    /// with `session` so stale replies can be discarded.
    FetchPage {
        session: SessionId,
        request: PageRequest,
    },
    /// Arm the initial-load settle timer; delivers `Msg::SettleElapsed`
    /// tagged with `session` when it fires.
    StartSettleTimer { session: SessionId },
    /// Delete all items in `ids` with one batch request.
    DeleteBatch { ids: Vec<ItemId> },
}

/// Parameters for one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page index.
    pub page: u32,
    pub page_size: u32,
    pub category: Option<Category>,
    pub sort: Option<SortOrder>,
}

/// The write operation a completion or failure report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Created,
    Updated,
    Deleted { count: u64 },
    BatchDeleted { count: u64 },
}
