use crate::item::{Category, ItemId, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogViewModel {
    pub rows: Vec<ItemRowView>,
    /// Last server-reported total for the current session key, if any.
    pub total: Option<u64>,
    pub has_more: bool,
    /// Initial page in flight, nothing accumulated yet.
    pub loading: bool,
    /// A follow-up page in flight below existing rows.
    pub loading_more: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub delete_mode: bool,
    pub selected_count: usize,
    /// Selected ids without a currently loaded row.
    pub stale_selected_count: usize,
    pub category: Option<Category>,
    pub sort: Option<SortOrder>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRowView {
    pub id: ItemId,
    pub name: String,
    pub price: String,
    pub category: Option<&'static str>,
    pub status: Option<&'static str>,
    pub selected: bool,
}
