use std::collections::BTreeSet;

use crate::effect::{Effect, PageRequest};
use crate::item::{Category, Item, ItemId, SortOrder};
use crate::view_model::{CatalogViewModel, ItemRowView};

/// Fixed server page size; not user-controlled.
pub const PAGE_SIZE: u32 = 6;

/// Tag minted for every load session. In-flight fetches and settle timers
/// carry the tag they were issued under; replies with a stale tag are
/// discarded instead of merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionId(pub u64);

/// The filter/sort tuple that scopes one contiguous pagination sequence.
/// Changing either component means a new key, and a new key atomically
/// resets the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionKey {
    pub category: Option<Category>,
    pub sort: Option<SortOrder>,
}

/// One server-returned batch plus the session-wide total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    /// 1-based index this batch was produced for.
    pub page: u32,
    pub items: Vec<Item>,
    /// Count of items matching the session key across all pages.
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    InFlight {
        page: u32,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session_id: SessionId,
    session_key: SessionKey,
    items: Vec<Item>,
    total: Option<u64>,
    fetch: FetchPhase,
    settled: bool,
    delete_mode: bool,
    selected: BTreeSet<ItemId>,
    last_error: Option<String>,
    notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State pre-seeded with a session key, e.g. restored preferences.
    /// No fetch is implied; the consumer follows up with a reload.
    pub fn with_key(key: SessionKey) -> Self {
        Self {
            session_key: key,
            ..Self::default()
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn session_key(&self) -> SessionKey {
        self.session_key
    }

    /// True while the last known total says more pages remain. Before the
    /// first page lands there is no total, which counts as "more".
    pub fn has_more(&self) -> bool {
        self.total.map_or(true, |t| (self.items.len() as u64) < t)
    }

    pub(crate) fn is_in_flight(&self) -> bool {
        matches!(self.fetch, FetchPhase::InFlight { .. })
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.settled
    }

    pub(crate) fn is_delete_mode(&self) -> bool {
        self.delete_mode
    }

    pub(crate) fn selected_ids(&self) -> Vec<ItemId> {
        self.selected.iter().cloned().collect()
    }

    /// Index of the next page to request. Pages are applied whole, so the
    /// accumulated length is always a multiple of `PAGE_SIZE` except after
    /// the final page; a failed attempt recomputes the same index.
    pub(crate) fn next_page(&self) -> u32 {
        (self.items.len() as u32) / PAGE_SIZE + 1
    }

    /// Start a new load session under `key`: discard the accumulation,
    /// mint a fresh tag and issue the page-1 fetch eagerly.
    pub(crate) fn begin_session(&mut self, key: SessionKey) -> Effect {
        self.session_id = SessionId(self.session_id.0 + 1);
        self.session_key = key;
        self.items.clear();
        self.total = None;
        self.settled = false;
        self.last_error = None;
        self.notice = None;
        self.fetch = FetchPhase::InFlight { page: 1 };
        self.dirty = true;
        Effect::FetchPage {
            session: self.session_id,
            request: self.page_request(1),
        }
    }

    /// Mark the next page as in flight and return the fetch effect.
    pub(crate) fn begin_next_page(&mut self) -> Effect {
        let page = self.next_page();
        self.fetch = FetchPhase::InFlight { page };
        self.last_error = None;
        self.dirty = true;
        Effect::FetchPage {
            session: self.session_id,
            request: self.page_request(page),
        }
    }

    /// Append one successfully fetched page. The server total is
    /// authoritative and replaces the previous one.
    pub(crate) fn apply_page(&mut self, page: PageData) {
        self.items.extend(page.items);
        self.total = Some(page.total);
        self.fetch = FetchPhase::Idle;
        self.dirty = true;
    }

    pub(crate) fn mark_fetch_failed(&mut self, message: String) {
        self.last_error = Some(message.clone());
        self.fetch = FetchPhase::Failed { message };
        self.dirty = true;
    }

    pub(crate) fn mark_settled(&mut self) {
        self.settled = true;
        self.dirty = true;
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.last_error = Some(message);
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, text: String) {
        self.notice = Some(text);
        self.dirty = true;
    }

    pub(crate) fn set_delete_mode(&mut self, enabled: bool) {
        self.delete_mode = enabled;
        if !enabled {
            self.selected.clear();
        }
        self.dirty = true;
    }

    pub(crate) fn toggle_selected(&mut self, id: ItemId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.dirty = true;
    }

    /// Returns whether the state changed since the last call, resetting
    /// the flag. The render loop keys off this.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> CatalogViewModel {
        let rows = self
            .items
            .iter()
            .map(|item| ItemRowView {
                id: item.id.clone(),
                name: item.name.clone(),
                price: item.price.clone(),
                category: item.category.map(|c| c.as_str()),
                status: item.status.map(|s| s.as_str()),
                selected: self.selected.contains(&item.id),
            })
            .collect();

        // Selected ids with no loaded row back the "not currently
        // displayed" warning shown before a batch delete.
        let stale_selected_count = self
            .selected
            .iter()
            .filter(|id| !self.items.iter().any(|item| &item.id == *id))
            .count();

        CatalogViewModel {
            rows,
            total: self.total,
            has_more: self.has_more(),
            loading: self.is_in_flight() && self.items.is_empty(),
            loading_more: self.is_in_flight() && !self.items.is_empty(),
            error: self.last_error.clone(),
            notice: self.notice.clone(),
            delete_mode: self.delete_mode,
            selected_count: self.selected.len(),
            stale_selected_count,
            category: self.session_key.category,
            sort: self.session_key.sort,
            dirty: self.dirty,
        }
    }

    fn page_request(&self, page: u32) -> PageRequest {
        PageRequest {
            page,
            page_size: PAGE_SIZE,
            category: self.session_key.category,
            sort: self.session_key.sort,
        }
    }
}
