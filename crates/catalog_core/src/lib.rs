//! Catalog core: pure state machine and view-model helpers.
mod effect;
mod item;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, MutationKind, PageRequest};
pub use item::{Category, Item, ItemId, PromoTag, SortOrder};
pub use msg::Msg;
pub use state::{AppState, FetchPhase, PageData, SessionId, SessionKey, PAGE_SIZE};
pub use update::update;
pub use view_model::{CatalogViewModel, ItemRowView};
