use crate::effect::MutationKind;
use crate::item::{Category, ItemId, SortOrder};
use crate::state::{PageData, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Injected viewport signal: the last rendered row entered the trigger
    /// region. Redundant deliveries are safe.
    EndOfListReached,
    /// The post-first-page settle timer for `session` elapsed.
    SettleElapsed { session: SessionId },
    /// User picked a category filter; `None` means all categories.
    CategorySelected(Option<Category>),
    /// User picked a price sort; `None` means server default order.
    SortSelected(Option<SortOrder>),
    /// Manual full reload under the current session key.
    ReloadRequested,
    /// A page fetch issued under `session` succeeded.
    PageLoaded { session: SessionId, page: PageData },
    /// A page fetch issued under `session` failed. Terminal per attempt.
    PageFailed { session: SessionId, error: String },
    /// A write against the API completed; the collection must be re-derived
    /// from the server.
    MutationCompleted { kind: MutationKind },
    /// A write against the API failed; loaded state is left as-is.
    MutationFailed { kind: MutationKind, error: String },
    /// User toggled delete mode.
    DeleteModeToggled,
    /// User toggled one item's membership in the batch-delete selection.
    ItemSelectionToggled { id: ItemId },
    /// User confirmed the batch delete of the current selection.
    BatchDeleteConfirmed,
    /// Fallback for placeholder wiring.
    NoOp,
}
