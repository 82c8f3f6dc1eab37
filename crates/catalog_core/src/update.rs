use crate::effect::MutationKind;
use crate::state::SessionKey;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::EndOfListReached => {
            // Guards, in order: a fetch already in flight would duplicate
            // the request; an unsettled session is still in the reflow
            // grace window; no total deficit means no further pages.
            if state.is_in_flight() || !state.is_settled() || !state.has_more() {
                Vec::new()
            } else {
                vec![state.begin_next_page()]
            }
        }
        Msg::PageLoaded { session, page } => {
            if session != state.session_id() {
                return (state, Vec::new());
            }
            let first_page = page.page == 1;
            state.apply_page(page);
            if first_page {
                // Hold off further scroll triggers until layout settles.
                vec![Effect::StartSettleTimer { session }]
            } else {
                Vec::new()
            }
        }
        Msg::PageFailed { session, error } => {
            if session != state.session_id() {
                return (state, Vec::new());
            }
            state.mark_fetch_failed(error);
            Vec::new()
        }
        Msg::SettleElapsed { session } => {
            if session == state.session_id() {
                state.mark_settled();
            }
            Vec::new()
        }
        Msg::CategorySelected(category) => {
            let key = SessionKey {
                category,
                sort: state.session_key().sort,
            };
            restart_if_changed(&mut state, key)
        }
        Msg::SortSelected(sort) => {
            let key = SessionKey {
                category: state.session_key().category,
                sort,
            };
            restart_if_changed(&mut state, key)
        }
        Msg::ReloadRequested => {
            let key = state.session_key();
            vec![state.begin_session(key)]
        }
        Msg::MutationCompleted { kind } => {
            // Write-then-reload: the server is the single source of truth,
            // so every completed write re-derives the window from page 1.
            if let MutationKind::BatchDeleted { .. } = kind {
                // Leaves delete mode and drops the selection with it.
                state.set_delete_mode(false);
            }
            let key = state.session_key();
            let effects = vec![state.begin_session(key)];
            state.set_notice(notice_for(kind));
            effects
        }
        Msg::MutationFailed { kind, error } => {
            state.set_error(format!("{}: {error}", verb_for(kind)));
            Vec::new()
        }
        Msg::DeleteModeToggled => {
            state.set_delete_mode(!state.is_delete_mode());
            Vec::new()
        }
        Msg::ItemSelectionToggled { id } => {
            if state.is_delete_mode() {
                state.toggle_selected(id);
            }
            Vec::new()
        }
        Msg::BatchDeleteConfirmed => {
            let ids = state.selected_ids();
            if state.is_delete_mode() && !ids.is_empty() {
                vec![Effect::DeleteBatch { ids }]
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn restart_if_changed(state: &mut AppState, key: SessionKey) -> Vec<Effect> {
    if key == state.session_key() {
        Vec::new()
    } else {
        vec![state.begin_session(key)]
    }
}

fn notice_for(kind: MutationKind) -> String {
    match kind {
        MutationKind::Created => "Item added".to_string(),
        MutationKind::Updated => "Item updated".to_string(),
        MutationKind::Deleted { count } | MutationKind::BatchDeleted { count } => {
            format!("Deleted {count} item(s)")
        }
    }
}

fn verb_for(kind: MutationKind) -> &'static str {
    match kind {
        MutationKind::Created => "Error adding item",
        MutationKind::Updated => "Error updating item",
        MutationKind::Deleted { .. } | MutationKind::BatchDeleted { .. } => "Error deleting items",
    }
}
