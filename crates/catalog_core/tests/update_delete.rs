use std::sync::Once;

use catalog_core::{
    update, AppState, Category, Effect, Item, ItemId, Msg, MutationKind, PageData, SessionId,
    PAGE_SIZE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

fn item(n: u32) -> Item {
    Item {
        id: ItemId::new(format!("id-{n:03}")),
        name: format!("Plant {n}"),
        price: format!("${n}.00"),
        category: Some(Category::InsectRepellent),
        status: None,
        description: String::new(),
        image: None,
    }
}

fn page(index: u32, count: u32, total: u64) -> PageData {
    let start = (index - 1) * PAGE_SIZE;
    PageData {
        page: index,
        items: (start..start + count).map(item).collect(),
        total,
    }
}

fn loaded_state() -> AppState {
    let state = AppState::new();
    let (state, _) = update(state, Msg::ReloadRequested);
    let session = state.session_id();
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            session,
            page: page(1, 6, 6),
        },
    );
    let (state, _) = update(state, Msg::SettleElapsed { session });
    state
}

#[test]
fn selection_requires_delete_mode() {
    init_logging();
    let state = loaded_state();

    let (state, effects) = update(
        state,
        Msg::ItemSelectionToggled {
            id: ItemId::new("id-000"),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().selected_count, 0);
}

#[test]
fn toggling_delete_mode_off_clears_selection() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::DeleteModeToggled);
    let (state, _) = update(
        state,
        Msg::ItemSelectionToggled {
            id: ItemId::new("id-001"),
        },
    );
    assert_eq!(state.view().selected_count, 1);

    let (state, _) = update(state, Msg::DeleteModeToggled);
    let view = state.view();
    assert!(!view.delete_mode);
    assert_eq!(view.selected_count, 0);
}

#[test]
fn confirm_emits_one_batch_delete_effect() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::DeleteModeToggled);
    let (state, _) = update(
        state,
        Msg::ItemSelectionToggled {
            id: ItemId::new("id-001"),
        },
    );
    let (state, _) = update(
        state,
        Msg::ItemSelectionToggled {
            id: ItemId::new("id-000"),
        },
    );

    let (_, effects) = update(state, Msg::BatchDeleteConfirmed);
    assert_eq!(
        effects,
        vec![Effect::DeleteBatch {
            ids: vec![ItemId::new("id-000"), ItemId::new("id-001")],
        }]
    );
}

#[test]
fn confirm_without_selection_is_a_noop() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::DeleteModeToggled);
    let (_, effects) = update(state, Msg::BatchDeleteConfirmed);
    assert!(effects.is_empty());
}

#[test]
fn batch_delete_completion_reloads_once_and_exits_delete_mode() {
    init_logging();
    let state = loaded_state();
    let session_before = state.session_id();
    let (state, _) = update(state, Msg::DeleteModeToggled);
    let (state, _) = update(
        state,
        Msg::ItemSelectionToggled {
            id: ItemId::new("id-002"),
        },
    );
    let (state, _) = update(state, Msg::BatchDeleteConfirmed);

    let (state, effects) = update(
        state,
        Msg::MutationCompleted {
            kind: MutationKind::BatchDeleted { count: 1 },
        },
    );

    // Exactly one reload, no other effects.
    assert_eq!(effects.len(), 1);
    assert!(matches!(
        effects[0],
        Effect::FetchPage { session, ref request }
            if session == SessionId(session_before.0 + 1) && request.page == 1
    ));

    let view = state.view();
    assert!(!view.delete_mode);
    assert_eq!(view.selected_count, 0);
    assert_eq!(view.notice.as_deref(), Some("Deleted 1 item(s)"));
}

#[test]
fn create_and_update_completions_trigger_reload() {
    init_logging();
    for kind in [MutationKind::Created, MutationKind::Updated] {
        let state = loaded_state();
        let (state, effects) = update(state, Msg::MutationCompleted { kind });

        assert_eq!(effects.len(), 1);
        assert!(matches!(
            effects[0],
            Effect::FetchPage { ref request, .. } if request.page == 1
        ));
        assert!(state.view().rows.is_empty());
    }
}

#[test]
fn mutation_failure_surfaces_error_without_reload() {
    init_logging();
    let state = loaded_state();
    let (state, effects) = update(
        state,
        Msg::MutationFailed {
            kind: MutationKind::Deleted { count: 0 },
            error: "http status 500".to_string(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.rows.len(), 6);
    assert_eq!(
        view.error.as_deref(),
        Some("Error deleting items: http status 500")
    );
}

#[test]
fn selection_survives_filter_change_while_in_delete_mode() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::DeleteModeToggled);
    let (state, _) = update(
        state,
        Msg::ItemSelectionToggled {
            id: ItemId::new("id-003"),
        },
    );

    // Open-question policy: identifiers persist across the session change;
    // rows not loaded any more show up as stale selections.
    let (state, _) = update(state, Msg::CategorySelected(Some(Category::Medicinal)));
    let view = state.view();
    assert!(view.delete_mode);
    assert_eq!(view.selected_count, 1);
    assert_eq!(view.stale_selected_count, 1);
    assert!(view.rows.is_empty());
}
