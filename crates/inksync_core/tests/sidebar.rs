use inksync_core::model::document::UNTITLED_DISPLAY_TITLE;
use inksync_core::service::sidebar::{format_epoch_date, DELETE_CONFIRMATION_PROMPT};
use inksync_core::{DocumentStore, ManualClock, MemoryStorage, SidebarController};

fn store_with(blob: &str) -> DocumentStore<MemoryStorage> {
    DocumentStore::load_with_clock(
        MemoryStorage::with_blob(blob),
        Box::new(ManualClock::new(1_700_000_000_000)),
    )
}

#[test]
fn view_lists_documents_in_order_and_highlights_selection() {
    let mut store = store_with(
        r#"[{"id":"a","title":"Tale","lastEdited":1700000000000},{"id":"b","title":"  ","lastEdited":0}]"#,
    );
    let sidebar = SidebarController::new();
    store.select("b");

    let view = sidebar.view(&store);

    assert_eq!(view.items.len(), 2);
    assert_eq!(view.items[0].id, "a");
    assert_eq!(view.items[0].title, "Tale");
    assert_eq!(view.items[0].edited_on, format_epoch_date(1_700_000_000_000));
    assert!(!view.items[0].is_active);
    assert_eq!(view.items[1].title, UNTITLED_DISPLAY_TITLE);
    assert_eq!(view.items[1].edited_on, format_epoch_date(0));
    assert!(view.items[1].is_active);
}

#[test]
fn view_includes_static_collaborators() {
    let store = store_with("[]");
    let view = SidebarController::new().view(&store);

    let names: Vec<&str> = view.collaborators.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Mochi", "Luna"]);
    assert!(view.collaborators.iter().all(|c| c.is_online));
    assert!(view.items.is_empty());
}

#[test]
fn new_document_appears_first_and_active() {
    let mut store = store_with(r#"[{"id":"a","lastEdited":1}]"#);
    let sidebar = SidebarController::new();

    let id = sidebar.new_document(&mut store);
    let view = sidebar.view(&store);

    assert_eq!(view.items[0].id, id);
    assert!(view.items[0].is_active);
    assert!(!view.items[1].is_active);
}

#[test]
fn delete_requires_confirmation() {
    let mut store = store_with(r#"[{"id":"a","lastEdited":1},{"id":"b","lastEdited":1}]"#);
    let mut sidebar = SidebarController::new();

    let prompt = sidebar.request_delete(&store, "a");
    assert_eq!(prompt, Some(DELETE_CONFIRMATION_PROMPT));
    assert_eq!(sidebar.pending_delete(), Some("a"));
    assert_eq!(store.len(), 2);

    assert!(sidebar.confirm_delete(&mut store));
    assert_eq!(store.len(), 1);
    assert_eq!(store.active_id(), Some("b"));
    assert_eq!(sidebar.pending_delete(), None);
}

#[test]
fn cancelled_delete_keeps_document() {
    let mut store = store_with(r#"[{"id":"a","lastEdited":1}]"#);
    let mut sidebar = SidebarController::new();

    sidebar.request_delete(&store, "a");
    sidebar.cancel_delete();

    assert!(!sidebar.confirm_delete(&mut store));
    assert_eq!(store.len(), 1);
}

#[test]
fn delete_request_for_unknown_id_is_rejected() {
    let store = store_with(r#"[{"id":"a","lastEdited":1}]"#);
    let mut sidebar = SidebarController::new();

    assert!(sidebar.request_delete(&store, "zzz").is_none());
    assert_eq!(sidebar.pending_delete(), None);
}

#[test]
fn select_relays_to_store() {
    let mut store = store_with(r#"[{"id":"a","lastEdited":1},{"id":"b","lastEdited":1}]"#);
    let sidebar = SidebarController::new();

    assert!(sidebar.select(&mut store, "b"));
    assert!(!sidebar.select(&mut store, "nope"));
    assert_eq!(store.active_id(), Some("b"));
}
