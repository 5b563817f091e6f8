use async_trait::async_trait;
use inksync_core::service::editor::CONTEXT_WINDOW_CHARS;
use inksync_core::suggestion::FAILURE_FALLBACK;
use inksync_core::{
    DocumentStore, EditorController, ManualClock, MemoryStorage, PresentationEffects,
    SuggestionBackend, SuggestionClient, SuggestionError, SuggestionState,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Records prompts and answers with a fixed text (or fails when `None`).
struct ScriptedBackend {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SuggestionBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str) -> Result<String, SuggestionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or(SuggestionError::Status {
            code: 503,
            body: "unavailable".to_string(),
        })
    }
}

#[derive(Default)]
struct CountingEffects {
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl PresentationEffects for CountingEffects {
    fn suggestion_started(&self) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn suggestion_finished(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

fn store_with(blob: &str) -> DocumentStore<MemoryStorage> {
    DocumentStore::load_with_clock(
        MemoryStorage::with_blob(blob),
        Box::new(ManualClock::new(10)),
    )
}

#[tokio::test]
async fn suggestion_is_appended_after_blank_line() {
    let mut store = store_with(r#"[{"id":"1","content":"Once upon a time","lastEdited":1}]"#);
    let client = SuggestionClient::new(ScriptedBackend::replying("there was a fox."));
    let mut editor = EditorController::new();

    editor.set_instruction("continue");
    assert!(editor.suggest_inline(&mut store, &client).await);

    assert_eq!(
        store.get("1").unwrap().content,
        "Once upon a time\n\nthere was a fox."
    );
    assert_eq!(editor.state(), SuggestionState::Idle);
    assert_eq!(editor.instruction(), "");
    let prompts = client.backend().prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"continue\""));
}

#[tokio::test]
async fn suggestion_into_empty_document_has_no_separator() {
    let mut store = store_with(r#"[{"id":"1","lastEdited":1}]"#);
    let client = SuggestionClient::new(ScriptedBackend::replying("A fresh start."));
    let mut editor = EditorController::new();

    editor.set_instruction("begin a story");
    editor.suggest_inline(&mut store, &client).await;

    assert_eq!(store.get("1").unwrap().content, "A fresh start.");
}

#[tokio::test]
async fn failing_service_appends_fallback_and_returns_to_idle() {
    let mut store = store_with(r#"[{"id":"1","content":"Draft","lastEdited":1}]"#);
    let client = SuggestionClient::new(ScriptedBackend::failing());
    let effects = Arc::new(CountingEffects::default());
    let mut editor = EditorController::with_effects(effects.clone());

    editor.set_instruction("expand this thought");
    assert!(editor.suggest_inline(&mut store, &client).await);

    assert_eq!(
        store.get("1").unwrap().content,
        format!("Draft\n\n{FAILURE_FALLBACK}")
    );
    assert!(!editor.is_awaiting());
    assert_eq!(effects.started.load(Ordering::SeqCst), 1);
    assert_eq!(effects.finished.load(Ordering::SeqCst), 1);
}

#[test]
fn blank_instruction_never_leaves_idle() {
    let store = store_with(r#"[{"id":"1","lastEdited":1}]"#);
    let mut editor = EditorController::new();

    editor.set_instruction("   \n\t");
    assert!(!editor.can_submit());
    assert!(editor.begin_suggestion(&store).is_none());
    assert_eq!(editor.state(), SuggestionState::Idle);
}

#[test]
fn no_active_document_never_leaves_idle() {
    let store = store_with("[]");
    let mut editor = EditorController::new();

    editor.set_instruction("continue");
    assert!(editor.begin_suggestion(&store).is_none());
    assert_eq!(editor.state(), SuggestionState::Idle);
}

#[test]
fn second_submission_while_awaiting_is_ignored() {
    let mut store = store_with(r#"[{"id":"1","content":"Start","lastEdited":1}]"#);
    let mut editor = EditorController::new();

    editor.set_instruction("first");
    let request = editor.begin_suggestion(&store).unwrap();
    assert!(editor.is_awaiting());
    assert!(!editor.can_submit());

    editor.set_instruction("second");
    assert!(editor.begin_suggestion(&store).is_none());

    assert!(editor.complete_suggestion(&mut store, request, "one"));
    assert_eq!(store.get("1").unwrap().content, "Start\n\none");
    assert_eq!(editor.state(), SuggestionState::Idle);
}

#[test]
fn stale_request_is_not_applied_twice() {
    let mut store = store_with(r#"[{"id":"1","content":"Start","lastEdited":1}]"#);
    let mut editor = EditorController::new();

    editor.set_instruction("go");
    let request = editor.begin_suggestion(&store).unwrap();
    let replay = request.clone();
    assert!(editor.complete_suggestion(&mut store, request, "once"));
    assert!(!editor.complete_suggestion(&mut store, replay, "twice"));

    assert_eq!(store.get("1").unwrap().content, "Start\n\nonce");
}

#[test]
fn context_is_bounded_to_trailing_window() {
    let long = format!("{}{}", "a".repeat(1_000), "z".repeat(CONTEXT_WINDOW_CHARS - 1));
    let blob = serde_json::json!([{ "id": "1", "content": long, "lastEdited": 1 }]).to_string();
    let store = store_with(&blob);
    let mut editor = EditorController::new();

    editor.set_instruction("summarize");
    let request = editor.begin_suggestion(&store).unwrap();

    assert_eq!(request.context.chars().count(), CONTEXT_WINDOW_CHARS);
    assert!(request.context.starts_with("az"));
    assert_eq!(request.instruction, "summarize");
    assert_eq!(request.document_id, "1");
}

#[test]
fn result_targets_document_active_at_request_time() {
    let mut store = store_with(
        r#"[{"id":"1","content":"First","lastEdited":1},{"id":"2","content":"Second","lastEdited":1}]"#,
    );
    let mut editor = EditorController::new();

    editor.set_instruction("continue");
    let request = editor.begin_suggestion(&store).unwrap();
    assert!(store.select("2"));
    assert!(editor.edit_content(&mut store, "Second, edited meanwhile"));

    assert!(editor.complete_suggestion(&mut store, request, "more"));
    assert_eq!(store.get("1").unwrap().content, "First\n\nmore");
    assert_eq!(store.get("2").unwrap().content, "Second, edited meanwhile");
    assert_eq!(store.active_id(), Some("2"));
}

#[test]
fn deleted_target_drops_result_but_still_returns_to_idle() {
    let mut store = store_with(
        r#"[{"id":"1","content":"First","lastEdited":1},{"id":"2","lastEdited":1}]"#,
    );
    let mut editor = EditorController::new();

    editor.set_instruction("continue");
    let request = editor.begin_suggestion(&store).unwrap();
    store.delete("1");

    assert!(!editor.complete_suggestion(&mut store, request, "lost"));
    assert_eq!(editor.state(), SuggestionState::Idle);
    assert_eq!(editor.instruction(), "");
    assert_eq!(store.get("2").unwrap().content, "");
}

#[test]
fn title_and_content_edits_target_active_document() {
    let mut store = store_with(r#"[{"id":"1","lastEdited":1},{"id":"2","lastEdited":1}]"#);
    let editor = EditorController::new();

    store.select("2");
    assert!(editor.edit_title(&mut store, "Chapter Two"));
    assert!(editor.edit_content(&mut store, "It was a dark night."));

    let second = store.get("2").unwrap();
    assert_eq!(second.title, "Chapter Two");
    assert_eq!(second.content, "It was a dark night.");
    assert_eq!(store.get("1").unwrap().title, "");
}
