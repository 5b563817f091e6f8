//! Interactive session composing the sidebar and editor controllers.
//!
//! # Invariants
//! - Suggestion calls run on spawned tasks; stdin keeps being served while
//!   one is in flight.
//! - A pending delete confirmation consumes the next input line.

use crate::command::{is_affirmative, parse_command, Command};
use inksync_core::{
    DocumentId, DocumentStorage, DocumentStore, EditorController, GeminiBackend,
    PresentationEffects, SharedEffects, SidebarController, SuggestionClient, SuggestionRequest,
};
use log::{error, info};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const HELP_TEXT: &str = "\
Commands:
  list                 show your stories
  new                  start a new draft
  open <n|id>          switch to a draft
  title <text>         rename the current draft
  write <text>         replace the draft text (\\n for new lines)
  append <text>        add a line to the draft
  show                 print the current draft
  ask <instruction>    ask the AI muse for a suggestion
  delete <n|id>        delete a draft (asks for confirmation)
  quit                 leave InkSync";

/// Prints sparkles around suggestion calls.
pub struct TerminalEffects;

impl PresentationEffects for TerminalEffects {
    fn suggestion_started(&self) {
        println!("✨ The muse is thinking...");
    }

    fn suggestion_finished(&self) {
        println!("✨ Suggestion added.");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

type Completion = (SuggestionRequest, String);

pub struct Session<S: DocumentStorage> {
    store: DocumentStore<S>,
    editor: EditorController,
    sidebar: SidebarController,
    client: Arc<SuggestionClient<GeminiBackend>>,
    completions: mpsc::UnboundedSender<Completion>,
}

impl<S: DocumentStorage> Session<S> {
    /// Serves stdin until `quit` or end of input.
    pub async fn run(
        store: DocumentStore<S>,
        client: SuggestionClient<GeminiBackend>,
        effects: SharedEffects,
    ) {
        let (completions, mut completed) = mpsc::unbounded_channel::<Completion>();
        let mut session = Self {
            store,
            editor: EditorController::with_effects(Arc::clone(&effects)),
            sidebar: SidebarController::with_effects(effects),
            client: Arc::new(client),
            completions,
        };

        session.print_list();
        println!("Type `help` for commands.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            prompt();
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if session.handle_line(&line) == Flow::Quit {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        error!("event=stdin_read module=cli status=error error={err}");
                        break;
                    }
                },
                Some((request, text)) = completed.recv() => {
                    session.finish_suggestion(request, &text);
                }
            }
        }

        info!(
            "event=session_end module=cli status=ok documents={}",
            session.store.len()
        );
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if self.sidebar.pending_delete().is_some() {
            if is_affirmative(line) {
                self.sidebar.confirm_delete(&mut self.store);
                println!("Draft deleted.");
                self.print_list();
            } else {
                self.sidebar.cancel_delete();
                println!("Kept it.");
            }
            return Flow::Continue;
        }

        match parse_command(line) {
            Command::Empty => {}
            Command::Help => println!("{HELP_TEXT}"),
            Command::List => self.print_list(),
            Command::New => {
                self.sidebar.new_document(&mut self.store);
                println!("New draft ready. Give it a `title` and start writing.");
                self.print_list();
            }
            Command::Open(target) => {
                let selected = self
                    .resolve(&target)
                    .is_some_and(|id| self.sidebar.select(&mut self.store, &id));
                if selected {
                    self.print_active();
                } else {
                    println!("No draft matches `{target}`.");
                }
            }
            Command::Title(title) => {
                if !self.editor.edit_title(&mut self.store, title) {
                    print_no_draft();
                }
            }
            Command::Write(content) => {
                if !self.editor.edit_content(&mut self.store, content) {
                    print_no_draft();
                }
            }
            Command::Append(line) => {
                let appended = self
                    .store
                    .active_document()
                    .map(|doc| append_line(&doc.content, &line));
                match appended {
                    Some(content) => {
                        self.editor.edit_content(&mut self.store, content);
                    }
                    None => print_no_draft(),
                }
            }
            Command::Show => self.print_active(),
            Command::Ask(instruction) => self.start_suggestion(instruction),
            Command::Delete(target) => match self.resolve(&target) {
                Some(id) => {
                    if let Some(prompt) = self.sidebar.request_delete(&self.store, &id) {
                        println!("{prompt} (y/n)");
                    }
                }
                None => println!("No draft matches `{target}`."),
            },
            Command::Quit => return Flow::Quit,
            Command::Unknown(input) => println!("Unknown command `{input}`. Try `help`."),
        }
        Flow::Continue
    }

    fn start_suggestion(&mut self, instruction: String) {
        if self.editor.is_awaiting() {
            println!("A suggestion is already on its way...");
            return;
        }
        if self.store.active_document().is_none() {
            print_no_draft();
            return;
        }
        self.editor.set_instruction(instruction);
        let Some(request) = self.editor.begin_suggestion(&self.store) else {
            println!("Ask the AI something, like `ask expand this thought`.");
            return;
        };

        let client = Arc::clone(&self.client);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let text = client.suggest(&request.context, &request.instruction).await;
            // Receiver only disappears when the session has ended.
            let _ = completions.send((request, text));
        });
    }

    fn finish_suggestion(&mut self, request: SuggestionRequest, text: &str) {
        let target = request.document_id.clone();
        if self
            .editor
            .complete_suggestion(&mut self.store, request, text)
            && self.store.active_id() == Some(target.as_str())
        {
            self.print_active();
        }
    }

    /// Resolves a 1-based list position or an id (prefix) to a document id.
    fn resolve(&self, target: &str) -> Option<DocumentId> {
        let documents = self.store.documents();
        if let Ok(position) = target.parse::<usize>() {
            if let Some(doc) = position.checked_sub(1).and_then(|index| documents.get(index)) {
                return Some(doc.id.clone());
            }
        }
        if let Some(doc) = self.store.get(target) {
            return Some(doc.id.clone());
        }
        let mut matches = documents.iter().filter(|doc| doc.id.starts_with(target));
        match (matches.next(), matches.next()) {
            (Some(doc), None) => Some(doc.id.clone()),
            _ => None,
        }
    }

    fn print_list(&self) {
        let view = self.sidebar.view(&self.store);
        println!("── My Stories ──");
        if view.items.is_empty() {
            println!("  (no drafts) Type `new` to start a new story ✨");
        }
        for (index, item) in view.items.iter().enumerate() {
            let marker = if item.is_active { '>' } else { ' ' };
            println!("{marker} {:>2}. {}  [{}]", index + 1, item.title, item.edited_on);
        }
        let live: Vec<String> = view
            .collaborators
            .iter()
            .map(|c| {
                if c.is_online {
                    format!("{} ●", c.name)
                } else {
                    c.name.clone()
                }
            })
            .collect();
        println!("── Live Now: {} ──", live.join(", "));
    }

    fn print_active(&self) {
        match self.store.active_document() {
            Some(doc) => {
                println!("# {}", doc.display_title());
                if doc.content.is_empty() {
                    println!("(Once upon a time...)");
                } else {
                    println!("{}", doc.content);
                }
            }
            None => print_no_draft(),
        }
    }
}

fn append_line(content: &str, line: &str) -> String {
    if content.is_empty() {
        line.to_string()
    } else {
        format!("{content}\n{line}")
    }
}

fn print_no_draft() {
    println!("No draft selected. Type `new` to start a new story ✨");
}

fn prompt() {
    print!("inksync> ");
    let _ = std::io::stdout().flush();
}
