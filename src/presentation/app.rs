//! Main application orchestrator.
//!
//! Owns the sync controller, the screen chrome, and the last built tree.
//! Every absorbed call outcome and every handled key rebuilds the whole
//! tree from state and redraws the frame; interaction is dispatched
//! through the behaviors bound on the tree's nodes.

use std::collections::BTreeMap;
use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, style::Color};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::{CallOutcome, RemoteCall, SyncController};
use crate::domain::ports::EventsPort;
use crate::infrastructure::AppConfig;

use super::events::{self, EventResult, Intent};
use super::render::commit;
use super::screen::{Chrome, Focus};
use super::tree::Node;
use super::views::build_tree;

/// The terminal application.
pub struct App {
    controller: SyncController,
    api: Arc<dyn EventsPort>,
    chrome: Chrome,
    tree: Node,
    outcome_tx: mpsc::UnboundedSender<CallOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<CallOutcome>,
}

impl App {
    /// Creates the application over an events port.
    #[must_use]
    pub fn new(api: Arc<dyn EventsPort>, config: &AppConfig) -> Self {
        let accent = config.accent_color.parse().unwrap_or(Color::Cyan);
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let controller = SyncController::new();
        let chrome = Chrome::new(accent);
        let tree = build_tree(controller.state(), &chrome.form.values());

        Self {
            controller,
            api,
            chrome,
            tree,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error when drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let calls = self.controller.refresh();
        self.spawn_calls(calls);
        self.rebuild();
        terminal.draw(|frame| commit(frame, &self.tree, &self.chrome))?;

        let mut terminal_events = EventStream::new();
        loop {
            tokio::select! {
                Some(outcome) = self.outcome_rx.recv() => {
                    if outcome.settles_create() {
                        self.chrome.form.reset();
                    }
                    let follow_ups = self.controller.absorb(outcome);
                    self.spawn_calls(follow_ups);
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        break;
                    }
                }
            }

            self.rebuild();
            terminal.draw(|frame| commit(frame, &self.tree, &self.chrome))?;
        }

        info!("application exiting normally");
        Ok(())
    }

    /// Rebuilds the whole tree from the current state. The previous tree is
    /// dropped; nothing is diffed or reused.
    fn rebuild(&mut self) {
        self.tree = build_tree(self.controller.state(), &self.chrome.form.values());
        let rows = self.controller.state().events.len().max(1);
        self.chrome.clamp_list_cursor(rows);
    }

    fn spawn_calls(&self, calls: Vec<RemoteCall>) {
        for call in calls {
            let api = self.api.clone();
            let tx = self.outcome_tx.clone();
            tokio::spawn(async move {
                let _ = tx.send(call.execute(api).await);
            });
        }
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) => self.handle_key(key),
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if events::is_interrupt_event(&key) {
            return EventResult::Exit;
        }

        if self.chrome.confirm_delete {
            match key.code {
                KeyCode::Char('y' | 'Y') => {
                    self.chrome.confirm_delete = false;
                    let calls = self.controller.delete_selected();
                    self.spawn_calls(calls);
                }
                KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                    self.chrome.confirm_delete = false;
                }
                _ => {}
            }
            return EventResult::Continue;
        }

        let typing = self.chrome.focus == Focus::Form && !self.chrome.form.on_submit_button();
        if !typing && events::is_quit_event(&key) {
            return EventResult::Exit;
        }

        match key.code {
            KeyCode::Tab => self.chrome.focus_next(),
            KeyCode::BackTab => self.chrome.focus_prev(),
            KeyCode::Char('r') if !typing => {
                let calls = self.controller.refresh();
                self.spawn_calls(calls);
            }
            KeyCode::Char('d') if !typing => self.activate_delete_control(),
            _ => match self.chrome.focus {
                Focus::Form => self.handle_form_key(key),
                Focus::List => self.handle_list_key(key),
                Focus::Details => self.handle_details_key(key),
            },
        }

        EventResult::Continue
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if self.chrome.form.on_submit_button() {
                    self.submit_form();
                } else {
                    self.chrome.form.focus_next_field();
                }
            }
            KeyCode::Esc => self.chrome.set_focus(Focus::List),
            KeyCode::Down => self.chrome.form.focus_next_field(),
            KeyCode::Up => self.chrome.form.focus_prev_field(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(input) = self.chrome.form.focused_input_mut() {
                    input.input_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = self.chrome.form.focused_input_mut() {
                    input.backspace();
                }
            }
            KeyCode::Delete => {
                if let Some(input) = self.chrome.form.focused_input_mut() {
                    input.delete();
                }
            }
            KeyCode::Left => {
                if let Some(input) = self.chrome.form.focused_input_mut() {
                    input.move_left();
                }
            }
            KeyCode::Right => {
                if let Some(input) = self.chrome.form.focused_input_mut() {
                    input.move_right();
                }
            }
            KeyCode::Home => {
                if let Some(input) = self.chrome.form.focused_input_mut() {
                    input.move_start();
                }
            }
            KeyCode::End => {
                if let Some(input) = self.chrome.form.focused_input_mut() {
                    input.move_end();
                }
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.chrome.list_cursor = self.chrome.list_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                let rows = self.controller.state().events.len().max(1);
                self.chrome.list_cursor = (self.chrome.list_cursor + 1).min(rows - 1);
            }
            KeyCode::Enter => {
                if let Some(intent) = self.list_row_intent(self.chrome.list_cursor) {
                    self.dispatch(intent);
                }
            }
            _ => {}
        }
    }

    fn handle_details_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.activate_delete_control();
        }
    }

    /// Dispatches the form's bound submit behavior.
    fn submit_form(&mut self) {
        let intent = self
            .tree
            .find_by_class("party-form")
            .and_then(|form| form.handler("submit"));
        if let Some(intent) = intent {
            self.dispatch(intent);
        }
    }

    /// The click behavior bound on the list row under the cursor.
    fn list_row_intent(&self, row: usize) -> Option<Intent> {
        self.tree
            .find_by_class("party-list")?
            .elements_by_tag("li")
            .get(row)?
            .handler("click")
    }

    /// Dispatches the click behavior of the details pane's delete control,
    /// when one is rendered.
    fn activate_delete_control(&mut self) {
        let intent = self
            .tree
            .find_by_class("party-details")
            .and_then(|details| details.descendants().find_map(|e| e.handler("click")));
        if let Some(intent) = intent {
            self.dispatch(intent);
        }
    }

    fn dispatch(&mut self, intent: Intent) {
        debug!(?intent, "dispatching intent");
        match intent {
            Intent::Select(id) => {
                let calls = self.controller.select(id);
                self.spawn_calls(calls);
            }
            Intent::SubmitForm => self.create_from_form(),
            Intent::RequestDelete => {
                if self.controller.state().selected_id.is_some() {
                    self.chrome.confirm_delete = true;
                }
            }
        }
    }

    fn create_from_form(&mut self) {
        let Some(fields) = self.extract_form_fields() else {
            self.chrome.form_hint = Some("All fields are required.".to_string());
            return;
        };
        self.chrome.form_hint = None;

        let calls = self.controller.create(&fields);
        if calls.is_empty() {
            // The action settled synchronously (unparseable date); a submit
            // always resets the fields once its action is over.
            self.chrome.form.reset();
        }
        self.spawn_calls(calls);
    }

    /// Collects `name -> value` pairs from the form's input nodes. Returns
    /// nothing when a required field is empty.
    fn extract_form_fields(&self) -> Option<BTreeMap<String, String>> {
        let form = self.tree.find_by_class("party-form")?;
        let mut fields = BTreeMap::new();
        for input in form.descendants().filter(|e| e.attr("name").is_some()) {
            let name = input.attr("name")?.to_string();
            let value = input.attr("value").unwrap_or_default().to_string();
            if input.attr("required") == Some("true") && value.trim().is_empty() {
                return None;
            }
            fields.insert(name, value);
        }
        Some(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::CallOutcome;
    use crate::domain::entities::{EventId, EventSummary};
    use crate::domain::ports::mocks::MockEventsPort;

    fn make_app() -> App {
        App::new(Arc::new(MockEventsPort::new()), &AppConfig::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn load_events(app: &mut App, events: Vec<EventSummary>) {
        let _ = app.controller.refresh();
        let _ = app.controller.absorb(CallOutcome::ListFetched {
            seq: 1,
            result: Ok(events),
        });
        app.rebuild();
    }

    #[test]
    fn test_quit_key_exits_outside_form() {
        let mut app = make_app();

        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), EventResult::Exit);
    }

    #[test]
    fn test_q_types_into_focused_form_field() {
        let mut app = make_app();
        app.chrome.set_focus(Focus::Form);

        let result = app.handle_key(key(KeyCode::Char('q')));

        assert_eq!(result, EventResult::Continue);
        assert_eq!(app.chrome.form.values().name, "q");
    }

    #[test]
    fn test_submit_with_empty_fields_sets_hint() {
        let mut app = make_app();
        app.chrome.set_focus(Focus::Form);
        while !app.chrome.form.on_submit_button() {
            app.chrome.form.focus_next_field();
        }
        app.rebuild();

        app.handle_form_key(key(KeyCode::Enter));

        assert_eq!(
            app.chrome.form_hint.as_deref(),
            Some("All fields are required.")
        );
    }

    #[test]
    fn test_delete_request_needs_a_selection() {
        let mut app = make_app();
        app.dispatch(Intent::RequestDelete);
        assert!(!app.chrome.confirm_delete);

        load_events(
            &mut app,
            vec![EventSummary::new(1, "Gala", "2025-12-31T00:00:00.000Z", "Hall")],
        );
        app.dispatch(Intent::RequestDelete);

        assert!(app.chrome.confirm_delete);
    }

    #[tokio::test]
    async fn test_enter_on_list_row_dispatches_its_bound_select() {
        let mut app = make_app();
        load_events(
            &mut app,
            vec![
                EventSummary::new(1, "Gala", "2025-12-31T00:00:00.000Z", "Hall"),
                EventSummary::new(2, "Brunch", "2026-01-01T00:00:00.000Z", "Patio"),
            ],
        );
        app.chrome.list_cursor = 1;

        app.handle_list_key(key(KeyCode::Enter));

        assert_eq!(app.controller.state().selected_id, Some(EventId(2)));
    }

    #[tokio::test]
    async fn test_filled_submit_issues_create_that_settles() {
        let mut app = make_app();
        app.chrome.set_focus(Focus::Form);
        for (field, value) in [
            ("name", "Gala"),
            ("description", "Fun"),
            ("date", "2025-12-31"),
            ("location", "Hall A"),
        ] {
            let input = app.chrome.form.focused_input_mut().unwrap();
            assert_eq!(input.label().to_ascii_lowercase(), field);
            input.set_value(value);
            app.chrome.form.focus_next_field();
        }
        app.rebuild();

        app.submit_form();

        let outcome = app.outcome_rx.recv().await.expect("create call completes");
        assert!(outcome.settles_create());
        assert!(app.chrome.form_hint.is_none());
    }

    #[test]
    fn test_confirm_overlay_cancel_keeps_selection() {
        let mut app = make_app();
        load_events(
            &mut app,
            vec![EventSummary::new(1, "Gala", "2025-12-31T00:00:00.000Z", "Hall")],
        );
        app.chrome.confirm_delete = true;

        app.handle_key(key(KeyCode::Char('n')));

        assert!(!app.chrome.confirm_delete);
        assert_eq!(app.controller.state().selected_id, Some(EventId(1)));
    }
}
