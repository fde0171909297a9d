//! Application state and key handling

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use uuid::Uuid;

use contacts_core::{ApiError, Contact};

use crate::client::{
    FormController, FormField, ListController, MutationEvent, Notice, SubmitBlocked,
    SubmitRequest,
};

/// How long a notice stays in the status bar
const NOTICE_TIMEOUT: Duration = Duration::from_secs(3);

/// Which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Form,
    List,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Form => ActivePane::List,
            ActivePane::List => ActivePane::Form,
        }
    }
}

/// Service calls requested by a key press, run off the UI loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Submit(SubmitRequest),
    Delete(Uuid),
}

/// Application state
pub struct App {
    pub should_quit: bool,
    pub active_pane: ActivePane,
    /// Focused form input
    pub field: FormField,
    pub form: FormController,
    pub list: ListController,
    /// Whether the first snapshot has arrived
    pub loaded: bool,
    pub notice: Option<Notice>,
    notice_time: Option<Instant>,
    pub show_help: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            active_pane: ActivePane::Form,
            field: FormField::Name,
            form: FormController::new(),
            list: ListController::new(),
            loaded: false,
            notice: None,
            notice_time: None,
            show_help: false,
        }
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.notice_time = Some(Instant::now());
    }

    /// Clear an expired notice
    pub fn check_notice_timeout(&mut self) {
        if let Some(time) = self.notice_time {
            if time.elapsed() > NOTICE_TIMEOUT {
                self.notice = None;
                self.notice_time = None;
            }
        }
    }

    pub fn apply_snapshot(&mut self, contacts: Vec<Contact>) {
        self.list.replace(contacts);
        self.loaded = true;
    }

    /// Record a finished submit, returning the mutation to publish
    pub fn on_submitted(&mut self, result: Result<Contact, ApiError>) -> Option<MutationEvent> {
        let outcome = self.form.finish_submit(result);
        if !outcome.notice.is_error() {
            self.field = FormField::Name;
        }
        self.set_notice(outcome.notice);
        outcome.mutation
    }

    /// Record a finished delete, returning the mutation to publish
    pub fn on_deleted(&mut self, result: Result<(), ApiError>) -> Option<MutationEvent> {
        let outcome = self.list.finish_delete(result);
        self.set_notice(outcome.notice);
        outcome.mutation
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if self.show_help {
            self.show_help = false;
            return None;
        }

        // The confirmation is modal
        if self.list.pending_delete().is_some() {
            return self.handle_confirm_key(key.code);
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.active_pane = self.active_pane.next();
                return None;
            }
            _ => {}
        }

        match self.active_pane {
            ActivePane::Form => self.handle_form_key(key.code),
            ActivePane::List => self.handle_list_key(key.code),
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.list.begin_delete().map(Action::Delete)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.list.cancel_delete();
                None
            }
            _ => None,
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Enter => match self.form.begin_submit() {
                Ok(request) => return Some(Action::Submit(request)),
                Err(SubmitBlocked::Invalid(message)) => {
                    self.set_notice(Notice::Error(message.to_string()))
                }
                Err(SubmitBlocked::InFlight) => {}
            },
            KeyCode::Esc => {
                if self.form.editing().is_some() {
                    self.form.cancel_edit();
                    self.field = FormField::Name;
                } else {
                    self.active_pane = ActivePane::List;
                }
            }
            KeyCode::Up => self.field = self.field.prev(),
            KeyCode::Down => self.field = self.field.next(),
            KeyCode::Backspace => self.form.pop_char(self.field),
            KeyCode::Char(c) => {
                self.form.push_char(self.field, c);
            }
            _ => {}
        }
        None
    }

    fn handle_list_key(&mut self, code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('j') | KeyCode::Down => self.list.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.list.move_up(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(id) = self.list.selected().map(|c| c.id) {
                    self.list.toggle_expand(id);
                }
            }
            KeyCode::Char('a') => {
                self.active_pane = ActivePane::Form;
                self.field = FormField::Name;
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.list.selected().map(|c| c.id) {
                    if self.list.edit(id, &mut self.form) {
                        self.active_pane = ActivePane::Form;
                        self.field = FormField::Name;
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.list.selected().map(|c| c.id) {
                    self.list.request_delete(id);
                }
            }
            _ => {}
        }
        None
    }
}
