//! TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::utils::truncate_str;
use super::views;
use crate::config::Config;
use crate::domain::{Action, EnqueueError, Outcome, TaskDraft, TaskStore, ValidationError};

/// Which form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Name,
    Type,
    Length,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Name => Focus::Type,
            Focus::Type => Focus::Length,
            Focus::Length => Focus::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Name => Focus::Length,
            Focus::Type => Focus::Name,
            Focus::Length => Focus::Type,
        }
    }
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Blocking error dialog; swallows input until dismissed
    Alert(String),
    /// Esc was pressed while tasks exist; nothing is kept after exit
    ConfirmQuit,
}

/// Application state
pub struct App {
    store: TaskStore,
    config: Config,
    focus: Focus,
    input_mode: InputMode,

    /// Name field contents
    name: String,

    /// Index into `config.categories`, unset until chosen
    type_index: Option<usize>,

    /// Index into `config.lengths`, unset until chosen
    length_index: Option<usize>,

    status_message: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            store: TaskStore::new(),
            config,
            focus: Focus::Name,
            input_mode: InputMode::Normal,
            name: String::new(),
            type_index: None,
            length_index: None,
            status_message: None,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit() {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize | Event::Tick => {}
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        views::queue::draw(frame, self);
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Alert(_) => self.handle_alert_key(key),
            InputMode::ConfirmQuit => self.handle_confirm_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('d') {
                self.dequeue();
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.request_quit(),
            KeyCode::Enter => self.enqueue(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            code => match self.focus {
                Focus::Name => self.edit_name(code),
                Focus::Type => {
                    self.type_index = cycle(code, self.type_index, self.config.categories.len());
                }
                Focus::Length => {
                    self.length_index = cycle(code, self.length_index, self.config.lengths.len());
                }
            },
        }
    }

    fn handle_alert_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.input_mode = InputMode::Normal;
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.should_quit = true,
            _ => self.input_mode = InputMode::Normal,
        }
    }

    fn request_quit(&mut self) {
        if self.store.is_empty() {
            self.should_quit = true;
        } else {
            self.input_mode = InputMode::ConfirmQuit;
        }
    }

    fn edit_name(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.name.push(c),
            KeyCode::Backspace => {
                self.name.pop();
            }
            _ => {}
        }
    }

    /// Current form contents as a draft
    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            name: self.name.clone(),
            task_type: self
                .type_index
                .and_then(|i| self.config.categories.get(i))
                .cloned(),
            length_hours: self
                .length_index
                .and_then(|i| self.config.lengths.get(i))
                .copied(),
        }
    }

    fn enqueue(&mut self) {
        let action = Action::Enqueue(self.draft());
        match self.store.apply(&action) {
            Ok(outcome) => self.report(&outcome),
            Err(e) => self.input_mode = InputMode::Alert(alert_message(&e)),
        }
    }

    fn dequeue(&mut self) {
        match self.store.apply(&Action::Dequeue) {
            Ok(outcome) => self.report(&outcome),
            Err(e) => self.input_mode = InputMode::Alert(alert_message(&e)),
        }
    }

    fn report(&mut self, outcome: &Outcome) {
        let message = match outcome {
            Outcome::Created(t) => format!("Enqueued: {}", truncate_str(&t.name, 40)),
            Outcome::Merged(t) => format!(
                "Rescheduled: {} now due {}",
                truncate_str(&t.name, 40),
                self.config.format_time(t.due_at)
            ),
            Outcome::Completed(t) => format!("Completed: {}", truncate_str(&t.name, 40)),
            Outcome::NothingPending => "Nothing left to dequeue".to_string(),
        };
        self.status_message = Some(message);
    }

    // Public accessors for views

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selected_type(&self) -> Option<&str> {
        self.type_index
            .and_then(|i| self.config.categories.get(i))
            .map(String::as_str)
    }

    pub fn selected_length(&self) -> Option<u32> {
        self.length_index
            .and_then(|i| self.config.lengths.get(i))
            .copied()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// Moves a selector through `len` options; Backspace/Delete clears it
fn cycle(code: KeyCode, current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match code {
        KeyCode::Down | KeyCode::Right | KeyCode::Char(' ') => {
            Some(current.map_or(0, |i| (i + 1) % len))
        }
        KeyCode::Up | KeyCode::Left => Some(current.map_or(len - 1, |i| {
            if i == 0 {
                len - 1
            } else {
                i - 1
            }
        })),
        KeyCode::Backspace | KeyCode::Delete => None,
        _ => current,
    }
}

/// Text for the error dialog
fn alert_message(err: &EnqueueError) -> String {
    match err {
        EnqueueError::Validation(ValidationError::MissingName) => "No task name entered!".into(),
        EnqueueError::Validation(ValidationError::MissingType) => "No task type selected!".into(),
        EnqueueError::Validation(ValidationError::MissingLength) => {
            "No task length selected!".into()
        }
        EnqueueError::Validation(ValidationError::InvalidLength) => {
            "Task length must be at least one hour!".into()
        }
        EnqueueError::Validation(ValidationError::DueOutOfRange) => {
            "Task length is too long!".into()
        }
        EnqueueError::Duplicate { .. } => "Task already exists!".into(),
    }
}
