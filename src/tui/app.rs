use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use tui_textarea::{CursorMove, TextArea};

use super::{
    form::{EntryForm, FormKind, FormOutcome, FormRequest},
    keymap::{KeyAction, KeyMap},
    theme::Theme,
};
use crate::{
    catalog::{CatalogRow, Subject, SubtopicNode},
    error::StoreError,
    session::Session,
    store::{round_rating, MAX_RATING, MIN_RATING},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Notes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Status {
    pub text: String,
    pub level: Level,
    pub at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub enum Modal {
    Form(EntryForm),
    ConfirmExit,
    /// Reloading would drop topics added since the last save.
    ConfirmReload,
}

pub struct App {
    pub session: Session,
    pub tab: Subject,
    pub rows: Vec<CatalogRow>,
    pub list_state: ListState,
    pub focus: Focus,
    pub notes: TextArea<'static>,
    /// Editor text as loaded by `select`, to tell whether it was edited.
    notes_loaded: String,
    /// Slider position; 1 when the selected row is unrated.
    pub slider: f64,
    pub modal: Option<Modal>,
    /// Topics or subtopics added since the file was last written.
    pub unsaved_topics: bool,
    pub status: Option<Status>,
    pub theme: Theme,
    pub keymap: KeyMap,
    pub rating_step: f64,
    pub left_width: u16,
    /// Set when the flush on exit failed; printed once the terminal is back.
    pub exit_error: Option<StoreError>,
}

impl App {
    pub fn new(
        session: Session,
        load_error: Option<StoreError>,
        theme: Theme,
        keymap: KeyMap,
        rating_step: f64,
    ) -> Self {
        let mut app = Self {
            session,
            tab: Subject::Math,
            rows: vec![],
            list_state: ListState::default(),
            focus: Focus::Tree,
            notes: TextArea::default(),
            notes_loaded: String::new(),
            slider: MIN_RATING,
            modal: None,
            unsaved_topics: false,
            status: None,
            theme,
            keymap,
            rating_step,
            left_width: 50,
            exit_error: None,
        };
        app.rebuild_rows();
        app.select(0);
        if let Some(e) = load_error {
            app.set_error(e.to_string());
        }
        app
    }

    pub fn rebuild_rows(&mut self) {
        self.rows = self.session.catalog().enumerate(self.tab);
        tracing::debug!(subject = self.tab.label(), rows = self.rows.len(), "rebuilt tree");
    }

    pub fn selected_row(&self) -> Option<&CatalogRow> {
        self.rows.get(self.list_state.selected()?)
    }

    pub fn selected_path(&self) -> Option<String> {
        self.selected_row().map(|r| r.path(self.tab))
    }

    /// Leaf metadata for the selected subtopic or concept row.
    pub fn selected_details(&self) -> Option<&SubtopicNode> {
        let row = self.selected_row()?;
        self.session
            .catalog()
            .subtopic(self.tab, &row.topic, row.subtopic.as_deref()?)
    }

    pub fn rated_count(&self) -> usize {
        let store = self.session.store();
        self.rows
            .iter()
            .filter(|r| store.rating(&r.path(self.tab)).is_some())
            .count()
    }

    pub fn notes_text(&self) -> String {
        self.notes.lines().join("\n")
    }

    pub fn notes_edited(&self) -> bool {
        self.notes_text() != self.notes_loaded
    }

    /// Moves the selection and loads that row's rating and note; unsaved
    /// editor text is discarded.
    pub fn select(&mut self, idx: usize) {
        if self.rows.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(idx.min(self.rows.len() - 1)));
        }
        let (rating, note) = match self.selected_path() {
            Some(path) => {
                let store = self.session.store();
                (store.rating(&path), store.note(&path).to_string())
            }
            None => (None, String::new()),
        };
        self.slider = rating.unwrap_or(MIN_RATING);
        // split on '\n' so a trailing newline survives as an empty last line
        let lines: Vec<String> = note
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        self.notes = TextArea::from(lines);
        self.notes_loaded = self.notes_text();
        self.notes.move_cursor(CursorMove::Bottom);
        self.notes.move_cursor(CursorMove::End);
    }

    fn select_path(&mut self, path: &str) {
        let idx = self
            .rows
            .iter()
            .position(|r| r.path(self.tab) == path)
            .unwrap_or(0);
        self.select(idx);
    }

    fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as isize;
        let next = (cur + delta).clamp(0, self.rows.len() as isize - 1);
        self.select(next as usize);
    }

    fn switch_tab(&mut self, subject: Subject) {
        self.tab = subject;
        self.rebuild_rows();
        self.select(0);
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            level: Level::Info,
            at: Local::now(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            level: Level::Error,
            at: Local::now(),
        });
    }

    fn save(&mut self) -> bool {
        match self.session.save() {
            Ok(()) => {
                self.unsaved_topics = false;
                true
            }
            Err(e) => {
                self.set_error(e.to_string());
                false
            }
        }
    }

    /// Clamps to the slider range, stores and flushes.
    pub fn apply_rating(&mut self, value: f64) {
        let Some(path) = self.selected_path() else {
            self.set_info("Select a topic first");
            return;
        };
        let value = round_rating(value.clamp(MIN_RATING, MAX_RATING));
        if let Some(stored) = self.session.store_mut().set_rating(&path, value) {
            self.slider = stored;
            if self.save() {
                self.set_info(format!("Current Rating: {:.1}", stored));
            }
        }
    }

    pub fn save_notes(&mut self) {
        let Some(path) = self.selected_path() else {
            return;
        };
        let text = self.notes_text();
        if !self.session.store_mut().set_note(&path, &text) {
            self.set_info("Nothing to save");
            return;
        }
        if self.save() {
            self.notes_loaded = text;
            self.set_info("Notes saved successfully!");
        }
    }

    fn open_form(&mut self, kind: FormKind) {
        let form = EntryForm::new(kind, self.tab, self.session.catalog());
        self.modal = Some(Modal::Form(form));
    }

    fn submit_form(&mut self, req: FormRequest) {
        match req {
            FormRequest::AddTopic { subject, name } => {
                let replaced = self.session.catalog_mut().add_topic(subject, &name).is_some();
                self.unsaved_topics = true;
                self.switch_tab(subject);
                self.select_path(&crate::catalog::topic_path(subject, [name.as_str()]));
                if replaced {
                    self.set_info(format!("Replaced topic \"{}\"", name));
                } else {
                    self.set_info(format!("Added topic \"{}\"", name));
                }
            }
            FormRequest::AddSubtopic {
                subject,
                topic,
                name,
            } => {
                if !self
                    .session
                    .catalog_mut()
                    .add_subtopic(subject, &topic, &name)
                {
                    self.set_error(format!("No topic \"{}\" under {}", topic, subject.label()));
                    return;
                }
                self.unsaved_topics = true;
                self.switch_tab(subject);
                self.select_path(&crate::catalog::topic_path(
                    subject,
                    [topic.as_str(), name.as_str()],
                ));
                self.set_info(format!("Added subtopic \"{}\"", name));
            }
        }
    }

    fn reload(&mut self) {
        let keep = self.selected_path();
        let err = self.session.reload();
        self.unsaved_topics = false;
        self.rebuild_rows();
        match keep {
            Some(p) => self.select_path(&p),
            None => self.select(0),
        }
        match err {
            Some(e) => self.set_error(e.to_string()),
            None => self.set_info(format!("Reloaded {}", self.session.path().display())),
        }
    }

    /// Stores the editor text if it was edited and flushes; failure is kept
    /// for the caller to report.
    fn close(&mut self) {
        let selected = self.selected_path().filter(|_| self.notes_edited());
        let pending = self.notes_text();
        if let Err(e) = self.session.close(selected.as_deref(), &pending) {
            self.exit_error = Some(e);
        }
    }

    fn resize_left(&mut self, delta: i16) {
        let w = self.left_width as i16 + delta;
        self.left_width = w.clamp(20, 80) as u16;
    }

    pub fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveDown => self.move_selection(1),
            KeyAction::MoveUp => self.move_selection(-1),
            KeyAction::SwitchTab => self.switch_tab(self.tab.other()),
            KeyAction::RatingUp => self.apply_rating(self.slider + self.rating_step),
            KeyAction::RatingDown => self.apply_rating(self.slider - self.rating_step),
            KeyAction::EditNotes => {
                if self.selected_row().is_some() {
                    self.focus = Focus::Notes;
                }
            }
            KeyAction::NewTopic => self.open_form(FormKind::Topic),
            KeyAction::NewSubtopic => self.open_form(FormKind::Subtopic),
            KeyAction::ResizeLeftShrink => self.resize_left(-5),
            KeyAction::ResizeLeftExpand => self.resize_left(5),
            KeyAction::Reload if self.unsaved_topics => self.modal = Some(Modal::ConfirmReload),
            KeyAction::Reload => self.reload(),
            KeyAction::Quit => self.modal = Some(Modal::ConfirmExit),
        }
    }

    /// Returns `true` once the user has confirmed exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(modal) = self.modal.as_mut() {
            let yes = matches!(
                key.code,
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter
            );
            let no = matches!(
                key.code,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc
            );
            match modal {
                Modal::ConfirmExit if yes => {
                    self.modal = None;
                    self.close();
                    return true;
                }
                Modal::ConfirmReload if yes => {
                    self.modal = None;
                    self.reload();
                }
                Modal::ConfirmExit | Modal::ConfirmReload => {
                    if no {
                        self.modal = None;
                    }
                }
                Modal::Form(form) => match form.handle_key(&key) {
                    FormOutcome::Pending => {}
                    FormOutcome::Cancel => self.modal = None,
                    FormOutcome::Submit(req) => {
                        self.modal = None;
                        self.submit_form(req);
                    }
                },
            }
            return false;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if self.focus == Focus::Notes {
            match key.code {
                KeyCode::Esc => self.focus = Focus::Tree,
                KeyCode::Char('s') if ctrl => self.save_notes(),
                _ => {
                    self.notes.input(key);
                }
            }
            return false;
        }

        match key.code {
            KeyCode::Char('c') if ctrl => self.modal = Some(Modal::ConfirmExit),
            KeyCode::Esc => self.modal = Some(Modal::ConfirmExit),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::PageUp => self.move_selection(-10),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(self.rows.len().saturating_sub(1)),
            KeyCode::Tab | KeyCode::BackTab => self.switch_tab(self.tab.other()),
            KeyCode::Right => self.apply_action(KeyAction::RatingUp),
            KeyCode::Left => self.apply_action(KeyAction::RatingDown),
            KeyCode::Enter => self.apply_action(KeyAction::EditNotes),
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                let n = ch.to_digit(10).unwrap_or(0);
                self.apply_rating(if n == 0 { MAX_RATING } else { n as f64 });
            }
            KeyCode::Char(ch) => {
                if let Some(action) = self.keymap.get(&ch).copied() {
                    self.apply_action(action);
                }
            }
            _ => {}
        }
        false
    }
}
