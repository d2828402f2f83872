use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::data::ScoringData;
use crate::host::{ElementKind, Focusable, Modal};
use crate::pages::{self, PageEvent, Router};
use crate::state::{Context, SessionState};

/// How long a status message stays in the info line
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

pub struct App {
    pub config: AppConfig,
    pub context: Context,
    pub router: Router,

    /// Index into the current document's focusables
    pub focus: usize,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig, data: ScoringData, start_page: &str, columns: u16) -> Result<Self> {
        let session = if config.persist_selection {
            SessionState::load_default().unwrap_or_else(|e| {
                tracing::warn!("Could not restore session: {}", e);
                SessionState::default()
            })
        } else {
            SessionState::default()
        };

        let context = Context::new(data, session);
        let pages = pages::build_pages(&config, &context);
        let router = Router::new(pages, start_page, config.viewport_width(columns))?;

        Ok(Self {
            config,
            context,
            router,
            focus: 0,
            status_message: None,
            status_message_time: None,
        })
    }

    /// Set a status message (auto-clears after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn resize(&mut self, columns: u16) {
        let width = self.config.viewport_width(columns);
        self.router.set_viewport_width(width);
    }

    pub fn focused(&self) -> Option<Focusable> {
        self.router.document().focusables().get(self.focus).cloned()
    }

    fn focused_kind(&self) -> Option<&ElementKind> {
        match self.focused()? {
            Focusable::Element(id) => self.router.document().find(&id).map(|e| &e.kind),
            Focusable::Control(_) => None,
        }
    }

    /// `q` quits unless it is meant as typed text or a modal is open
    pub fn can_quit(&self) -> bool {
        self.router.document().modal().is_none()
            && !matches!(self.focused_kind(), Some(ElementKind::Field { .. }))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let page = self.router.current_page();
        let result = if self.router.document().modal().is_some() {
            self.handle_modal_key(key)
        } else {
            self.handle_page_key(key)
        };

        if self.router.current_page() != page {
            self.focus = 0;
        }
        let count = self.router.document().focusables().len();
        if self.focus >= count {
            self.focus = count.saturating_sub(1);
        }
        result
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Result<()> {
        let is_confirm = matches!(self.router.document().modal(), Some(Modal::Confirm(_)));
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter if is_confirm => self.router.answer_modal(true),
            KeyCode::Char('n') | KeyCode::Esc if is_confirm => self.router.answer_modal(false),
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') if !is_confirm => {
                self.router.answer_modal(true)
            }
            _ => Ok(()),
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) -> Result<()> {
        let count = self.router.document().focusables().len();
        match key.code {
            KeyCode::Down | KeyCode::Tab => {
                if count > 0 {
                    self.focus = (self.focus + 1) % count;
                }
            }
            KeyCode::Up | KeyCode::BackTab => {
                if count > 0 {
                    self.focus = (self.focus + count - 1) % count;
                }
            }
            KeyCode::Esc => {
                if self.router.current_page() != pages::HOME {
                    self.router.open(pages::HOME)?;
                }
            }
            KeyCode::Enter => self.activate()?,
            KeyCode::Left => self.cycle(-1)?,
            KeyCode::Right => self.cycle(1)?,
            KeyCode::Backspace => self.edit(|value| {
                value.pop();
            })?,
            KeyCode::Char(c) => self.edit(|value| value.push(c))?,
            _ => {}
        }
        Ok(())
    }

    fn activate(&mut self) -> Result<()> {
        match self.focused() {
            Some(Focusable::Control(control)) => self.router.dispatch(PageEvent::Activate(control)),
            Some(Focusable::Element(id)) => {
                let is_button = matches!(self.focused_kind(), Some(ElementKind::Button));
                let is_select = matches!(self.focused_kind(), Some(ElementKind::Select { .. }));
                if is_button {
                    self.router.dispatch(PageEvent::Click(id))
                } else if is_select {
                    self.cycle(1)
                } else {
                    // Enter in a field moves on to the next input
                    let count = self.router.document().focusables().len();
                    self.focus = (self.focus + 1) % count.max(1);
                    Ok(())
                }
            }
            None => Ok(()),
        }
    }

    fn cycle(&mut self, step: isize) -> Result<()> {
        if let Some(Focusable::Element(id)) = self.focused() {
            if matches!(self.focused_kind(), Some(ElementKind::Select { .. })) {
                self.router.document_mut().cycle_select(&id, step)?;
                self.router.dispatch(PageEvent::Changed(id))?;
            }
        }
        Ok(())
    }

    fn edit(&mut self, edit: impl FnOnce(&mut String)) -> Result<()> {
        if let Some(Focusable::Element(id)) = self.focused() {
            if matches!(self.focused_kind(), Some(ElementKind::Field { .. })) {
                self.router.document_mut().edit_field(&id, edit)?;
            }
        }
        Ok(())
    }

    pub fn tick(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Store the shared state if the config asks for it
    pub fn save_session(&self) -> Result<()> {
        if self.config.persist_selection {
            self.context.snapshot().save_default()?;
            tracing::info!("Session saved");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::fixtures;
    use crate::state::Slot;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(start: &str) -> App {
        App::new(AppConfig::default(), fixtures::data(), start, 100).unwrap()
    }

    #[test]
    fn test_keyboard_selection_flow() {
        let mut app = app(pages::CHOOSE_JUDGING_GROUP);

        app.handle_key(key(KeyCode::Down)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.context.get(Slot::JudgingGroup).as_deref(), Some("Group B"));
        assert_eq!(app.router.current_page(), pages::CHOOSE_CATEGORY);
        assert_eq!(app.focus, 0);
    }

    #[test]
    fn test_typing_goes_into_fields() {
        let mut app = app(pages::CREATE_USER);
        assert!(!app.can_quit());

        for c in "bob".chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_key(key(KeyCode::Backspace)).unwrap();

        assert_eq!(app.router.document().find("user").map(|e| e.kind.clone()),
            Some(ElementKind::Field { value: "bo".to_string(), secret: false }));
    }

    #[test]
    fn test_modal_captures_keys() {
        let mut app = app(pages::CREATE_USER);
        app.handle_key(key(KeyCode::Char('x'))).unwrap();
        // Jump to the submit button and press it with empty passwords that match
        app.handle_key(key(KeyCode::BackTab)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.router.current_page(), pages::HOME);

        let mut app = self::app(pages::CREATE_USER);
        app.handle_key(key(KeyCode::BackTab)).unwrap();
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(app.router.document().modal().is_some());
        assert!(!app.can_quit());

        app.handle_key(key(KeyCode::Down)).unwrap();
        assert!(app.router.document().modal().is_some());
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(app.router.document().modal().is_none());
    }

    #[test]
    fn test_viewport_follows_terminal_width() {
        let mut app = app(pages::SCOREBOARD);
        assert_eq!(app.router.document().root_font_scale(), 1.0);

        app.resize(256);
        app.router.open(pages::SCOREBOARD).unwrap();
        assert_eq!(app.router.document().root_font_scale(), 2.0);
    }

    #[test]
    fn test_status_message_expires() {
        let mut app = app(pages::HOME);
        app.set_status("Error: boom");
        app.status_message_time = Some(Instant::now() - STATUS_TIMEOUT);
        app.tick();
        assert_eq!(app.status_message, None);
    }
}
