//! Page controllers and the router that dispatches events to them.
//!
//! Each page declares its layout as a [`Document`], then reacts to
//! [`PageEvent`]s. The router owns the current document, runs one handler at a
//! time to completion and follows navigation requests afterwards.

mod category;
mod create_user;
mod enter_score;
mod home;
mod judge;
mod judging_group;
mod scoreboard;
mod table_columns;
mod teams;

use anyhow::{Context as _, Result};

use crate::config::AppConfig;
use crate::data::Choice;
use crate::host::{ControlId, Document, Host, Modal};
use crate::state::Context;

pub const HOME: &str = "index";
pub const CHOOSE_JUDGING_GROUP: &str = "choose-judging-group";
pub const CHOOSE_CATEGORY: &str = "choose-category";
pub const CHOOSE_JUDGE: &str = "choose-judge";
pub const TEAMS_LIST: &str = "teams-list";
pub const ENTER_SCORE: &str = "enter-score";
pub const CREATE_USER: &str = "create-user";
pub const TABLE_COLUMNS: &str = "table-columns";
pub const SCOREBOARD: &str = "scoreboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The page's document was just built
    Ready,
    /// A rendered option control was activated
    Activate(ControlId),
    /// A static button was pressed
    Click(String),
    /// A dropdown's selection changed
    Changed(String),
    ConfirmAccepted,
    ConfirmDismissed,
}

pub trait PageController {
    fn id(&self) -> &'static str;

    fn title(&self) -> &'static str;

    /// Fresh document for this page; called on every visit
    fn layout(&self) -> Document;

    fn handle(&mut self, event: &PageEvent, host: &mut dyn Host) -> Result<()>;
}

/// All pages, wired to the shared context
pub fn build_pages(config: &AppConfig, context: &Context) -> Vec<Box<dyn PageController>> {
    let mut pages: Vec<Box<dyn PageController>> = vec![
        Box::new(judging_group::ChooseJudgingGroup::new(context.clone(), config.judging_group.clone())),
        Box::new(category::ChooseCategory::new(context.clone(), config.category.clone())),
        Box::new(judge::ChooseJudge::new(context.clone())),
        Box::new(teams::TeamsList::new(context.clone())),
        Box::new(enter_score::EnterScore::new(context.clone())),
        Box::new(create_user::CreateUser::new(context.clone())),
        Box::new(table_columns::TableColumns::new(context.clone())),
        Box::new(scoreboard::Scoreboard::new(context.clone())),
    ];
    let menu = pages
        .iter()
        .map(|p| Choice::new(p.id(), p.title()))
        .collect();
    pages.insert(0, Box::new(home::Home::new(menu)));
    pages
}

pub struct Router {
    pages: Vec<Box<dyn PageController>>,
    current: usize,
    document: Document,
    viewport_width: f64,
}

impl Router {
    pub fn new(pages: Vec<Box<dyn PageController>>, start: &str, viewport_width: f64) -> Result<Self> {
        let mut router = Self {
            pages,
            current: 0,
            document: Document::new(""),
            viewport_width,
        };
        router.open(start)?;
        Ok(router)
    }

    pub fn current_page(&self) -> &'static str {
        self.pages[self.current].id()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct access for typed input and dropdown cycling
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// New width for pages opened from now on and for the current document
    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
        self.document.set_viewport_width(width);
    }

    /// Build the page's document, fire `Ready` and follow any navigation
    pub fn open(&mut self, id: &str) -> Result<()> {
        self.switch(id)?;
        self.follow_navigation()
    }

    pub fn dispatch(&mut self, event: PageEvent) -> Result<()> {
        let page = &mut self.pages[self.current];
        page.handle(&event, &mut self.document)
            .with_context(|| format!("{} failed on {:?}", page.id(), event))?;
        self.follow_navigation()
    }

    /// Acknowledge the front modal. Confirms are answered with `accepted`.
    pub fn answer_modal(&mut self, accepted: bool) -> Result<()> {
        match self.document.dismiss_modal() {
            Some(Modal::Confirm(_)) if accepted => self.dispatch(PageEvent::ConfirmAccepted),
            Some(Modal::Confirm(_)) => self.dispatch(PageEvent::ConfirmDismissed),
            Some(Modal::Alert(_)) | None => self.follow_navigation(),
        }
    }

    fn switch(&mut self, id: &str) -> Result<()> {
        let index = self
            .pages
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| anyhow::anyhow!("No page named '{}'", id))?;

        tracing::info!(from = self.current_page(), to = id, "Opening page");
        self.current = index;
        let page = &mut self.pages[index];
        self.document = page.layout().with_viewport_width(self.viewport_width);
        page.handle(&PageEvent::Ready, &mut self.document)
            .with_context(|| format!("{} failed to load", id))
    }

    fn follow_navigation(&mut self) -> Result<()> {
        while let Some(target) = self.document.take_navigation() {
            self.switch(&target)?;
        }
        Ok(())
    }
}
