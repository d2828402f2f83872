use anyhow::Result;

use super::{PageController, PageEvent, ENTER_SCORE, TEAMS_LIST};
use crate::controls::{OptionList, SelectionBehavior, SelectionHandler};
use crate::data::{Choice, Team};
use crate::host::{Document, Host};
use crate::state::{Context, Slot};

pub struct TeamsList {
    context: Context,
    teams: OptionList,
}

impl TeamsList {
    pub fn new(context: Context) -> Self {
        let handler = SelectionHandler::new(
            Slot::Team,
            SelectionBehavior::navigate_to(ENTER_SCORE),
            context.clone(),
        );
        let teams = OptionList::new("teams", move |choice, host| {
            handler.select(&choice.id, &choice.label, host)?;
            Ok(())
        });
        Self { context, teams }
    }

    /// "101 Brick Layers North School 12", blank score when not entered yet
    fn label(&self, team: &Team, category: &str) -> String {
        let score = self
            .context
            .score(team.number, category)
            .and_then(|record| {
                if record.deleted {
                    return None;
                }
                if record.no_show {
                    return Some("No Show".to_string());
                }
                let category = self.context.data().category(category)?;
                record.total(category).map(|t| t.to_string())
            })
            .unwrap_or_default();

        format!("{} {} {} {}", team.number, team.name, team.organization, score)
            .trim_end()
            .to_string()
    }
}

impl PageController for TeamsList {
    fn id(&self) -> &'static str {
        TEAMS_LIST
    }

    fn title(&self) -> &'static str {
        "Teams"
    }

    fn layout(&self) -> Document {
        Document::new(self.title())
            .text("judging-group", "Judging group")
            .text("category", "Category")
            .text("judge", "Judge")
            .container("teams", "Teams")
    }

    fn handle(&mut self, event: &PageEvent, host: &mut dyn Host) -> Result<()> {
        match event {
            PageEvent::Ready => {
                let group = self.context.get(Slot::JudgingGroup).unwrap_or_default();
                let category = self.context.get(Slot::Category).unwrap_or_default();
                host.set_text("judging-group", &group)?;
                host.set_text(
                    "category",
                    &self.context.current_category().map(|c| c.title).unwrap_or_default(),
                )?;
                host.set_text("judge", &self.context.get(Slot::Judge).unwrap_or_default())?;

                let choices: Vec<Choice> = self
                    .context
                    .data()
                    .teams_in_group(&group)
                    .map(|t| Choice::new(t.number.to_string(), self.label(t, &category)))
                    .collect();
                self.teams.refresh(host, &choices)?;
            }
            PageEvent::Activate(control) => {
                self.teams.activate(*control, host)?;
            }
            _ => {}
        }
        Ok(())
    }
}
