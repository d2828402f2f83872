use anyhow::Result;

use super::{PageController, PageEvent, ENTER_SCORE, TEAMS_LIST};
use crate::controls::ConfirmFlow;
use crate::data::{Category, Choice, Team};
use crate::host::{Document, Host};
use crate::state::{Context, ScoreRecord, Slot};

const SAVE_QUESTION: &str = "Submit this score?";

/// Goal dropdowns get their own prefix so goal names cannot clash with page ids
fn goal_field(goal: &str) -> String {
    format!("goal-{}", goal)
}

pub struct EnterScore {
    context: Context,
    save: ConfirmFlow,
}

impl EnterScore {
    pub fn new(context: Context) -> Self {
        Self { context, save: ConfirmFlow::new(SAVE_QUESTION) }
    }

    fn current(&self) -> Option<(Team, Category)> {
        Some((self.context.current_team()?, self.context.current_category()?))
    }

    fn goal_values(host: &dyn Host, category: &Category) -> Result<Vec<(String, i64)>> {
        let mut values = Vec::with_capacity(category.goals.len());
        for goal in &category.goals {
            let value = host.value(&goal_field(&goal.name))?.parse().unwrap_or(goal.min);
            values.push((goal.name.clone(), value));
        }
        Ok(values)
    }

    fn recompute_total(&self, host: &mut dyn Host) -> Result<()> {
        let Some((team, category)) = self.current() else {
            return Ok(());
        };
        let record = ScoreRecord {
            team: team.number,
            category: category.name.clone(),
            sub_scores: Self::goal_values(host, &category)?,
            ..Default::default()
        };
        let total = record.total(&category).unwrap_or_default();
        host.set_text("total-score", &total.to_string())?;
        Ok(())
    }

    /// Existing score for the team or a blank one, with the flags reset
    fn record(&self, team: &Team, category: &Category) -> ScoreRecord {
        let mut record = self
            .context
            .score(team.number, &category.name)
            .unwrap_or_else(|| ScoreRecord {
                team: team.number,
                category: category.name.clone(),
                ..Default::default()
            });
        record.judge = self.context.get(Slot::Judge).unwrap_or_default();
        record.no_show = false;
        record.deleted = false;
        record
    }

    fn store(&self, host: &mut dyn Host, update: impl FnOnce(&mut ScoreRecord)) -> Result<()> {
        let Some((team, category)) = self.current() else {
            return Ok(());
        };
        let mut record = self.record(&team, &category);
        update(&mut record);
        tracing::info!(
            team = record.team,
            category = %record.category,
            no_show = record.no_show,
            deleted = record.deleted,
            "Saving score"
        );
        self.context.save_score(record);
        host.navigate(TEAMS_LIST);
        Ok(())
    }
}

impl PageController for EnterScore {
    fn id(&self) -> &'static str {
        ENTER_SCORE
    }

    fn title(&self) -> &'static str {
        "Enter Score"
    }

    fn layout(&self) -> Document {
        let mut doc = Document::new(self.title())
            .text("team-number", "Team")
            .text("team-name", "Name")
            .text("category", "Category");
        if let Some(category) = self.context.current_category() {
            for goal in &category.goals {
                let label = if goal.category.is_empty() {
                    goal.title.clone()
                } else {
                    format!("{} / {}", goal.category, goal.title)
                };
                doc = doc.select(&goal_field(&goal.name), &label);
            }
        }
        doc.text("total-score", "Total")
            .button("save-score", "Save")
            .button("cancel-score", "Cancel")
            .button("delete-score", "Delete")
            .button("noshow-score", "No Show")
            .button("add-note", "Add Note")
    }

    fn handle(&mut self, event: &PageEvent, host: &mut dyn Host) -> Result<()> {
        match event {
            PageEvent::Ready => {
                self.save = ConfirmFlow::new(SAVE_QUESTION);
                let Some((team, category)) = self.current() else {
                    host.alert("Choose a team before entering a score");
                    host.navigate(TEAMS_LIST);
                    return Ok(());
                };

                host.set_text("team-number", &team.number.to_string())?;
                host.set_text("team-name", &team.name)?;
                host.set_text("category", &category.title)?;

                let existing = self
                    .context
                    .score(team.number, &category.name)
                    .filter(|s| !s.no_show && !s.deleted);
                for goal in &category.goals {
                    let values: Vec<Choice> = (goal.min..=goal.max)
                        .map(|v| Choice::new(v.to_string(), v.to_string()))
                        .collect();
                    host.set_options(&goal_field(&goal.name), &values)?;
                    if let Some(value) = existing.as_ref().and_then(|s| s.sub_score(&goal.name)) {
                        host.set_value(&goal_field(&goal.name), &value.to_string())?;
                    }
                }
                self.recompute_total(host)?;
            }
            PageEvent::Changed(_) => self.recompute_total(host)?,
            PageEvent::Click(id) => match id.as_str() {
                "save-score" => {
                    self.save.request(host);
                    tracing::debug!(state = ?self.save.state(), "Save requested");
                }
                "cancel-score" => host.navigate(TEAMS_LIST),
                "delete-score" => self.store(host, |r| r.deleted = true)?,
                "noshow-score" => self.store(host, |r| r.no_show = true)?,
                "add-note" => host.alert("Adding notes not yet supported"),
                _ => {}
            },
            PageEvent::ConfirmAccepted => {
                if self.save.accept() {
                    let Some((_, category)) = self.current() else {
                        return Ok(());
                    };
                    let values = Self::goal_values(host, &category)?;
                    self.store(host, |r| r.sub_scores = values)?;
                }
            }
            PageEvent::ConfirmDismissed => {
                self.save.cancel();
            }
            PageEvent::Activate(_) => {}
        }
        Ok(())
    }
}
