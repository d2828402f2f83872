use anyhow::Result;

use super::{PageController, PageEvent, SCOREBOARD};
use crate::controls::apply_font_scale;
use crate::host::{Document, Host};
use crate::state::Context;

pub struct Scoreboard {
    context: Context,
}

impl Scoreboard {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    /// One line per team: number, name, then each category's total or "-"
    fn standings(&self) -> String {
        let data = self.context.data();
        data.teams
            .iter()
            .map(|team| {
                let scores: Vec<String> = data
                    .categories
                    .iter()
                    .map(|category| {
                        let total = self
                            .context
                            .score(team.number, &category.name)
                            .and_then(|s| s.total(category));
                        match total {
                            Some(t) => format!("{}: {}", category.title, t),
                            None => format!("{}: -", category.title),
                        }
                    })
                    .collect();
                format!("{:>5} {:<24} {}", team.number, team.name, scores.join("  "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl PageController for Scoreboard {
    fn id(&self) -> &'static str {
        SCOREBOARD
    }

    fn title(&self) -> &'static str {
        "Scoreboard"
    }

    fn layout(&self) -> Document {
        Document::new(self.title())
            .text("scale", "Font scale")
            .text("standings", "Teams")
    }

    fn handle(&mut self, event: &PageEvent, host: &mut dyn Host) -> Result<()> {
        if *event == PageEvent::Ready {
            let scale = apply_font_scale(host);
            host.set_text("scale", &format!("{:.2}x", scale))?;
            host.set_text("standings", &self.standings())?;
        }
        Ok(())
    }
}
