use anyhow::Result;

use super::{PageController, PageEvent, CHOOSE_JUDGE, TEAMS_LIST};
use crate::controls::{require_filled, set_visible};
use crate::data::{Choice, Judge};
use crate::host::{Document, Host};
use crate::state::{Context, Slot};

const NEW_JUDGE: &str = "new-judge";

pub struct ChooseJudge {
    context: Context,
}

impl ChooseJudge {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    /// Judges known for the current category and judging group
    fn possible_judges(&self) -> Vec<Judge> {
        let category = self.context.get(Slot::Category).unwrap_or_default();
        let group = self.context.get(Slot::JudgingGroup).unwrap_or_default();
        self.context
            .judges()
            .into_iter()
            .filter(|j| j.category.is_empty() || j.category == category)
            .filter(|j| j.group.is_empty() || j.group == group)
            .collect()
    }

    fn toggle_new_judge_info(&self, host: &mut dyn Host) -> Result<()> {
        let is_new = host.value("judge")? == NEW_JUDGE;
        set_visible(host, "new-judge-info", is_new)?;
        Ok(())
    }

    fn submit(&self, host: &mut dyn Host) -> Result<()> {
        let mut judge_id = host.value("judge")?;
        if judge_id == NEW_JUDGE {
            let Some(name) = require_filled(host, "new-judge-name", "You must enter a name")? else {
                return Ok(());
            };
            let Some(phone) = require_filled(host, "new-judge-phone", "You must enter a phone number")? else {
                return Ok(());
            };
            judge_id = name.to_uppercase();

            tracing::info!("Adding judge {}", judge_id);
            self.context.add_judge(Judge {
                id: judge_id.clone(),
                category: self.context.get(Slot::Category).unwrap_or_default(),
                group: self.context.get(Slot::JudgingGroup).unwrap_or_default(),
                phone: Some(phone),
            });
        }

        self.context.set(Slot::Judge, &judge_id)?;
        host.navigate(TEAMS_LIST);
        Ok(())
    }
}

impl PageController for ChooseJudge {
    fn id(&self) -> &'static str {
        CHOOSE_JUDGE
    }

    fn title(&self) -> &'static str {
        "Choose Judge"
    }

    fn layout(&self) -> Document {
        Document::new(self.title())
            .text("judging-group", "Judging group")
            .text("category", "Category")
            .select("judge", "Judge")
            .region("new-judge-info", "New judge")
            .field("new-judge-name", "Name")
            .field("new-judge-phone", "Phone")
            .end_region()
            .button("judge-submit", "Submit")
    }

    fn handle(&mut self, event: &PageEvent, host: &mut dyn Host) -> Result<()> {
        match event {
            PageEvent::Ready => {
                let group = self.context.get(Slot::JudgingGroup).unwrap_or_default();
                host.set_text("judging-group", &group)?;
                let category = self
                    .context
                    .current_category()
                    .map(|c| c.title)
                    .unwrap_or_default();
                host.set_text("category", &category)?;

                let mut options = vec![Choice::new(NEW_JUDGE, "New Judge")];
                options.extend(self.possible_judges().iter().map(|j| Choice::new(&j.id, &j.id)));
                host.set_options("judge", &options)?;

                let current = self.context.get(Slot::Judge);
                let preselect = current
                    .filter(|id| options.iter().any(|o| &o.id == id))
                    .unwrap_or_else(|| NEW_JUDGE.to_string());
                host.set_value("judge", &preselect)?;
                self.toggle_new_judge_info(host)?;
            }
            PageEvent::Changed(id) if id == "judge" => self.toggle_new_judge_info(host)?,
            PageEvent::Click(id) if id == "judge-submit" => self.submit(host)?,
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Modal;
    use crate::pages::fixtures;

    fn open(ctx: &Context) -> (ChooseJudge, Document) {
        let mut page = ChooseJudge::new(ctx.clone());
        let mut doc = page.layout();
        page.handle(&PageEvent::Ready, &mut doc).unwrap();
        (page, doc)
    }

    fn selected_context() -> Context {
        let ctx = fixtures::context();
        ctx.set(Slot::JudgingGroup, "Group A").unwrap();
        ctx.set(Slot::Category, "teamwork").unwrap();
        ctx
    }

    #[test]
    fn test_new_judge_region_follows_dropdown() {
        let ctx = selected_context();
        let (mut page, mut doc) = open(&ctx);

        assert_eq!(doc.value("judge").unwrap(), NEW_JUDGE);
        assert!(doc.is_visible("new-judge-name"));

        doc.set_value("judge", "ALICE").unwrap();
        page.handle(&PageEvent::Changed("judge".into()), &mut doc).unwrap();
        assert!(!doc.is_visible("new-judge-name"));
    }

    #[test]
    fn test_existing_judge_is_preselected() {
        let ctx = selected_context();
        ctx.set(Slot::Judge, "ALICE").unwrap();
        let (_, doc) = open(&ctx);

        assert_eq!(doc.value("judge").unwrap(), "ALICE");
        assert!(!doc.is_visible("new-judge-info"));
        assert_eq!(doc.text_of("category"), Some("Teamwork"));
    }

    #[test]
    fn test_judges_from_other_groups_are_not_offered() {
        let ctx = fixtures::context();
        ctx.set(Slot::JudgingGroup, "Group B").unwrap();
        ctx.set(Slot::Category, "teamwork").unwrap();
        let (_, mut doc) = open(&ctx);

        doc.set_value("judge", "ALICE").unwrap();
        assert_eq!(doc.value("judge").unwrap(), "");
    }

    #[test]
    fn test_new_judge_needs_name_and_phone() {
        let ctx = selected_context();
        let (mut page, mut doc) = open(&ctx);

        page.handle(&PageEvent::Click("judge-submit".into()), &mut doc).unwrap();
        assert_eq!(doc.dismiss_modal(), Some(Modal::Alert("You must enter a name".into())));

        doc.set_value("new-judge-name", "bob").unwrap();
        page.handle(&PageEvent::Click("judge-submit".into()), &mut doc).unwrap();
        assert_eq!(doc.dismiss_modal(), Some(Modal::Alert("You must enter a phone number".into())));
        assert_eq!(doc.take_navigation(), None);
        assert_eq!(ctx.get(Slot::Judge), None);

        doc.set_value("new-judge-phone", "555-0100").unwrap();
        page.handle(&PageEvent::Click("judge-submit".into()), &mut doc).unwrap();
        assert_eq!(ctx.get(Slot::Judge).as_deref(), Some("BOB"));
        assert!(ctx.judges().iter().any(|j| j.id == "BOB"));
        assert_eq!(doc.take_navigation().as_deref(), Some(TEAMS_LIST));
    }
}
