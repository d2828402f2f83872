use anyhow::Result;

use super::{PageController, PageEvent, CHOOSE_JUDGING_GROUP};
use crate::controls::{OptionList, SelectionBehavior, SelectionHandler};
use crate::host::{Document, Host};
use crate::state::{Context, Slot};

pub struct ChooseJudgingGroup {
    context: Context,
    groups: OptionList,
}

impl ChooseJudgingGroup {
    pub fn new(context: Context, behavior: SelectionBehavior) -> Self {
        let handler = SelectionHandler::new(Slot::JudgingGroup, behavior, context.clone());
        let groups = OptionList::new("judging-groups", move |choice, host| {
            handler.select(&choice.id, &choice.label, host)?;
            Ok(())
        });
        Self { context, groups }
    }
}

impl PageController for ChooseJudgingGroup {
    fn id(&self) -> &'static str {
        CHOOSE_JUDGING_GROUP
    }

    fn title(&self) -> &'static str {
        "Choose Judging Group"
    }

    fn layout(&self) -> Document {
        Document::new(self.title())
            .text("current", "Current")
            .container("judging-groups", "Judging groups")
    }

    fn handle(&mut self, event: &PageEvent, host: &mut dyn Host) -> Result<()> {
        match event {
            PageEvent::Ready => {
                let current = self.context.get(Slot::JudgingGroup).unwrap_or_default();
                host.set_text("current", &current)?;
                let choices = self.context.data().judging_group_choices();
                self.groups.refresh(host, &choices)?;
            }
            PageEvent::Activate(control) => {
                self.groups.activate(*control, host)?;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::fixtures;

    #[test]
    fn test_selection_without_target_stays() {
        let ctx = fixtures::context();
        let mut page = ChooseJudgingGroup::new(ctx.clone(), SelectionBehavior::default());
        let mut doc = page.layout();
        page.handle(&PageEvent::Ready, &mut doc).unwrap();

        let group_b = doc.controls("judging-groups")[1].id;
        page.handle(&PageEvent::Activate(group_b), &mut doc).unwrap();

        assert_eq!(ctx.get(Slot::JudgingGroup).as_deref(), Some("Group B"));
        assert_eq!(doc.take_navigation(), None);
    }

    #[test]
    fn test_revisiting_does_not_duplicate() {
        let ctx = fixtures::context();
        let mut page = ChooseJudgingGroup::new(ctx, SelectionBehavior::default());
        let mut doc = page.layout();
        page.handle(&PageEvent::Ready, &mut doc).unwrap();
        page.handle(&PageEvent::Ready, &mut doc).unwrap();

        assert_eq!(doc.controls("judging-groups").len(), 2);
    }
}
