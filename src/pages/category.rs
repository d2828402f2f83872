use anyhow::Result;

use super::{PageController, PageEvent, CHOOSE_CATEGORY};
use crate::controls::{OptionList, SelectionBehavior, SelectionHandler};
use crate::data::Choice;
use crate::host::{Document, Host};
use crate::state::{Context, Slot};

pub struct ChooseCategory {
    context: Context,
    categories: OptionList,
}

impl ChooseCategory {
    pub fn new(context: Context, behavior: SelectionBehavior) -> Self {
        let handler = SelectionHandler::new(Slot::Category, behavior, context.clone());
        let categories = OptionList::new("categories", move |choice, host| {
            handler.select(&choice.id, &choice.label, host)?;
            Ok(())
        });
        Self { context, categories }
    }
}

impl PageController for ChooseCategory {
    fn id(&self) -> &'static str {
        CHOOSE_CATEGORY
    }

    fn title(&self) -> &'static str {
        "Choose Category"
    }

    fn layout(&self) -> Document {
        Document::new(self.title())
            .text("judging-group", "Judging group")
            .container("categories", "Categories")
    }

    fn handle(&mut self, event: &PageEvent, host: &mut dyn Host) -> Result<()> {
        match event {
            PageEvent::Ready => {
                tracing::debug!("Refreshing choose-category page");
                let group = self.context.get(Slot::JudgingGroup).unwrap_or_default();
                host.set_text("judging-group", &group)?;

                let choices: Vec<Choice> =
                    self.context.data().categories.iter().map(|c| c.choice()).collect();
                self.categories.refresh(host, &choices)?;
            }
            PageEvent::Activate(control) => {
                self.categories.activate(*control, host)?;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{fixtures, CHOOSE_JUDGE};

    #[test]
    fn test_category_selection_navigates() {
        let ctx = fixtures::context();
        ctx.set(Slot::JudgingGroup, "Group A").unwrap();
        let mut page = ChooseCategory::new(ctx.clone(), SelectionBehavior::navigate_to(CHOOSE_JUDGE));
        let mut doc = page.layout();
        page.handle(&PageEvent::Ready, &mut doc).unwrap();

        assert_eq!(doc.text_of("judging-group"), Some("Group A"));
        let teamwork = doc.controls("categories")[0].clone();
        assert_eq!(teamwork.label, "Teamwork");

        page.handle(&PageEvent::Activate(teamwork.id), &mut doc).unwrap();
        assert_eq!(ctx.get(Slot::Category).as_deref(), Some("teamwork"));
        assert_eq!(doc.take_navigation().as_deref(), Some(CHOOSE_JUDGE));
    }
}
