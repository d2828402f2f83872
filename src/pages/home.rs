use anyhow::Result;

use super::{PageController, PageEvent, HOME};
use crate::controls::OptionList;
use crate::data::Choice;
use crate::host::{Document, Host};

/// Menu of every other page
pub struct Home {
    menu: Vec<Choice>,
    links: OptionList,
}

impl Home {
    pub fn new(menu: Vec<Choice>) -> Self {
        let links = OptionList::new("pages", |choice, host| {
            host.navigate(&choice.id);
            Ok(())
        });
        Self { menu, links }
    }
}

impl PageController for Home {
    fn id(&self) -> &'static str {
        HOME
    }

    fn title(&self) -> &'static str {
        "Scoring"
    }

    fn layout(&self) -> Document {
        Document::new(self.title()).container("pages", "Pages")
    }

    fn handle(&mut self, event: &PageEvent, host: &mut dyn Host) -> Result<()> {
        match event {
            PageEvent::Ready => self.links.refresh(host, &self.menu)?,
            PageEvent::Activate(control) => {
                self.links.activate(*control, host)?;
            }
            _ => {}
        }
        Ok(())
    }
}
