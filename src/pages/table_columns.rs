use anyhow::Result;

use super::{PageController, PageEvent, TABLE_COLUMNS};
use crate::controls::apply_column_mapping;
use crate::data::Choice;
use crate::host::{Document, Host};
use crate::state::Context;

/// Admin page matching spreadsheet headers to team fields
pub struct TableColumns {
    context: Context,
}

impl TableColumns {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    fn apply_defaults(&self, host: &mut dyn Host) {
        let applied = apply_column_mapping(host, &self.context.data().column_mappings);
        tracing::debug!(applied, "Applied default column mapping");
    }
}

impl PageController for TableColumns {
    fn id(&self) -> &'static str {
        TABLE_COLUMNS
    }

    fn title(&self) -> &'static str {
        "Team Columns"
    }

    fn layout(&self) -> Document {
        self.context
            .data()
            .column_mappings
            .iter()
            .fold(Document::new(self.title()), |doc, m| doc.select(&m.select, &m.select))
            .button("reset", "Reset to defaults")
    }

    fn handle(&mut self, event: &PageEvent, host: &mut dyn Host) -> Result<()> {
        match event {
            PageEvent::Ready => {
                let headers: Vec<Choice> = self
                    .context
                    .data()
                    .upload_columns
                    .iter()
                    .map(|h| Choice::new(h, h))
                    .collect();
                for mapping in &self.context.data().column_mappings {
                    host.set_options(&mapping.select, &headers)?;
                }
                self.apply_defaults(host);
            }
            PageEvent::Click(id) if id == "reset" => self.apply_defaults(host),
            _ => {}
        }
        Ok(())
    }
}
