use serde::{Deserialize, Serialize};

use crate::host::Host;
use crate::state::{Context, SelectionError, Slot};

/// What happens after a selection is stored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionBehavior {
    /// Show an acknowledgment before leaving the page
    #[serde(default)]
    pub confirm_before_navigate: bool,

    /// Page to open afterwards; stay put when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_target: Option<String>,
}

impl SelectionBehavior {
    pub fn navigate_to(target: &str) -> Self {
        Self {
            confirm_before_navigate: false,
            navigate_target: Some(target.to_string()),
        }
    }
}

/// Writes a chosen value into one slot of the shared state
#[derive(Debug, Clone)]
pub struct SelectionHandler {
    slot: Slot,
    behavior: SelectionBehavior,
    context: Context,
}

impl SelectionHandler {
    pub fn new(slot: Slot, behavior: SelectionBehavior, context: Context) -> Self {
        Self { slot, behavior, context }
    }

    /// Nothing is shown and no page is opened when the value is rejected
    pub fn select(&self, value: &str, label: &str, host: &mut dyn Host) -> Result<(), SelectionError> {
        self.context.set(self.slot, value)?;
        tracing::info!(slot = ?self.slot, "Selected {}", label);

        if self.behavior.confirm_before_navigate {
            host.alert(&format!("Selected {}", label));
        }
        if let Some(target) = &self.behavior.navigate_target {
            host.navigate(target);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ScoringData;
    use crate::host::{Document, Modal};
    use crate::state::SessionState;

    fn context() -> Context {
        Context::new(ScoringData::default(), SessionState::default())
    }

    #[test]
    fn test_select_stores_and_navigates() {
        let ctx = context();
        let handler = SelectionHandler::new(
            Slot::Category,
            SelectionBehavior::navigate_to("choose-judge"),
            ctx.clone(),
        );
        let mut doc = Document::new("Categories");

        handler.select("teamwork", "Teamwork", &mut doc).unwrap();

        assert_eq!(ctx.get(Slot::Category).as_deref(), Some("teamwork"));
        assert_eq!(doc.take_navigation().as_deref(), Some("choose-judge"));
    }

    #[test]
    fn test_confirm_holds_navigation_until_acknowledged() {
        let ctx = context();
        let behavior = SelectionBehavior {
            confirm_before_navigate: true,
            navigate_target: Some("choose-category".to_string()),
        };
        let handler = SelectionHandler::new(Slot::JudgingGroup, behavior, ctx.clone());
        let mut doc = Document::new("Groups");

        handler.select("Group A", "Group A", &mut doc).unwrap();

        assert_eq!(doc.modal(), Some(&Modal::Alert("Selected Group A".to_string())));
        assert_eq!(doc.take_navigation(), None);
        doc.dismiss_modal();
        assert_eq!(doc.take_navigation().as_deref(), Some("choose-category"));
    }

    #[test]
    fn test_no_target_stays_on_page() {
        let ctx = context();
        let handler = SelectionHandler::new(Slot::JudgingGroup, SelectionBehavior::default(), ctx.clone());
        let mut doc = Document::new("Groups");

        handler.select("Group A", "Group A", &mut doc).unwrap();
        handler.select("Group B", "Group B", &mut doc).unwrap();

        assert_eq!(ctx.get(Slot::JudgingGroup).as_deref(), Some("Group B"));
        assert_eq!(doc.take_navigation(), None);
        assert_eq!(doc.modal(), None);
    }

    #[test]
    fn test_rejected_team_does_not_navigate() {
        let ctx = context();
        let handler = SelectionHandler::new(Slot::Team, SelectionBehavior::navigate_to("enter-score"), ctx.clone());
        let mut doc = Document::new("Teams");

        handler.select("101", "101 Brick Layers", &mut doc).unwrap();
        doc.take_navigation();

        assert!(handler.select("Brick Layers", "Brick Layers", &mut doc).is_err());
        assert_eq!(ctx.get(Slot::Team).as_deref(), Some("101"));
        assert_eq!(doc.take_navigation(), None);
    }
}
