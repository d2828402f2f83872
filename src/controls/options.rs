use crate::data::Choice;
use crate::host::{ControlId, Host, HostError};

type ActivateFn = Box<dyn FnMut(&Choice, &mut dyn Host) -> anyhow::Result<()>>;

/// Renders choices as controls in one container and remembers which control
/// stands for which choice.
///
/// Rendering appends. Call [`OptionList::refresh`] (or clear the container)
/// before rendering again, otherwise every choice shows up twice.
pub struct OptionList {
    container: String,
    bindings: Vec<(ControlId, Choice)>,
    on_activate: ActivateFn,
}

impl OptionList {
    pub fn new(
        container: impl Into<String>,
        on_activate: impl FnMut(&Choice, &mut dyn Host) -> anyhow::Result<()> + 'static,
    ) -> Self {
        Self {
            container: container.into(),
            bindings: Vec::new(),
            on_activate: Box::new(on_activate),
        }
    }

    /// One control per choice, in input order
    pub fn render(&mut self, host: &mut dyn Host, choices: &[Choice]) -> Result<(), HostError> {
        for choice in choices {
            let id = host.append_control(&self.container, &choice.label)?;
            self.bindings.push((id, choice.clone()));
        }
        tracing::debug!(container = %self.container, count = choices.len(), "Rendered options");
        Ok(())
    }

    /// Clear the container and render from scratch
    pub fn refresh(&mut self, host: &mut dyn Host, choices: &[Choice]) -> Result<(), HostError> {
        host.clear(&self.container)?;
        self.bindings.clear();
        self.render(host, choices)
    }

    pub fn choice(&self, control: ControlId) -> Option<&Choice> {
        self.bindings.iter().find(|(id, _)| *id == control).map(|(_, c)| c)
    }

    /// Run the activation callback if `control` belongs to this list
    pub fn activate(&mut self, control: ControlId, host: &mut dyn Host) -> anyhow::Result<bool> {
        let Some(choice) = self.choice(control).cloned() else {
            return Ok(false);
        };
        (self.on_activate)(&choice, host)?;
        Ok(true)
    }
}
