use std::collections::VecDeque;

use super::{ControlId, Display, Host, HostError};
use crate::data::Choice;

#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub id: ControlId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text(String),
    Field { value: String, secret: bool },
    Select { options: Vec<Choice>, selected: Option<String> },
    Button,
    Container(Vec<Control>),
    /// Grouping element; hiding it hides everything declared inside it
    Region,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: String,
    pub label: String,
    pub kind: ElementKind,
    pub display: Display,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Alert(String),
    Confirm(String),
}

/// Something the focus cursor can land on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focusable {
    Element(String),
    Control(ControlId),
}

/// In-memory page: an ordered list of elements plus the modal queue
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    elements: Vec<Element>,
    region: Option<String>,
    next_control: usize,
    modals: VecDeque<Modal>,
    navigation: Option<String>,
    viewport_width: f64,
    root_font_scale: f64,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
            region: None,
            next_control: 0,
            modals: VecDeque::new(),
            navigation: None,
            viewport_width: 0.0,
            root_font_scale: 1.0,
        }
    }

    fn push(mut self, id: &str, label: &str, kind: ElementKind) -> Self {
        self.elements.push(Element {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            display: Display::Visible,
            parent: self.region.clone(),
        });
        self
    }

    pub fn text(self, id: &str, label: &str) -> Self {
        self.push(id, label, ElementKind::Text(String::new()))
    }

    pub fn field(self, id: &str, label: &str) -> Self {
        self.push(id, label, ElementKind::Field { value: String::new(), secret: false })
    }

    pub fn secret(self, id: &str, label: &str) -> Self {
        self.push(id, label, ElementKind::Field { value: String::new(), secret: true })
    }

    pub fn select(self, id: &str, label: &str) -> Self {
        self.push(id, label, ElementKind::Select { options: Vec::new(), selected: None })
    }

    pub fn button(self, id: &str, label: &str) -> Self {
        self.push(id, label, ElementKind::Button)
    }

    pub fn container(self, id: &str, label: &str) -> Self {
        self.push(id, label, ElementKind::Container(Vec::new()))
    }

    /// Open a region; following elements belong to it until [`Document::end_region`]
    pub fn region(self, id: &str, label: &str) -> Self {
        let mut doc = self.push(id, label, ElementKind::Region);
        doc.region = Some(id.to_string());
        doc
    }

    pub fn end_region(mut self) -> Self {
        let parent = self
            .region
            .as_deref()
            .and_then(|id| self.find(id))
            .and_then(|e| e.parent.clone());
        self.region = parent;
        self
    }

    pub fn with_viewport_width(mut self, width: f64) -> Self {
        self.viewport_width = width;
        self
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Element, HostError> {
        self.elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| HostError::MissingElement(id.to_string()))
    }

    /// Visible when the element and every enclosing region are visible
    pub fn is_visible(&self, id: &str) -> bool {
        let mut current = self.find(id);
        while let Some(element) = current {
            if element.display == Display::Hidden {
                return false;
            }
            current = element.parent.as_deref().and_then(|p| self.find(p));
        }
        self.find(id).is_some()
    }

    #[cfg(test)]
    pub fn text_of(&self, id: &str) -> Option<&str> {
        match &self.find(id)?.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn controls(&self, container: &str) -> &[Control] {
        match self.find(container).map(|e| &e.kind) {
            Some(ElementKind::Container(controls)) => controls,
            _ => &[],
        }
    }

    /// Interactive targets in display order, skipping hidden ones
    pub fn focusables(&self) -> Vec<Focusable> {
        let mut out = Vec::new();
        for element in &self.elements {
            if !self.is_visible(&element.id) {
                continue;
            }
            match &element.kind {
                ElementKind::Field { .. } | ElementKind::Select { .. } | ElementKind::Button => {
                    out.push(Focusable::Element(element.id.clone()));
                }
                ElementKind::Container(controls) => {
                    out.extend(controls.iter().map(|c| Focusable::Control(c.id)));
                }
                ElementKind::Text(_) | ElementKind::Region => {}
            }
        }
        out
    }

    /// Typed input into a field; fields are edited by the host, not by controllers
    pub fn edit_field(&mut self, id: &str, edit: impl FnOnce(&mut String)) -> Result<(), HostError> {
        match &mut self.find_mut(id)?.kind {
            ElementKind::Field { value, .. } => {
                edit(value);
                Ok(())
            }
            _ => Err(HostError::WrongKind { id: id.to_string(), expected: "field" }),
        }
    }

    /// Move a dropdown's selection by `step` entries, wrapping around
    pub fn cycle_select(&mut self, id: &str, step: isize) -> Result<(), HostError> {
        match &mut self.find_mut(id)?.kind {
            ElementKind::Select { options, selected } => {
                if options.is_empty() {
                    return Ok(());
                }
                let len = options.len() as isize;
                let current = selected
                    .as_deref()
                    .and_then(|s| options.iter().position(|o| o.id == s))
                    .map(|i| i as isize)
                    .unwrap_or(if step < 0 { len } else { -1 });
                let next = (current + step).rem_euclid(len) as usize;
                *selected = Some(options[next].id.clone());
                Ok(())
            }
            _ => Err(HostError::WrongKind { id: id.to_string(), expected: "dropdown" }),
        }
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modals.front()
    }

    pub fn dismiss_modal(&mut self) -> Option<Modal> {
        self.modals.pop_front()
    }

    /// Requested page change, held back while a modal still awaits the user
    pub fn take_navigation(&mut self) -> Option<String> {
        if !self.modals.is_empty() {
            return None;
        }
        self.navigation.take()
    }

    pub fn root_font_scale(&self) -> f64 {
        self.root_font_scale
    }
}

impl Host for Document {
    fn append_control(&mut self, container: &str, label: &str) -> Result<ControlId, HostError> {
        let id = ControlId(self.next_control);
        match &mut self.find_mut(container)?.kind {
            ElementKind::Container(controls) => {
                controls.push(Control { id, label: label.to_string() });
            }
            _ => {
                return Err(HostError::WrongKind {
                    id: container.to_string(),
                    expected: "container",
                })
            }
        }
        self.next_control += 1;
        Ok(id)
    }

    fn clear(&mut self, container: &str) -> Result<(), HostError> {
        match &mut self.find_mut(container)?.kind {
            ElementKind::Container(controls) => {
                controls.clear();
                Ok(())
            }
            _ => Err(HostError::WrongKind { id: container.to_string(), expected: "container" }),
        }
    }

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), HostError> {
        match &mut self.find_mut(id)?.kind {
            ElementKind::Text(content) => {
                *content = text.to_string();
                Ok(())
            }
            _ => Err(HostError::WrongKind { id: id.to_string(), expected: "text" }),
        }
    }

    fn value(&self, id: &str) -> Result<String, HostError> {
        let element = self
            .find(id)
            .ok_or_else(|| HostError::MissingElement(id.to_string()))?;
        match &element.kind {
            ElementKind::Field { value, .. } => Ok(value.clone()),
            ElementKind::Select { selected, .. } => Ok(selected.clone().unwrap_or_default()),
            _ => Err(HostError::WrongKind { id: id.to_string(), expected: "field or dropdown" }),
        }
    }

    fn set_value(&mut self, id: &str, new_value: &str) -> Result<(), HostError> {
        match &mut self.find_mut(id)?.kind {
            ElementKind::Field { value, .. } => {
                *value = new_value.to_string();
                Ok(())
            }
            ElementKind::Select { options, selected } => {
                // Unknown values leave the dropdown without a selection
                *selected = options
                    .iter()
                    .find(|o| o.id == new_value)
                    .map(|o| o.id.clone());
                Ok(())
            }
            _ => Err(HostError::WrongKind { id: id.to_string(), expected: "field or dropdown" }),
        }
    }

    fn set_options(&mut self, id: &str, new_options: &[Choice]) -> Result<(), HostError> {
        match &mut self.find_mut(id)?.kind {
            ElementKind::Select { options, selected } => {
                *options = new_options.to_vec();
                *selected = options.first().map(|o| o.id.clone());
                Ok(())
            }
            _ => Err(HostError::WrongKind { id: id.to_string(), expected: "dropdown" }),
        }
    }

    fn has_element(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    fn display(&self, id: &str) -> Result<Display, HostError> {
        self.find(id)
            .map(|e| e.display)
            .ok_or_else(|| HostError::MissingElement(id.to_string()))
    }

    fn set_display(&mut self, id: &str, display: Display) -> Result<(), HostError> {
        self.find_mut(id)?.display = display;
        Ok(())
    }

    fn alert(&mut self, message: &str) {
        self.modals.push_back(Modal::Alert(message.to_string()));
    }

    fn confirm(&mut self, message: &str) {
        self.modals.push_back(Modal::Confirm(message.to_string()));
    }

    fn navigate(&mut self, target: &str) {
        self.navigation = Some(target.to_string());
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn set_root_font_scale(&mut self, scale: f64) {
        self.root_font_scale = scale;
    }
}
