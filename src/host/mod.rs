//! Presentation layer seen by the page controllers.
//!
//! Controllers never touch the terminal directly. They go through [`Host`],
//! which the in-memory [`Document`] implements for both the terminal front end
//! and the tests.

pub mod document;

pub use document::{Document, ElementKind, Focusable, Modal};

use thiserror::Error;

use crate::data::Choice;

/// Handle of a control created by [`Host::append_control`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Visible,
    Hidden,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("no element with id '{0}' on this page")]
    MissingElement(String),

    #[error("element '{id}' is not a {expected}")]
    WrongKind { id: String, expected: &'static str },
}

pub trait Host {
    /// Append a clickable control to a container, returning its handle
    fn append_control(&mut self, container: &str, label: &str) -> Result<ControlId, HostError>;

    /// Remove every control from a container
    fn clear(&mut self, container: &str) -> Result<(), HostError>;

    fn set_text(&mut self, id: &str, text: &str) -> Result<(), HostError>;

    /// Current value of a field or dropdown, read live
    fn value(&self, id: &str) -> Result<String, HostError>;

    fn set_value(&mut self, id: &str, value: &str) -> Result<(), HostError>;

    /// Replace the entries of a dropdown
    fn set_options(&mut self, id: &str, options: &[Choice]) -> Result<(), HostError>;

    fn has_element(&self, id: &str) -> bool;

    fn display(&self, id: &str) -> Result<Display, HostError>;

    fn set_display(&mut self, id: &str, display: Display) -> Result<(), HostError>;

    /// Blocking notification; input goes to it until acknowledged
    fn alert(&mut self, message: &str);

    /// Yes/no question; the answer comes back as a page event
    fn confirm(&mut self, message: &str);

    /// Request a page change once the running handler completes and any
    /// pending modal has been acknowledged
    fn navigate(&mut self, target: &str);

    fn viewport_width(&self) -> f64;

    fn set_root_font_scale(&mut self, scale: f64);
}
