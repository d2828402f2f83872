//! Building blocks shared by the page controllers

pub mod columns;
pub mod confirm;
pub mod options;
pub mod scale;
pub mod selection;
pub mod validate;
pub mod visibility;

pub use columns::apply_column_mapping;
pub use confirm::ConfirmFlow;
pub use options::OptionList;
pub use scale::apply_font_scale;
pub use selection::{SelectionBehavior, SelectionHandler};
pub use validate::{fields_match, require_filled};
pub use visibility::set_visible;
