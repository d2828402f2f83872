use crate::host::{Display, Host, HostError};

pub fn show(host: &mut dyn Host, id: &str) -> Result<(), HostError> {
    host.set_display(id, Display::Visible)
}

pub fn hide(host: &mut dyn Host, id: &str) -> Result<(), HostError> {
    host.set_display(id, Display::Hidden)
}

/// Returns whether the element's display actually changed
pub fn set_visible(host: &mut dyn Host, id: &str, visible: bool) -> Result<bool, HostError> {
    let wanted = if visible { Display::Visible } else { Display::Hidden };
    if host.display(id)? == wanted {
        return Ok(false);
    }
    host.set_display(id, wanted)?;
    Ok(true)
}
