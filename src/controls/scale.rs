use crate::host::Host;

/// Width at which the scoreboard is drawn at its natural size
pub const BASELINE_WIDTH: f64 = 1024.0;

/// Root font multiplier for a viewport, never below 1.0
pub fn font_scale(width: f64) -> f64 {
    if width.is_finite() && width >= BASELINE_WIDTH {
        width / BASELINE_WIDTH
    } else {
        1.0
    }
}

/// Apply the multiplier for the current viewport width.
///
/// This is a snapshot taken when the page opens; resizing later does not rescale.
pub fn apply_font_scale(host: &mut dyn Host) -> f64 {
    let width = host.viewport_width();
    let scale = font_scale(width);
    host.set_root_font_scale(scale);
    tracing::debug!(width, scale, "Applied root font scale");
    scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Document;

    #[test]
    fn test_font_scale() {
        assert_eq!(font_scale(800.0), 1.0);
        assert_eq!(font_scale(1024.0), 1.0);
        assert_eq!(font_scale(1536.0), 1.5);
        assert_eq!(font_scale(2048.0), 2.0);
        assert_eq!(font_scale(0.0), 1.0);
    }

    #[test]
    fn test_font_scale_ignores_unusable_widths() {
        assert_eq!(font_scale(f64::NAN), 1.0);
        assert_eq!(font_scale(f64::INFINITY), 1.0);
        assert_eq!(font_scale(f64::NEG_INFINITY), 1.0);
        assert_eq!(font_scale(-2048.0), 1.0);
    }

    #[test]
    fn test_apply_sets_root_scale() {
        let mut doc = Document::new("Scoreboard").with_viewport_width(2048.0);
        assert_eq!(apply_font_scale(&mut doc), 2.0);
        assert_eq!(doc.root_font_scale(), 2.0);

        doc.set_viewport_width(800.0);
        assert_eq!(doc.root_font_scale(), 2.0, "no rescale without a new page-ready");
    }
}
