use crate::host::{Host, HostError};

/// Compare two fields exactly, alerting with `message` when they differ.
///
/// Both values are read at call time. Use as a gate before submitting a form.
pub fn fields_match(
    host: &mut dyn Host,
    first: &str,
    second: &str,
    message: &str,
) -> Result<bool, HostError> {
    let a = host.value(first)?;
    let b = host.value(second)?;
    if a == b {
        return Ok(true);
    }
    tracing::debug!(first, second, "Field values differ");
    host.alert(message);
    Ok(false)
}

/// Value of a field that must not be empty; alerts with `message` otherwise
pub fn require_filled(
    host: &mut dyn Host,
    field: &str,
    message: &str,
) -> Result<Option<String>, HostError> {
    let value = host.value(field)?;
    if value.is_empty() {
        host.alert(message);
        return Ok(None);
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Document, Modal};

    fn form(pass: &str, check: &str) -> Document {
        let mut doc = Document::new("User").secret("pass", "Password").secret("pass_check", "Repeat");
        doc.set_value("pass", pass).unwrap();
        doc.set_value("pass_check", check).unwrap();
        doc
    }

    #[test]
    fn test_matching_fields_pass_silently() {
        let mut doc = form("abc123", "abc123");
        assert!(fields_match(&mut doc, "pass", "pass_check", "mismatch").unwrap());
        assert_eq!(doc.modal(), None);
    }

    #[test]
    fn test_mismatch_alerts() {
        let mut doc = form("abc123", "abc124");
        assert!(!fields_match(&mut doc, "pass", "pass_check", "Passwords don't match").unwrap());
        assert_eq!(doc.modal(), Some(&Modal::Alert("Passwords don't match".to_string())));
    }

    #[test]
    fn test_comparison_is_exact() {
        for (a, b) in [("abc", "ABC"), ("abc", "abc "), (" abc", "abc"), ("", "x")] {
            let mut doc = form(a, b);
            assert!(!fields_match(&mut doc, "pass", "pass_check", "no").unwrap(), "{a:?} vs {b:?}");
        }
        let mut doc = form("", "");
        assert!(fields_match(&mut doc, "pass", "pass_check", "no").unwrap());
    }

    #[test]
    fn test_values_are_read_at_call_time() {
        let mut doc = form("one", "two");
        assert!(!fields_match(&mut doc, "pass", "pass_check", "no").unwrap());
        doc.set_value("pass_check", "one").unwrap();
        assert!(fields_match(&mut doc, "pass", "pass_check", "no").unwrap());
    }

    #[test]
    fn test_require_filled() {
        let mut doc = form("", "x");
        assert_eq!(require_filled(&mut doc, "pass", "You must enter a password").unwrap(), None);
        assert_eq!(require_filled(&mut doc, "pass_check", "unused").unwrap().as_deref(), Some("x"));
        assert_eq!(doc.modal(), Some(&Modal::Alert("You must enter a password".to_string())));
    }
}
