/// Form-input checks shared by the booking and support-contact endpoints.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Accepts addresses shaped `local@domain`: a non-empty local part of
/// letters, digits or `+ _ . -`, an `@`, then a non-empty domain.
pub fn is_valid_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && local
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '_' | '.' | '-'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   \t"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn valid_emails() {
        assert!(is_valid_email("amal@example.com"));
        assert!(is_valid_email("trips+promo@boatsafari.lk"));
        assert!(is_valid_email("first.last@mail"));
    }

    #[test]
    fn invalid_emails() {
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@missing-local.com"));
        assert!(!is_valid_email("trailing@"));
        assert!(!is_valid_email("spaced name@example.com"));
    }
}
