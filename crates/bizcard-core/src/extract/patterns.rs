//! Line patterns used by the card field rules.

use lazy_static::lazy_static;
use regex::Regex;

/// Organization markers used when no others are configured.
pub const DEFAULT_ORGANIZATION_MARKERS: &[&str] =
    &["株式会社", "有限会社", "合同会社", "Inc", "Ltd", "Corp"];

lazy_static! {
    // A 2-4 digit run followed by more digits, hyphens or parentheses.
    // Matches anywhere in the line: "03-1234-5678", "TEL (03)1234", "2024".
    pub static ref PHONE_LIKE: Regex = Regex::new(r"[0-9]{2,4}[-()0-9]+").unwrap();
}

/// Check whether a line should be treated as an email address.
pub fn looks_like_email(line: &str) -> bool {
    line.contains('@')
}

/// Check whether a line should be treated as a phone number.
pub fn looks_like_phone(line: &str) -> bool {
    PHONE_LIKE.is_match(line)
}

/// Check whether a line contains any of the given organization markers.
pub fn has_organization_marker<S: AsRef<str>>(line: &str, markers: &[S]) -> bool {
    markers
        .iter()
        .map(AsRef::as_ref)
        .filter(|m| !m.is_empty())
        .any(|m| line.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_like() {
        assert!(looks_like_phone("03-1234-5678"));
        assert!(looks_like_phone("TEL: (03)1234-5678"));
        assert!(looks_like_phone("090(1234)5678"));
        assert!(looks_like_phone("Room 123"));
        assert!(!looks_like_phone("Taro Yamada"));
        assert!(!looks_like_phone("Floor 12"));
        assert!(!looks_like_phone("１２３４５"));
    }

    #[test]
    fn test_email_like() {
        assert!(looks_like_email("taro@example.com"));
        assert!(looks_like_email("Mail: @handle"));
        assert!(!looks_like_email("example.com"));
    }

    #[test]
    fn test_organization_marker() {
        assert!(has_organization_marker("Example Inc.", DEFAULT_ORGANIZATION_MARKERS));
        assert!(has_organization_marker("株式会社サンプル", DEFAULT_ORGANIZATION_MARKERS));
        assert!(has_organization_marker("Acme Corporation", DEFAULT_ORGANIZATION_MARKERS));
        assert!(!has_organization_marker("Taro Yamada", DEFAULT_ORGANIZATION_MARKERS));
        assert!(!has_organization_marker("anything", &[""]));
    }
}
