//! Business card field extraction from recognized text.
//!
//! The extractor is a greedy, order-sensitive line classifier. Each line is
//! offered to an ordered rule list; the first rule whose field is still empty
//! and whose predicate matches takes the trimmed line. Results are drafts for
//! a person to confirm, so extraction never fails.

pub mod patterns;
pub mod rules;

pub use patterns::{
    has_organization_marker, looks_like_email, looks_like_phone, DEFAULT_ORGANIZATION_MARKERS,
};
pub use rules::{default_rules, CardField, LineRule, RuleContext};

use tracing::debug;

use crate::models::card::CardDraft;
use crate::models::config::ExtractionConfig;

/// Card field extractor.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    organization_markers: Vec<String>,
    rules: Vec<LineRule>,
}

impl FieldExtractor {
    /// Create an extractor with the default markers and rules.
    pub fn new() -> Self {
        Self {
            organization_markers: DEFAULT_ORGANIZATION_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            rules: default_rules(),
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_markers(config.organization_markers.iter().cloned())
    }

    /// Replace the organization markers.
    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.organization_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the rule list.
    pub fn with_rules(mut self, rules: Vec<LineRule>) -> Self {
        self.rules = rules;
        self
    }

    /// Organization markers in use.
    pub fn organization_markers(&self) -> &[String] {
        &self.organization_markers
    }

    /// Extract a draft from the full recognized text.
    pub fn extract(&self, text: &str) -> CardDraft {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let mut draft = self.classify(&lines);
        draft.raw_text = text.to_string();
        draft
    }

    /// Extract a draft from already-split lines.
    ///
    /// Blank lines are not classified. The raw text is every given line,
    /// blank ones included, joined with newlines.
    pub fn extract_lines<S: AsRef<str>>(&self, lines: &[S]) -> CardDraft {
        let all: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
        let content: Vec<&str> = all
            .iter()
            .copied()
            .filter(|l| !l.trim().is_empty())
            .collect();
        let mut draft = self.classify(&content);
        draft.raw_text = all.join("\n");
        draft
    }

    fn classify(&self, lines: &[&str]) -> CardDraft {
        let ctx = RuleContext {
            organization_markers: &self.organization_markers,
        };
        let mut draft = CardDraft::default();

        for line in lines {
            let rule = self
                .rules
                .iter()
                .find(|rule| field(&draft, rule.field).is_empty() && rule.matches(line, &ctx));

            if let Some(rule) = rule {
                debug!("Line {:?} assigned to {}", line, rule.field);
                *field_mut(&mut draft, rule.field) = line.trim().to_string();
            }
        }

        draft
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn field(draft: &CardDraft, field: CardField) -> &str {
    match field {
        CardField::Email => &draft.email,
        CardField::Phone => &draft.phone,
        CardField::Company => &draft.company,
        CardField::Name => &draft.name,
    }
}

fn field_mut(draft: &mut CardDraft, field: CardField) -> &mut String {
    match field {
        CardField::Email => &mut draft.email,
        CardField::Phone => &mut draft.phone,
        CardField::Company => &mut draft.company,
        CardField::Name => &mut draft.name,
    }
}

/// Extract a draft from recognized text with the default extractor.
pub fn extract_card(text: &str) -> CardDraft {
    FieldExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_card() {
        let lines = ["Taro Yamada", "Example Inc", "taro@example.com", "03-1234-5678"];
        let draft = FieldExtractor::new().extract_lines(&lines);

        assert_eq!(draft.name, "Taro Yamada");
        assert_eq!(draft.company, "Example Inc");
        assert_eq!(draft.email, "taro@example.com");
        assert_eq!(draft.phone, "03-1234-5678");
        assert_eq!(draft.raw_text, lines.join("\n"));
    }

    #[test]
    fn test_email_wins_over_phone() {
        let draft = extract_card("call me at 03-1234 or email a@b.com");
        assert_eq!(draft.email, "call me at 03-1234 or email a@b.com");
        assert_eq!(draft.phone, "");
        assert_eq!(draft.name, "");
    }

    #[test]
    fn test_japanese_card() {
        let text = "株式会社サンプル\n営業部\n山田 太郎\nTEL 03-1234-5678\nyamada@sample.co.jp\n";
        let draft = extract_card(text);

        assert_eq!(draft.company, "株式会社サンプル");
        assert_eq!(draft.name, "営業部");
        assert_eq!(draft.phone, "TEL 03-1234-5678");
        assert_eq!(draft.email, "yamada@sample.co.jp");
        assert_eq!(draft.raw_text, text);
    }

    #[test]
    fn test_first_match_wins() {
        let text = "a@one.com\nb@two.com\n03-1111-2222\n090-3333-4444";
        let draft = extract_card(text);
        assert_eq!(draft.email, "a@one.com");
        assert_eq!(draft.phone, "03-1111-2222");
        // second email and phone lines fall through to later rules, which reject them
        assert_eq!(draft.name, "");
    }

    #[test]
    fn test_second_email_line_can_become_company() {
        let draft = extract_card("a@one.com\nsales@example-inc.com Inc");
        assert_eq!(draft.email, "a@one.com");
        assert_eq!(draft.company, "sales@example-inc.com Inc");
    }

    #[test]
    fn test_company_after_name() {
        let draft = extract_card("Hanako Suzuki\nhanako@acme.test\n06-9876-5432\nAcme Ltd");
        assert_eq!(draft.name, "Hanako Suzuki");
        assert_eq!(draft.company, "Acme Ltd");
    }

    #[test]
    fn test_lines_are_trimmed_and_blanks_skipped() {
        let draft = extract_card("\n   \n  Taro Yamada  \n\t\n  Example Corp ");
        assert_eq!(draft.name, "Taro Yamada");
        assert_eq!(draft.company, "Example Corp");
    }

    #[test]
    fn test_single_char_line_is_not_a_name() {
        let draft = extract_card("X\nJane Doe");
        assert_eq!(draft.name, "Jane Doe");
    }

    #[test]
    fn test_empty_input() {
        let draft = extract_card("");
        assert!(draft.is_empty());
        assert_eq!(draft.raw_text, "");
    }

    #[test]
    fn test_lines_after_all_assigned_are_ignored() {
        let draft = extract_card("Jane Doe\nFoo Inc\nj@foo.com\n03-1234-5678\nBar Corp\nJohn Roe");
        assert_eq!(draft.name, "Jane Doe");
        assert_eq!(draft.company, "Foo Inc");
    }

    #[test]
    fn test_second_company_line_is_dropped() {
        let draft = extract_card("Foo Inc\nBar Corp\nJane Doe");
        assert_eq!(draft.company, "Foo Inc");
        assert_eq!(draft.name, "Jane Doe");

        let draft = extract_card("株式会社サンプル\n有限会社テスト");
        assert_eq!(draft.company, "株式会社サンプル");
        assert_eq!(draft.name, "");
    }

    #[test]
    fn test_extract_lines_keeps_blank_lines_in_raw_text() {
        let lines = ["Taro Yamada", "", "  ", "Example Inc"];
        let draft = FieldExtractor::new().extract_lines(&lines);
        assert_eq!(draft.name, "Taro Yamada");
        assert_eq!(draft.company, "Example Inc");
        assert_eq!(draft.raw_text, "Taro Yamada\n\n  \nExample Inc");
    }

    #[test]
    fn test_custom_markers() {
        let extractor = FieldExtractor::new().with_markers(["GmbH"]);
        let draft = extractor.extract("Max Mustermann\nBeispiel GmbH\nExample Inc");
        assert_eq!(draft.name, "Max Mustermann");
        assert_eq!(draft.company, "Beispiel GmbH");
    }

    #[test]
    fn test_from_config() {
        let config = ExtractionConfig {
            organization_markers: vec!["S.A.".to_string()],
        };
        let extractor = FieldExtractor::from_config(&config);
        assert_eq!(extractor.organization_markers(), ["S.A.".to_string()]);
    }

    #[test]
    fn test_outputs_are_trimmed_input_lines() {
        let samples = [
            "",
            "@",
            "12\n34\n5678",
            "  株式会社テスト  \n\n 佐藤 花子\nFAX (03)0000-0000\nx@y",
            "Inc\nLtd\nCorp\n@@\n(((\n99-\nname",
            "a\nb\nc\nd",
        ];

        for text in samples {
            let draft = extract_card(text);
            let trimmed: Vec<&str> = text.lines().map(str::trim).collect();
            for value in [&draft.name, &draft.company, &draft.email, &draft.phone] {
                assert!(
                    value.is_empty() || trimmed.contains(&value.as_str()),
                    "{:?} is not a trimmed line of {:?}",
                    value,
                    text
                );
            }
            assert_eq!(draft.raw_text, text);
        }
    }
}
