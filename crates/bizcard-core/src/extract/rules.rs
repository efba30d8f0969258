//! Ordered line classification rules.

use std::fmt;

use super::patterns::{has_organization_marker, looks_like_email, looks_like_phone};

/// Draft field a rule assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    Email,
    Phone,
    Company,
    Name,
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardField::Email => write!(f, "email"),
            CardField::Phone => write!(f, "phone"),
            CardField::Company => write!(f, "company"),
            CardField::Name => write!(f, "name"),
        }
    }
}

/// Inputs a rule predicate may consult besides the line itself.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Substrings marking an organization line.
    pub organization_markers: &'a [String],
}

/// A (field, predicate) pair.
///
/// A rule fires on a line when its field is still unassigned and the
/// predicate accepts the line. Predicates of later rules reject what earlier
/// rules claim when a line should be dropped rather than fall through.
#[derive(Clone, Copy)]
pub struct LineRule {
    /// Field assigned when the rule fires.
    pub field: CardField,
    predicate: fn(&str, &RuleContext<'_>) -> bool,
}

impl LineRule {
    /// Create a rule.
    pub const fn new(field: CardField, predicate: fn(&str, &RuleContext<'_>) -> bool) -> Self {
        Self { field, predicate }
    }

    /// Check whether the predicate accepts the line.
    pub fn matches(&self, line: &str, ctx: &RuleContext<'_>) -> bool {
        (self.predicate)(line, ctx)
    }
}

impl fmt::Debug for LineRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineRule").field("field", &self.field).finish()
    }
}

fn email_rule(line: &str, _ctx: &RuleContext<'_>) -> bool {
    looks_like_email(line)
}

fn phone_rule(line: &str, _ctx: &RuleContext<'_>) -> bool {
    looks_like_phone(line)
}

fn company_rule(line: &str, ctx: &RuleContext<'_>) -> bool {
    has_organization_marker(line, ctx.organization_markers)
}

// Organization lines never become the name, even once company is taken.
fn name_rule(line: &str, ctx: &RuleContext<'_>) -> bool {
    line.trim().chars().count() > 1
        && !looks_like_email(line)
        && !looks_like_phone(line)
        && !has_organization_marker(line, ctx.organization_markers)
}

/// Rules in priority order: email, phone, company, name.
pub fn default_rules() -> Vec<LineRule> {
    vec![
        LineRule::new(CardField::Email, email_rule),
        LineRule::new(CardField::Phone, phone_rule),
        LineRule::new(CardField::Company, company_rule),
        LineRule::new(CardField::Name, name_rule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(markers: &[String]) -> RuleContext<'_> {
        RuleContext {
            organization_markers: markers,
        }
    }

    #[test]
    fn test_default_rule_order() {
        let fields: Vec<CardField> = default_rules().iter().map(|r| r.field).collect();
        assert_eq!(
            fields,
            vec![
                CardField::Email,
                CardField::Phone,
                CardField::Company,
                CardField::Name
            ]
        );
    }

    #[test]
    fn test_name_rule() {
        let markers = vec!["Inc".to_string()];
        let rules = default_rules();
        let name = &rules[3];
        assert!(name.matches("Taro Yamada", &ctx(&markers)));
        assert!(name.matches("山田", &ctx(&markers)));
        assert!(!name.matches(" A ", &ctx(&markers)));
        assert!(!name.matches("a@b", &ctx(&markers)));
        assert!(!name.matches("03-1234", &ctx(&markers)));
        assert!(!name.matches("Example Inc", &ctx(&markers)));
    }

    #[test]
    fn test_company_rule_uses_context() {
        let rules = default_rules();
        let company = &rules[2];
        let custom = vec!["GmbH".to_string()];
        assert!(company.matches("Beispiel GmbH", &ctx(&custom)));
        assert!(!company.matches("Example Inc", &ctx(&custom)));
    }
}
