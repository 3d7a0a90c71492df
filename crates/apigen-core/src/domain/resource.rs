//! Resource naming.

use std::fmt;

use super::error::DomainError;

/// Singular/plural pair for a resource, derived from a single CLI argument by
/// the trailing-`s` heuristic (`widget` ↔ `widgets`).
///
/// The plural form keys the schema and data store documents and names the
/// controller and route artifacts; the singular form names the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceName {
    singular: String,
    plural: String,
}

impl ResourceName {
    /// Parse a raw resource argument (singular or plural, caller's choice).
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        validate(raw)?;

        let (singular, plural) = if let Some(stripped) = raw.strip_suffix('s') {
            (stripped.to_string(), raw.to_string())
        } else {
            (raw.to_string(), format!("{raw}s"))
        };

        Ok(Self { singular, plural })
    }

    pub fn singular(&self) -> &str {
        &self.singular
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// Singular with the first letter upper-cased, used in generated
    /// identifiers (`createWidgetInstance`) and default name values.
    pub fn capitalized_singular(&self) -> String {
        capitalize(&self.singular)
    }

    /// Plural with the first letter upper-cased (`getAllWidgets`).
    pub fn capitalized_plural(&self) -> String {
        capitalize(&self.plural)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plural)
    }
}

fn validate(raw: &str) -> Result<(), DomainError> {
    let err = |reason: &str| DomainError::InvalidResourceName {
        name: raw.into(),
        reason: reason.into(),
    };

    if raw.is_empty() {
        return Err(err("name cannot be empty"));
    }
    if raw == "s" {
        return Err(err("name needs at least one letter besides the plural 's'"));
    }
    if raw.starts_with('.') {
        return Err(err("name cannot start with '.'"));
    }
    if raw.contains('/') || raw.contains('\\') {
        return Err(err("name cannot contain path separators"));
    }
    if !raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(err("only alphanumerics, '-' and '_' are allowed"));
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singular_argument_gains_plural() {
        let name = ResourceName::parse("widget").unwrap();
        assert_eq!(name.singular(), "widget");
        assert_eq!(name.plural(), "widgets");
    }

    #[test]
    fn plural_argument_loses_trailing_s() {
        let name = ResourceName::parse("publishers").unwrap();
        assert_eq!(name.singular(), "publisher");
        assert_eq!(name.plural(), "publishers");
    }

    #[test]
    fn capitalization_for_generated_identifiers() {
        let name = ResourceName::parse("widget").unwrap();
        assert_eq!(name.capitalized_singular(), "Widget");
        assert_eq!(name.capitalized_plural(), "Widgets");
    }

    #[test]
    fn invalid_names_are_rejected() {
        for bad in ["", "s", ".hidden", "a/b", "a\\b", "na me"] {
            assert!(ResourceName::parse(bad).is_err(), "accepted: {bad}");
        }
    }

    #[test]
    fn valid_names_pass() {
        for ok in ["widget", "blog_post", "api-keys", "Item2"] {
            assert!(ResourceName::parse(ok).is_ok(), "rejected: {ok}");
        }
    }
}
