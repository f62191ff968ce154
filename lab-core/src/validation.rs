//! Per-field validation messages for drafts before they are submitted.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$"
    )
    .expect("email pattern compiles");
}

/// Field name -> messages. Empty means the draft can be submitted.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Messages for one field, for inline display next to the input.
    pub fn field(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Record an error when `value` is blank.
    pub fn require(&mut self, field: &str, value: Option<&str>) {
        if value.map_or(true, |v| v.trim().is_empty()) {
            self.add_error(field, format!("{} is required", field));
        }
    }

    /// `Ok(())` when valid, otherwise the collected errors.
    pub fn into_result(self) -> crate::error::Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(crate::error::LabError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self
            .errors
            .iter()
            .map(|(field, errors)| format!("{}: {}", field, errors.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&message)
    }
}

/// Well-formed address: local part, then dot-separated domain labels that
/// neither start nor end with `-`, then an alphabetic TLD.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_flags_blank_and_missing() {
        let mut result = ValidationResult::new();
        result.require("cliente", None);
        result.require("tipoAnalisis", Some("   "));
        result.require("estado", Some("Recibida"));
        assert!(!result.is_valid());
        assert_eq!(result.field("cliente").len(), 1);
        assert_eq!(result.field("tipoAnalisis").len(), 1);
        assert!(result.field("estado").is_empty());
    }

    #[test]
    fn display_joins_fields() {
        let mut result = ValidationResult::new();
        result.add_error("a", "x");
        result.add_error("a", "y");
        result.add_error("b", "z");
        assert_eq!(result.to_string(), "a: x, y; b: z");
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("lab@agua.co"));
        assert!(is_valid_email("  analista.jefe+turno@lab-aguas.gov.co "));
        assert!(!is_valid_email("lab@agua"));
        assert!(!is_valid_email("@agua.co"));
        assert!(!is_valid_email("la b@agua.co"));
        assert!(!is_valid_email("lab@@agua.co"));
    }

    #[test]
    fn malformed_domains_and_characters_are_rejected() {
        for bad in ["a@b..co", "a@b.c", "a@-.x", "a,b@x.co", "a@b.co\0", "a@-lab.co", "a@lab-.co"] {
            assert!(!is_valid_email(bad), "{:?} should be rejected", bad);
        }
    }
}
