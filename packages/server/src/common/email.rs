//! Email value object.
//!
//! Raw strings from storage or callers are promoted to `Email` at the
//! boundary; everything past the boundary can assume well-formedness.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::errors::PersistenceError;

/// A syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Promote a raw string. The check is deliberately shallow (one `@`,
    /// non-empty local and domain parts, a dot in the domain); delivery
    /// verification belongs to the mailer, not the persistence core.
    pub fn new(raw: &str) -> Result<Self, PersistenceError> {
        let mut parts = raw.splitn(2, '@');
        let local = parts.next().unwrap_or("");
        let domain = parts.next().unwrap_or("");

        let valid = !local.is_empty()
            && !domain.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !raw.contains(char::is_whitespace);

        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(PersistenceError::malformed(
                "email",
                format!("not a valid email address: {raw:?}"),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        let email = Email::new("ada@example.org").unwrap();
        assert_eq!(email.as_str(), "ada@example.org");
    }

    #[test]
    fn rejects_missing_at() {
        assert!(Email::new("ada.example.org").is_err());
    }

    #[test]
    fn rejects_empty_local_part() {
        assert!(Email::new("@example.org").is_err());
    }

    #[test]
    fn rejects_domain_without_dot() {
        assert!(Email::new("ada@localhost").is_err());
    }

    #[test]
    fn rejects_second_at_sign() {
        assert!(Email::new("a@b@c.com").is_err());
    }

    #[test]
    fn rejects_whitespace() {
        assert!(Email::new("ada smith@example.org").is_err());
    }
}
