//! Admin Name Value Object
//!
//! The login handle of an administrator.
//!
//! ## Invariants
//! - NFKC normalized, surrounding whitespace trimmed
//! - 1 to 64 characters
//! - no inner whitespace, no control characters
//!
//! Matching is exact (case-sensitive), the same way the name was stored.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::AuthError;

/// Maximum length for an admin name (in characters)
pub const ADMIN_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(try_from = "String", into = "String")]
pub struct AdminName(String);

/// Why a raw string is not an admin name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminNameError {
    Empty,
    TooLong,
    InvalidCharacter,
}

impl std::fmt::Display for AdminNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminNameError::Empty => write!(f, "Username is required"),
            AdminNameError::TooLong => write!(
                f,
                "Username must be at most {} characters",
                ADMIN_NAME_MAX_LENGTH
            ),
            AdminNameError::InvalidCharacter => {
                write!(f, "Username cannot contain spaces or control characters")
            }
        }
    }
}

impl std::error::Error for AdminNameError {}

impl AdminName {
    pub fn new(raw: &str) -> Result<Self, AdminNameError> {
        let normalized: String = raw.nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(AdminNameError::Empty);
        }
        if trimmed.chars().count() > ADMIN_NAME_MAX_LENGTH {
            return Err(AdminNameError::TooLong);
        }
        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(AdminNameError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AdminName {
    type Error = AdminNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<AdminName> for String {
    fn from(value: AdminName) -> Self {
        value.0
    }
}

impl From<AdminNameError> for AuthError {
    fn from(err: AdminNameError) -> Self {
        AuthError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_keeps_case() {
        let name = AdminName::new("  Admin ").unwrap();
        assert_eq!(name.as_str(), "Admin");
        assert_eq!(name.to_string(), "Admin");
    }

    #[test]
    fn test_nfkc() {
        // Fullwidth "ａｄｍｉｎ"
        let name = AdminName::new("ａｄｍｉｎ").unwrap();
        assert_eq!(name.as_str(), "admin");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(AdminName::new("").unwrap_err(), AdminNameError::Empty);
        assert_eq!(AdminName::new("   ").unwrap_err(), AdminNameError::Empty);
        assert_eq!(
            AdminName::new("two words").unwrap_err(),
            AdminNameError::InvalidCharacter
        );
        assert_eq!(
            AdminName::new("tab\there").unwrap_err(),
            AdminNameError::InvalidCharacter
        );
        assert_eq!(
            AdminName::new(&"a".repeat(ADMIN_NAME_MAX_LENGTH + 1)).unwrap_err(),
            AdminNameError::TooLong
        );
        assert!(AdminName::new(&"a".repeat(ADMIN_NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_serde() {
        let name: AdminName = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(name.as_str(), "admin");
        assert!(serde_json::from_str::<AdminName>("\"\"").is_err());
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"admin\"");
    }
}
