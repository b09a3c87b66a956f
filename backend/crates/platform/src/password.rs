//! Password Hashing and Verification
//!
//! Argon2id hashing of administrator passwords.
//!
//! Two ways to build a [`ClearTextPassword`]:
//! - [`ClearTextPassword::new`] enforces the policy and is used when a
//!   password is being *set*
//! - [`ClearTextPassword::for_verification`] only rejects empty input and is
//!   used when a submitted password is being *checked*, so that a password
//!   set under an older policy can still log in
//!
//! Both normalize with NFKC first, so the same keystrokes always hash the
//! same way.

use std::{fmt, sync::LazyLock};

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory on drop.
///
/// Not `Clone`, and `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a password that satisfies the policy.
    ///
    /// - 8 to 128 characters (code points, after NFKC)
    /// - not whitespace only
    /// - no control characters other than space, tab, newline
    /// - not a well-known or trivially sequential password
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::for_verification(raw)?;
        let normalized = password.0.as_str();

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if is_common_pattern(normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(password)
    }

    /// Create a password for checking against a stored hash.
    ///
    /// Only empty or whitespace-only input is rejected.
    pub fn for_verification(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        Ok(Self(normalized))
    }

    /// Password bytes with the pepper appended
    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash with Argon2id (default parameters, random 16-byte salt)
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a PHC string loaded from storage
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash.
    ///
    /// `pepper` must match the one used when hashing.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Timing equalization
// ============================================================================

static DUMMY_HASH: LazyLock<Option<HashedPassword>> = LazyLock::new(|| {
    ClearTextPassword(String::from("dummy-password-never-matches"))
        .hash(None)
        .ok()
});

/// Run a full Argon2 verification against a throwaway hash.
///
/// Called when the account does not exist, so that an unknown name takes
/// as long to reject as a wrong password. Always returns `false`.
pub fn verify_dummy(password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
    if let Some(hash) = DUMMY_HASH.as_ref() {
        let _ = hash.verify(password, pepper);
    }
    false
}

// ============================================================================
// Helper Functions
// ============================================================================

const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "passw0rd",
    "12345678",
    "123456789",
    "1234567890",
    "abcdefgh",
    "letmein",
    "welcome",
    "welcome1",
    "admin123",
    "administrator",
    "changeme",
    "iloveyou",
    "sunshine",
    "football",
    "trustno1",
    "motdepasse",
    "azertyuiop",
];

const KEYBOARD_PATTERNS: &[&str] = &["qwerty", "azerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];

fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_digits(&lower) {
        return true;
    }

    if KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// All-digit strings that count straight up or down, e.g. "23456789"
fn is_sequential_digits(s: &str) -> bool {
    let digits: Option<Vec<u32>> = s.chars().map(|c| c.to_digit(10)).collect();
    let Some(digits) = digits else {
        return false;
    };
    if digits.len() < 4 {
        return false;
    }

    let ascending = digits.windows(2).all(|w| (w[0] + 1) % 10 == w[1]);
    let descending = digits.windows(2).all(|w| (w[1] + 1) % 10 == w[0]);
    ascending || descending
}

// ============================================================================
// Tests
// ============================================================================
