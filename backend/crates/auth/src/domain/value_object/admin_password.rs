//! Admin Password Value Object
//!
//! Stored password hash of an administrator. Delegates to
//! `platform::password` for hashing and verification.

use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Argon2id PHC hash of an admin password
#[derive(Clone, PartialEq, Eq)]
pub struct AdminPassword(HashedPassword);

impl AdminPassword {
    /// Hash a new password after checking it against the policy
    pub fn hash_new(raw: String, pepper: Option<&[u8]>) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw)?;
        Ok(Self(clear_text.hash(pepper)?))
    }

    /// Load from the stored PHC string
    pub fn from_phc_string(phc: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc)
            .map(Self)
            .map_err(|e| AuthError::Internal(format!("Stored password hash is unreadable: {e}")))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(password, pepper)
    }
}

impl fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AdminPassword").field(&"[HASH]").finish()
    }
}
