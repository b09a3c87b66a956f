//! Admin Credential Entity
//!
//! The one persisted record of the auth domain: who may sign in to the
//! admin area, and the hash their password must match.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    AdminId, admin_name::AdminName, admin_password::AdminPassword,
};

#[derive(Debug, Clone)]
pub struct AdminCredential {
    pub admin_id: AdminId,
    /// Unique login handle
    pub admin_name: AdminName,
    pub password_hash: AdminPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminCredential {
    pub fn new(admin_name: AdminName, password_hash: AdminPassword) -> Self {
        let now = Utc::now();
        Self {
            admin_id: AdminId::new(),
            admin_name,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the password hash
    pub fn change_password(&mut self, password_hash: AdminPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_password_touches_updated_at() {
        let name = AdminName::new("admin").unwrap();
        let first = AdminPassword::hash_new("first-Passw0rd!".to_string(), None).unwrap();
        let mut admin = AdminCredential::new(name, first.clone());
        let created = admin.created_at;

        let second = AdminPassword::hash_new("second-Passw0rd!".to_string(), None).unwrap();
        admin.change_password(second.clone());

        assert_eq!(admin.password_hash, second);
        assert_ne!(admin.password_hash, first);
        assert_eq!(admin.created_at, created);
        assert!(admin.updated_at >= created);
    }
}
