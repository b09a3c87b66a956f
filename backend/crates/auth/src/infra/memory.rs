//! In-Memory Repository
//!
//! Process-local admin store for tests and database-less runs.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::AdminCredential;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::admin_name::AdminName;
use crate::error::{AuthError, AuthResult};

/// Admins keyed by name
#[derive(Clone, Default)]
pub struct InMemoryAdminRepository {
    admins: Arc<RwLock<HashMap<AdminName, AdminCredential>>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AdminRepository for InMemoryAdminRepository {
    async fn create(&self, admin: &AdminCredential) -> AuthResult<()> {
        let mut admins = self.admins.write().await;
        if admins.contains_key(&admin.admin_name) {
            return Err(AuthError::AdminNameTaken);
        }
        admins.insert(admin.admin_name.clone(), admin.clone());
        Ok(())
    }

    async fn find_by_name(&self, admin_name: &AdminName) -> AuthResult<Option<AdminCredential>> {
        Ok(self.admins.read().await.get(admin_name).cloned())
    }

    async fn count(&self) -> AuthResult<i64> {
        Ok(self.admins.read().await.len() as i64)
    }

    async fn update_password(&self, admin: &AdminCredential) -> AuthResult<()> {
        let mut admins = self.admins.write().await;
        match admins.get_mut(&admin.admin_name) {
            Some(stored) if stored.admin_id == admin.admin_id => {
                stored.password_hash = admin.password_hash.clone();
                stored.updated_at = admin.updated_at;
                Ok(())
            }
            _ => Err(AuthError::Internal(format!(
                "Admin {} vanished during password update",
                admin.admin_id
            ))),
        }
    }
}
