//! Admin Management Use Case
//!
//! Operator-side bootstrap of the admin credential: first creation and
//! password changes. Not reachable over HTTP.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::AdminCredential;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{admin_name::AdminName, admin_password::AdminPassword};
use crate::error::{AuthError, AuthResult};

/// What `set_password` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChange {
    Updated,
    Created,
}

pub struct ManageAdminUseCase<R>
where
    R: AdminRepository,
{
    admin_repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ManageAdminUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(admin_repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { admin_repo, config }
    }

    /// Create the first admin. Refused once any admin exists.
    pub async fn create(&self, username: &str, password: String) -> AuthResult<AdminCredential> {
        let admin_name = AdminName::new(username)?;

        if self.admin_repo.count().await? > 0 {
            return Err(AuthError::AdminAlreadyExists);
        }

        let password_hash = AdminPassword::hash_new(password, self.config.pepper())?;
        let admin = AdminCredential::new(admin_name, password_hash);
        self.admin_repo.create(&admin).await?;

        tracing::info!(admin_id = %admin.admin_id, admin_name = %admin.admin_name, "Admin created");
        Ok(admin)
    }

    /// Replace the password of `username`.
    ///
    /// Creates the admin only when the table is empty; an unknown name next
    /// to an existing admin is refused like a second `create`.
    pub async fn set_password(
        &self,
        username: &str,
        password: String,
    ) -> AuthResult<PasswordChange> {
        let admin_name = AdminName::new(username)?;
        let existing = self.admin_repo.find_by_name(&admin_name).await?;

        if existing.is_none() && self.admin_repo.count().await? > 0 {
            return Err(AuthError::AdminAlreadyExists);
        }

        let password_hash = AdminPassword::hash_new(password, self.config.pepper())?;

        match existing {
            Some(mut admin) => {
                admin.change_password(password_hash);
                self.admin_repo.update_password(&admin).await?;
                tracing::info!(admin_id = %admin.admin_id, "Admin password changed");
                Ok(PasswordChange::Updated)
            }
            None => {
                let admin = AdminCredential::new(admin_name, password_hash);
                self.admin_repo.create(&admin).await?;
                tracing::info!(admin_id = %admin.admin_id, "Admin created");
                Ok(PasswordChange::Created)
            }
        }
    }
}
