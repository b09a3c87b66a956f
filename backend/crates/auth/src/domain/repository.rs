//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::AdminCredential;
use crate::domain::value_object::admin_name::AdminName;
use crate::error::AuthResult;

/// Admin credential repository trait
#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    /// Insert a new admin. Fails with `AdminNameTaken` on a duplicate name.
    async fn create(&self, admin: &AdminCredential) -> AuthResult<()>;

    /// Find admin by exact name
    async fn find_by_name(&self, admin_name: &AdminName) -> AuthResult<Option<AdminCredential>>;

    /// Number of stored admins
    async fn count(&self) -> AuthResult<i64>;

    /// Persist a changed password hash
    async fn update_password(&self, admin: &AdminCredential) -> AuthResult<()>;
}
