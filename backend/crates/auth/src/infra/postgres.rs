//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::AdminCredential;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{
    AdminId, admin_name::AdminName, admin_password::AdminPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed admin repository
#[derive(Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AdminRepository for PgAdminRepository {
    async fn create(&self, admin: &AdminCredential) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO admins (
                admin_id,
                username,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(admin.admin_id.as_uuid())
        .bind(admin.admin_name.as_str())
        .bind(admin.password_hash.as_phc_string())
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::AdminNameTaken,
            other => AuthError::Database(other),
        })?;

        Ok(())
    }

    async fn find_by_name(&self, admin_name: &AdminName) -> AuthResult<Option<AdminCredential>> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT
                admin_id,
                username,
                password_hash,
                created_at,
                updated_at
            FROM admins
            WHERE username = $1
            "#,
        )
        .bind(admin_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_admin()).transpose()
    }

    async fn count(&self) -> AuthResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn update_password(&self, admin: &AdminCredential) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE admins
            SET password_hash = $2, updated_at = $3
            WHERE admin_id = $1
            "#,
        )
        .bind(admin.admin_id.as_uuid())
        .bind(admin.password_hash.as_phc_string())
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::Internal(format!(
                "Admin {} vanished during password update",
                admin.admin_id
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AdminRow {
    admin_id: Uuid,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_admin(self) -> AuthResult<AdminCredential> {
        let admin_name = AdminName::new(&self.username)
            .map_err(|e| AuthError::Internal(format!("Invalid stored username: {}", e)))?;

        Ok(AdminCredential {
            admin_id: AdminId::from_uuid(self.admin_id),
            admin_name,
            password_hash: AdminPassword::from_phc_string(self.password_hash)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
