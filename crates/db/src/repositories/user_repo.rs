//! Repository for the `users` table.

use chartdesk_core::error::CoreError;
use chartdesk_core::roles::ROLE_USER;
use chartdesk_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::DbResult;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, role, created_at, updated_at";

/// Provides lookups for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, role) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.role.as_deref().unwrap_or(ROLE_USER))
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lock a user's row for the rest of the transaction.
    ///
    /// Every multi-row write to a user's chart takes this lock first, so
    /// concurrent sessions of the same user are serialized.
    pub(crate) async fn lock(conn: &mut PgConnection, id: DbId) -> DbResult<()> {
        let locked: Option<DbId> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        match locked {
            Some(_) => Ok(()),
            None => Err(CoreError::NotFound { entity: "User", id }.into()),
        }
    }
}
