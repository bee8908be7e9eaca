//! Repository for the `mixes` catalog.

use chartdesk_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::mix::Mix;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, created_at, updated_at";

/// Provides CRUD operations for mixes.
pub struct MixRepo;

impl MixRepo {
    /// Insert a new mix. `title` must already be normalized.
    pub async fn create(pool: &PgPool, title: &str) -> Result<Mix, sqlx::Error> {
        let query = format!("INSERT INTO mixes (title) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Mix>(&query)
            .bind(title)
            .fetch_one(pool)
            .await
    }

    /// Find a mix by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Mix>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mixes WHERE id = $1");
        sqlx::query_as::<_, Mix>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all mixes, ordered by title.
    pub async fn list(pool: &PgPool) -> Result<Vec<Mix>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM mixes ORDER BY title, id");
        sqlx::query_as::<_, Mix>(&query).fetch_all(pool).await
    }

    /// Rename a mix. Returns `None` if no row with the given `id` exists.
    pub async fn rename(pool: &PgPool, id: DbId, title: &str) -> Result<Option<Mix>, sqlx::Error> {
        let query = format!(
            "UPDATE mixes SET title = $2, updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Mix>(&query)
            .bind(id)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// The subset of `ids` that exist, in no particular order.
    pub(crate) async fn existing_ids(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM mixes WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&mut *conn)
            .await
    }
}
