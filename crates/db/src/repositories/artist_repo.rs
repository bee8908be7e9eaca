//! Repository for the `artists` catalog.

use chartdesk_core::catalog::{like_pattern, SEARCH_RESULT_LIMIT};
use chartdesk_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::artist::Artist;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for artists.
pub struct ArtistRepo;

impl ArtistRepo {
    /// Insert a new artist. `name` must already be normalized.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Artist, sqlx::Error> {
        let query = format!("INSERT INTO artists (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Artist>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find an artist by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Artist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artists WHERE id = $1");
        sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List artists whose name contains `search`, ordered by name.
    pub async fn list(pool: &PgPool, search: &str) -> Result<Vec<Artist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artists WHERE name ILIKE $1 ORDER BY name, id LIMIT $2"
        );
        sqlx::query_as::<_, Artist>(&query)
            .bind(like_pattern(search))
            .bind(SEARCH_RESULT_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Rename an artist. Returns `None` if no row with the given `id` exists.
    pub async fn rename(pool: &PgPool, id: DbId, name: &str) -> Result<Option<Artist>, sqlx::Error> {
        let query = format!(
            "UPDATE artists SET name = $2, updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub(crate) async fn exists(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM artists WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await
    }
}
