//! Repository for the `tracks` catalog.

use chartdesk_core::catalog::{has_exact_match, like_pattern, SEARCH_RESULT_LIMIT};
use chartdesk_core::category::Category;
use chartdesk_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::track::{Track, TrackSearch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, category, created_at, updated_at";

/// Provides catalog lookups and search-or-create for tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// Find a track by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Track>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::find_by_id_in(&mut conn, id).await
    }

    pub(crate) async fn find_by_id_in(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Case-insensitive substring search within a category.
    ///
    /// An exact match, if any, is always listed first so `has_exact_match`
    /// holds even when the result list is truncated.
    pub async fn search(
        pool: &PgPool,
        category: Category,
        query_text: &str,
    ) -> Result<TrackSearch, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tracks \
             WHERE category = $1 AND title ILIKE $2 \
             ORDER BY (lower(title) = lower($3)) DESC, title, id \
             LIMIT $4"
        );
        let results = sqlx::query_as::<_, Track>(&query)
            .bind(category.as_str())
            .bind(like_pattern(query_text))
            .bind(query_text.trim())
            .bind(SEARCH_RESULT_LIMIT)
            .fetch_all(pool)
            .await?;

        let has_exact_match = has_exact_match(results.iter().map(|t| t.title.as_str()), query_text);
        Ok(TrackSearch {
            results,
            has_exact_match,
        })
    }

    /// Find the track whose title equals `title` case-insensitively.
    pub(crate) async fn find_exact(
        conn: &mut PgConnection,
        category: Category,
        title: &str,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tracks WHERE category = $1 AND lower(title) = lower($2)"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(category.as_str())
            .bind(title)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Return the existing track with this title, or create it.
    ///
    /// `title` must already be normalized.
    pub(crate) async fn find_or_create(
        conn: &mut PgConnection,
        category: Category,
        title: &str,
    ) -> Result<Track, sqlx::Error> {
        if let Some(track) = Self::find_exact(conn, category, title).await? {
            return Ok(track);
        }

        let query = format!(
            "INSERT INTO tracks (title, category) VALUES ($1, $2) \
             ON CONFLICT (category, lower(title)) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Track>(&query)
            .bind(title)
            .bind(category.as_str())
            .fetch_optional(&mut *conn)
            .await?;

        match inserted {
            Some(track) => {
                tracing::debug!(track_id = track.id, category = %category, "Catalog track created");
                Ok(track)
            }
            // Lost a race with a concurrent insert of the same title.
            None => Self::find_exact(conn, category, title)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }
}
