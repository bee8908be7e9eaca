//! Repository for the `list_entries` table.
//!
//! Reads return entries joined with their track title, artist name and
//! mixes. Writes that can shift positions (add, delete, purge) lock the
//! owning user and leave the draft list numbered `1..=N`.

use std::collections::{HashMap, HashSet};

use chartdesk_core::catalog::{like_pattern, normalize_title};
use chartdesk_core::category::Category;
use chartdesk_core::commands::{ChartScope, EntryUpdate};
use chartdesk_core::completeness::is_complete;
use chartdesk_core::error::CoreError;
use chartdesk_core::reorder::ENTITY_LIST_ENTRY;
use chartdesk_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::error::DbResult;
use crate::models::list_entry::{AdminEntry, EntryMixRow, ListEntry, ListEntryDetail};
use crate::models::mix::MixSummary;
use crate::repositories::chart_repo::{renumber_category_drafts, renumber_drafts};
use crate::repositories::{ArtistRepo, MixRepo, TrackRepo, UserRepo};

/// Column list for bare `list_entries` rows.
const COLUMNS: &str = "id, user_id, track_id, category, position, status, order_index, \
                       is_export, artist_id, label, created_at, updated_at";

/// Column list for [`ListEntryDetail`] (aliases `e`, `t`, `a`).
const DETAIL_COLUMNS: &str = "e.id, e.user_id, e.track_id, e.category, e.position, e.status, \
                              e.order_index, e.is_export, e.artist_id, e.label, e.created_at, \
                              e.updated_at, t.title, a.name AS artist_name";

/// Joins shared by every detail query.
const DETAIL_FROM: &str = "FROM list_entries e \
                           JOIN tracks t ON t.id = e.track_id \
                           LEFT JOIN artists a ON a.id = e.artist_id";

/// Draft ordering. Null positions sort last, in creation order.
pub(crate) const DRAFT_ORDER: &str = "position ASC NULLS LAST, created_at, id";

/// Provides reads and single-entry writes for list entries.
pub struct ListEntryRepo;

impl ListEntryRepo {
    /// Find a bare entry row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ListEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM list_entries WHERE id = $1");
        sqlx::query_as::<_, ListEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an entry with its track, artist and mixes.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ListEntryDetail>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_FROM} WHERE e.id = $1");
        let entry = sqlx::query_as::<_, ListEntryDetail>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        match entry {
            Some(entry) => {
                let mut entries = [entry];
                attach_mixes(&mut conn, &mut entries).await?;
                let [entry] = entries;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    /// Add a track by title, creating the catalog entry if needed.
    ///
    /// The new entry is appended after the last draft.
    pub async fn add_track(
        pool: &PgPool,
        scope: ChartScope,
        title: &str,
    ) -> DbResult<ListEntryDetail> {
        let title = normalize_title(title)?;

        let mut tx = pool.begin().await?;
        UserRepo::lock(&mut tx, scope.user_id).await?;
        let track = TrackRepo::find_or_create(&mut tx, scope.category, &title).await?;
        let id = insert_draft(&mut tx, scope, track.id, &track.title).await?;
        tx.commit().await?;

        tracing::info!(
            user_id = scope.user_id,
            category = %scope.category,
            entry_id = id,
            track_id = track.id,
            "Track added to draft list",
        );
        Self::require_detail(pool, id).await
    }

    /// Add an entry for an existing catalog track.
    pub async fn add_existing_track(
        pool: &PgPool,
        scope: ChartScope,
        track_id: DbId,
    ) -> DbResult<ListEntryDetail> {
        let mut tx = pool.begin().await?;
        UserRepo::lock(&mut tx, scope.user_id).await?;

        let track = TrackRepo::find_by_id_in(&mut tx, track_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Track",
                id: track_id,
            })?;
        if track.category != scope.category.as_str() {
            return Err(CoreError::Validation(format!(
                "Track {track_id} belongs to the {} chart, not {}",
                track.category, scope.category
            ))
            .into());
        }

        let id = insert_draft(&mut tx, scope, track.id, &track.title).await?;
        tx.commit().await?;

        tracing::info!(
            user_id = scope.user_id,
            category = %scope.category,
            entry_id = id,
            track_id,
            "Existing track added to draft list",
        );
        Self::require_detail(pool, id).await
    }

    /// Apply a validated field update to one of the user's draft entries.
    pub async fn update_fields(
        pool: &PgPool,
        user_id: DbId,
        entry_id: DbId,
        update: &EntryUpdate,
    ) -> DbResult<ListEntryDetail> {
        let mut tx = pool.begin().await?;
        let entry = lock_owned_draft(&mut tx, user_id, entry_id, "edited").await?;

        // Tracks are shared; a new title re-points this entry only.
        if let Some(title) = &update.title {
            let category: Category = entry.category.parse()?;
            let track = TrackRepo::find_or_create(&mut tx, category, title).await?;
            if track.id != entry.track_id {
                let scope = ChartScope { user_id, category };
                ensure_not_listed(&mut tx, scope, track.id, &track.title).await?;
                sqlx::query(
                    "UPDATE list_entries SET track_id = $2, updated_at = now() WHERE id = $1",
                )
                .bind(entry_id)
                .bind(track.id)
                .execute(&mut *tx)
                .await?;
            }
        }

        if let Some(artist_id) = update.artist_id {
            if !ArtistRepo::exists(&mut tx, artist_id).await? {
                return Err(CoreError::NotFound {
                    entity: "Artist",
                    id: artist_id,
                }
                .into());
            }
        }

        if update.artist_id.is_some() || update.label.is_some() {
            let (set_label, label) = match &update.label {
                Some(label) => (true, label.clone()),
                None => (false, None),
            };
            sqlx::query(
                "UPDATE list_entries SET \
                    artist_id = COALESCE($2, artist_id), \
                    label = CASE WHEN $3 THEN $4 ELSE label END, \
                    updated_at = now() \
                 WHERE id = $1",
            )
            .bind(entry_id)
            .bind(update.artist_id)
            .bind(set_label)
            .bind(label)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(mix_ids) = &update.mix_ids {
            replace_mixes(&mut tx, entry_id, mix_ids).await?;
        }

        tx.commit().await?;

        tracing::info!(user_id, entry_id, "List entry updated");
        Self::require_detail(pool, entry_id).await
    }

    /// Delete one of the user's draft entries and close the gap it leaves.
    pub async fn delete_draft(pool: &PgPool, user_id: DbId, entry_id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;
        UserRepo::lock(&mut tx, user_id).await?;
        let entry = lock_owned_draft(&mut tx, user_id, entry_id, "deleted").await?;

        sqlx::query("DELETE FROM list_entries WHERE id = $1")
            .bind(entry_id)
            .execute(&mut *tx)
            .await?;

        let category: Category = entry.category.parse()?;
        renumber_drafts(&mut tx, ChartScope { user_id, category }).await?;
        tx.commit().await?;

        tracing::info!(user_id, entry_id, category = %category, "Draft entry deleted");
        Ok(())
    }

    /// Submitted, not yet exported entries across all users.
    ///
    /// Ordered by user name, then submission order. `user_search` filters
    /// by a case-insensitive substring of the user name.
    pub async fn list_submitted(
        pool: &PgPool,
        category: Category,
        user_search: &str,
    ) -> Result<Vec<AdminEntry>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let query = format!(
            "SELECT {DETAIL_COLUMNS}, u.name AS user_name, u.email AS user_email \
             {DETAIL_FROM} JOIN users u ON u.id = e.user_id \
             WHERE e.category = $1 AND e.status = true AND e.is_export = false \
               AND u.name ILIKE $2 \
             ORDER BY u.name, e.order_index, e.id"
        );
        let mut entries = sqlx::query_as::<_, AdminEntry>(&query)
            .bind(category.as_str())
            .bind(like_pattern(user_search))
            .fetch_all(&mut *conn)
            .await?;
        attach_admin_mixes(&mut conn, &mut entries).await?;
        Ok(entries)
    }

    /// Mark submitted entries as exported, returning the updated rows.
    ///
    /// Fails without changes if any id is not a submitted entry of
    /// `category`.
    pub async fn mark_exported(
        pool: &PgPool,
        category: Category,
        entry_ids: &[DbId],
    ) -> DbResult<Vec<AdminEntry>> {
        let mut tx = pool.begin().await?;

        let updated: Vec<DbId> = sqlx::query_scalar(
            "UPDATE list_entries SET is_export = true, updated_at = now() \
             WHERE id = ANY($1) AND category = $2 AND status = true \
             RETURNING id",
        )
        .bind(entry_ids)
        .bind(category.as_str())
        .fetch_all(&mut *tx)
        .await?;

        let updated_set: HashSet<DbId> = updated.iter().copied().collect();
        if let Some(&missing) = entry_ids.iter().find(|id| !updated_set.contains(id)) {
            return Err(CoreError::NotFound {
                entity: ENTITY_LIST_ENTRY,
                id: missing,
            }
            .into());
        }

        let query = format!(
            "SELECT {DETAIL_COLUMNS}, u.name AS user_name, u.email AS user_email \
             {DETAIL_FROM} JOIN users u ON u.id = e.user_id \
             WHERE e.id = ANY($1) \
             ORDER BY u.name, e.order_index, e.id"
        );
        let mut entries = sqlx::query_as::<_, AdminEntry>(&query)
            .bind(&updated)
            .fetch_all(&mut *tx)
            .await?;
        attach_admin_mixes(&mut tx, &mut entries).await?;
        tx.commit().await?;

        tracing::info!(category = %category, count = entries.len(), "Entries marked exported");
        Ok(entries)
    }

    /// Delete every entry of `category` created at or after `cutoff`
    /// (everything when `None`), then renumber the surviving drafts.
    pub async fn purge(
        pool: &PgPool,
        category: Category,
        cutoff: Option<Timestamp>,
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "DELETE FROM list_entries \
             WHERE category = $1 AND ($2::TIMESTAMPTZ IS NULL OR created_at >= $2)",
        )
        .bind(category.as_str())
        .bind(cutoff)
        .execute(&mut *tx)
        .await?;

        renumber_category_drafts(&mut tx, category).await?;
        tx.commit().await?;

        tracing::info!(
            category = %category,
            cutoff = ?cutoff,
            deleted = result.rows_affected(),
            "Entries purged",
        );
        Ok(result.rows_affected())
    }

    async fn require_detail(pool: &PgPool, id: DbId) -> DbResult<ListEntryDetail> {
        Self::find_detail(pool, id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: ENTITY_LIST_ENTRY,
                id,
            }
            .into()
        })
    }
}

// ---------------------------------------------------------------------------
// Connection-level helpers shared with `ChartRepo`
// ---------------------------------------------------------------------------

/// Draft entries of a scope with mixes and completeness filled in.
pub(crate) async fn fetch_drafts(
    conn: &mut PgConnection,
    scope: ChartScope,
) -> Result<Vec<ListEntryDetail>, sqlx::Error> {
    let query = format!(
        "SELECT {DETAIL_COLUMNS} {DETAIL_FROM} \
         WHERE e.user_id = $1 AND e.category = $2 AND e.status = false \
         ORDER BY e.position ASC NULLS LAST, e.created_at, e.id"
    );
    let mut entries = sqlx::query_as::<_, ListEntryDetail>(&query)
        .bind(scope.user_id)
        .bind(scope.category.as_str())
        .fetch_all(&mut *conn)
        .await?;
    attach_mixes(conn, &mut entries).await?;
    Ok(entries)
}

/// Load mixes for `entries` and recompute `is_complete`.
async fn attach_mixes(
    conn: &mut PgConnection,
    entries: &mut [ListEntryDetail],
) -> Result<(), sqlx::Error> {
    if entries.is_empty() {
        return Ok(());
    }
    let ids: Vec<DbId> = entries.iter().map(|e| e.id).collect();
    let rows = sqlx::query_as::<_, EntryMixRow>(
        "SELECT lm.list_entry_id, m.id, m.title \
         FROM list_entry_mixes lm JOIN mixes m ON m.id = lm.mix_id \
         WHERE lm.list_entry_id = ANY($1) \
         ORDER BY lm.list_entry_id, lm.sort_order, m.id",
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut by_entry: HashMap<DbId, Vec<MixSummary>> = HashMap::new();
    for row in rows {
        by_entry.entry(row.list_entry_id).or_default().push(MixSummary {
            id: row.id,
            title: row.title,
        });
    }

    for entry in entries.iter_mut() {
        entry.mixes = by_entry.remove(&entry.id).unwrap_or_default();
        entry.is_complete = is_complete(&*entry);
    }
    Ok(())
}

async fn attach_admin_mixes(
    conn: &mut PgConnection,
    entries: &mut [AdminEntry],
) -> Result<(), sqlx::Error> {
    let mut details: Vec<ListEntryDetail> = entries.iter().map(|e| e.entry.clone()).collect();
    attach_mixes(conn, &mut details).await?;
    for (entry, detail) in entries.iter_mut().zip(details) {
        entry.entry = detail;
    }
    Ok(())
}

/// Insert a draft entry at the end of the scope's list.
///
/// The caller must hold the owner lock.
async fn insert_draft(
    conn: &mut PgConnection,
    scope: ChartScope,
    track_id: DbId,
    title: &str,
) -> DbResult<DbId> {
    ensure_not_listed(conn, scope, track_id, title).await?;

    let id = sqlx::query_scalar(
        "INSERT INTO list_entries (user_id, track_id, category, position) \
         VALUES ($1, $2, $3, ( \
             SELECT COALESCE(MAX(position), 0) + 1 FROM list_entries \
             WHERE user_id = $1 AND category = $3 AND status = false)) \
         RETURNING id",
    )
    .bind(scope.user_id)
    .bind(track_id)
    .bind(scope.category.as_str())
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

/// `Conflict` if the user already has an entry for `track_id`.
async fn ensure_not_listed(
    conn: &mut PgConnection,
    scope: ChartScope,
    track_id: DbId,
    title: &str,
) -> DbResult<()> {
    let already_listed: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM list_entries WHERE user_id = $1 AND track_id = $2)",
    )
    .bind(scope.user_id)
    .bind(track_id)
    .fetch_one(&mut *conn)
    .await?;
    if already_listed {
        return Err(CoreError::Conflict(format!(
            "'{title}' is already in your {} chart",
            scope.category
        ))
        .into());
    }
    Ok(())
}

/// Lock an entry row and check it is a draft owned by `user_id`.
async fn lock_owned_draft(
    conn: &mut PgConnection,
    user_id: DbId,
    entry_id: DbId,
    action: &str,
) -> DbResult<ListEntry> {
    let query = format!("SELECT {COLUMNS} FROM list_entries WHERE id = $1 FOR UPDATE");
    let entry = sqlx::query_as::<_, ListEntry>(&query)
        .bind(entry_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(CoreError::NotFound {
            entity: ENTITY_LIST_ENTRY,
            id: entry_id,
        })?;

    if entry.user_id != user_id {
        return Err(CoreError::Forbidden("Entry belongs to another user".into()).into());
    }
    if entry.status {
        return Err(CoreError::Conflict(format!(
            "Submitted entries cannot be {action}; import them back into the draft list first"
        ))
        .into());
    }
    Ok(entry)
}

/// Replace an entry's mix links, keeping the given order.
async fn replace_mixes(conn: &mut PgConnection, entry_id: DbId, mix_ids: &[DbId]) -> DbResult<()> {
    let existing: HashSet<DbId> = MixRepo::existing_ids(conn, mix_ids)
        .await?
        .into_iter()
        .collect();
    if let Some(&missing) = mix_ids.iter().find(|id| !existing.contains(id)) {
        return Err(CoreError::NotFound {
            entity: "Mix",
            id: missing,
        }
        .into());
    }

    sqlx::query("DELETE FROM list_entry_mixes WHERE list_entry_id = $1")
        .bind(entry_id)
        .execute(&mut *conn)
        .await?;

    let sort_orders: Vec<i32> = (0..mix_ids.len() as i32).collect();
    sqlx::query(
        "INSERT INTO list_entry_mixes (list_entry_id, mix_id, sort_order) \
         SELECT $1, m.mix_id, m.sort_order \
         FROM UNNEST($2::BIGINT[], $3::INTEGER[]) AS m(mix_id, sort_order)",
    )
    .bind(entry_id)
    .bind(mix_ids)
    .bind(&sort_orders)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
