//! Integration tests for draft list ordering.
//!
//! Exercises `ListEntryRepo` and `ChartRepo` against a real database:
//! - Adding tracks appends at `max(position) + 1`
//! - Reorder and move rewrite every position to `1..=N`
//! - Rejected reorders leave positions unchanged
//! - Deleting a draft closes the gap
//! - Null positions sort last and are healed by the next write
//! - Purge removes entries by age and renumbers survivors

use assert_matches::assert_matches;
use chartdesk_core::category::Category;
use chartdesk_core::commands::{ChartScope, MoveCommand, ReorderCommand};
use chartdesk_core::error::CoreError;
use chartdesk_db::models::user::CreateUser;
use chartdesk_db::repositories::{ChartRepo, ListEntryRepo, UserRepo};
use chartdesk_db::DbError;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, name: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn commercial(user_id: i64) -> ChartScope {
    ChartScope {
        user_id,
        category: Category::Commercial,
    }
}

/// Add tracks in order and return their entry ids.
async fn add_tracks(pool: &PgPool, scope: ChartScope, titles: &[&str]) -> Vec<i64> {
    let mut ids = Vec::new();
    for title in titles {
        let entry = ListEntryRepo::add_track(pool, scope, title).await.unwrap();
        ids.push(entry.id);
    }
    ids
}

/// Draft ids and positions in list order.
async fn drafts(pool: &PgPool, scope: ChartScope) -> Vec<(i64, Option<i32>)> {
    ChartRepo::draft_list(pool, scope, 20)
        .await
        .unwrap()
        .entries
        .iter()
        .map(|e| (e.id, e.position))
        .collect()
}

fn ranked(ids: &[i64]) -> Vec<(i64, Option<i32>)> {
    ids.iter()
        .enumerate()
        .map(|(i, &id)| (id, Some(i as i32 + 1)))
        .collect()
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_track_appends_at_end(pool: PgPool) {
    let scope = commercial(seed_user(&pool, "Ana").await);
    let ids = add_tracks(&pool, scope, &["One", "Two", "Three"]).await;

    assert_eq!(drafts(&pool, scope).await, ranked(&ids));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_same_track_twice_conflicts(pool: PgPool) {
    let scope = commercial(seed_user(&pool, "Ana").await);
    add_tracks(&pool, scope, &["One"]).await;

    let result = ListEntryRepo::add_track(&pool, scope, "  one ").await;
    assert_matches!(result, Err(DbError::Core(CoreError::Conflict(_))));
    assert_eq!(drafts(&pool, scope).await.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_track_for_unknown_user_is_not_found(pool: PgPool) {
    let result = ListEntryRepo::add_track(&pool, commercial(999_999), "One").await;
    assert_matches!(
        result,
        Err(DbError::Core(CoreError::NotFound { entity: "User", .. }))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_existing_track_from_other_category_is_rejected(pool: PgPool) {
    let user_id = seed_user(&pool, "Ana").await;
    let upfront = ChartScope {
        user_id,
        category: Category::Upfront,
    };
    let entry = ListEntryRepo::add_track(&pool, upfront, "Promo Only")
        .await
        .unwrap();

    let result = ListEntryRepo::add_existing_track(&pool, commercial(user_id), entry.track_id).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_two_users_share_a_catalog_track(pool: PgPool) {
    let ana = commercial(seed_user(&pool, "Ana").await);
    let ben = commercial(seed_user(&pool, "Ben").await);

    let first = ListEntryRepo::add_track(&pool, ana, "Shared Tune").await.unwrap();
    let second = ListEntryRepo::add_existing_track(&pool, ben, first.track_id)
        .await
        .unwrap();

    assert_eq!(first.track_id, second.track_id);
    assert_eq!(second.position, Some(1));
}

// ---------------------------------------------------------------------------
// Reorder / move
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_rewrites_all_positions(pool: PgPool) {
    let scope = commercial(seed_user(&pool, "Ana").await);
    let ids = add_tracks(&pool, scope, &["A", "B", "C", "D"]).await;
    let new_order = vec![ids[2], ids[0], ids[3], ids[1]];

    ChartRepo::reorder(
        &pool,
        scope,
        &ReorderCommand {
            entry_ids: new_order.clone(),
        },
    )
    .await
    .unwrap();

    assert_eq!(drafts(&pool, scope).await, ranked(&new_order));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_with_missing_entry_changes_nothing(pool: PgPool) {
    let scope = commercial(seed_user(&pool, "Ana").await);
    let ids = add_tracks(&pool, scope, &["A", "B", "C"]).await;

    let result = ChartRepo::reorder(
        &pool,
        scope,
        &ReorderCommand {
            entry_ids: vec![ids[1], ids[0]],
        },
    )
    .await;

    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
    assert_eq!(drafts(&pool, scope).await, ranked(&ids));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reorder_with_foreign_entry_is_not_found(pool: PgPool) {
    let ana = commercial(seed_user(&pool, "Ana").await);
    let ben = commercial(seed_user(&pool, "Ben").await);
    let ana_ids = add_tracks(&pool, ana, &["A"]).await;
    let ben_ids = add_tracks(&pool, ben, &["B"]).await;

    let result = ChartRepo::reorder(
        &pool,
        ana,
        &ReorderCommand {
            entry_ids: vec![ben_ids[0]],
        },
    )
    .await;

    assert_matches!(result, Err(DbError::Core(CoreError::NotFound { .. })));
    assert_eq!(drafts(&pool, ana).await, ranked(&ana_ids));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_last_to_first(pool: PgPool) {
    let scope = commercial(seed_user(&pool, "Ana").await);
    let ids = add_tracks(&pool, scope, &["T1", "T2", "T3"]).await;

    let plan = ChartRepo::move_entry(
        &pool,
        scope,
        MoveCommand {
            source_index: 2,
            target_index: 0,
        },
    )
    .await
    .unwrap();

    assert_eq!(plan.len(), 3);
    assert_eq!(drafts(&pool, scope).await, ranked(&[ids[2], ids[0], ids[1]]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_out_of_range_is_rejected(pool: PgPool) {
    let scope = commercial(seed_user(&pool, "Ana").await);
    let ids = add_tracks(&pool, scope, &["T1", "T2"]).await;

    let result = ChartRepo::move_entry(
        &pool,
        scope,
        MoveCommand {
            source_index: 0,
            target_index: 5,
        },
    )
    .await;

    assert_matches!(result, Err(DbError::Core(CoreError::Validation(_))));
    assert_eq!(drafts(&pool, scope).await, ranked(&ids));
}

// ---------------------------------------------------------------------------
// Delete / healing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_draft_closes_gap(pool: PgPool) {
    let scope = commercial(seed_user(&pool, "Ana").await);
    let ids = add_tracks(&pool, scope, &["A", "B", "C"]).await;

    ListEntryRepo::delete_draft(&pool, scope.user_id, ids[1])
        .await
        .unwrap();

    assert_eq!(drafts(&pool, scope).await, ranked(&[ids[0], ids[2]]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_other_users_entry_is_forbidden(pool: PgPool) {
    let ana = commercial(seed_user(&pool, "Ana").await);
    let ben = seed_user(&pool, "Ben").await;
    let ids = add_tracks(&pool, ana, &["A"]).await;

    let result = ListEntryRepo::delete_draft(&pool, ben, ids[0]).await;
    assert_matches!(result, Err(DbError::Core(CoreError::Forbidden(_))));
    assert_eq!(drafts(&pool, ana).await, ranked(&ids));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_null_positions_sort_last_and_heal_on_write(pool: PgPool) {
    let scope = commercial(seed_user(&pool, "Ana").await);
    let ids = add_tracks(&pool, scope, &["A", "B", "C"]).await;

    sqlx::query("UPDATE list_entries SET position = NULL WHERE id = $1")
        .bind(ids[0])
        .execute(&pool)
        .await
        .unwrap();

    let listed = drafts(&pool, scope).await;
    assert_eq!(
        listed,
        vec![(ids[1], Some(2)), (ids[2], Some(3)), (ids[0], None)]
    );

    ChartRepo::move_entry(
        &pool,
        scope,
        MoveCommand {
            source_index: 0,
            target_index: 0,
        },
    )
    .await
    .unwrap();

    assert_eq!(drafts(&pool, scope).await, ranked(&[ids[1], ids[2], ids[0]]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_twice_is_stable(pool: PgPool) {
    let scope = commercial(seed_user(&pool, "Ana").await);
    add_tracks(&pool, scope, &["A", "B", "C"]).await;

    let first = drafts(&pool, scope).await;
    let second = drafts(&pool, scope).await;
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Purge
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purge_all_empties_category(pool: PgPool) {
    let user_id = seed_user(&pool, "Ana").await;
    let scope = commercial(user_id);
    let upfront = ChartScope {
        user_id,
        category: Category::Upfront,
    };
    add_tracks(&pool, scope, &["A", "B"]).await;
    let kept = add_tracks(&pool, upfront, &["U"]).await;

    let deleted = ListEntryRepo::purge(&pool, Category::Commercial, None)
        .await
        .unwrap();

    assert_eq!(deleted, 2);
    assert!(drafts(&pool, scope).await.is_empty());
    assert_eq!(drafts(&pool, upfront).await, ranked(&kept));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purge_by_age_renumbers_survivors(pool: PgPool) {
    let scope = commercial(seed_user(&pool, "Ana").await);
    let ids = add_tracks(&pool, scope, &["Old", "New", "Older"]).await;

    sqlx::query("UPDATE list_entries SET created_at = now() - interval '60 days' WHERE id = ANY($1)")
        .bind(vec![ids[0], ids[2]])
        .execute(&pool)
        .await
        .unwrap();

    let cutoff = chrono::Utc::now() - chrono::Duration::days(7);
    let deleted = ListEntryRepo::purge(&pool, Category::Commercial, Some(cutoff))
        .await
        .unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(drafts(&pool, scope).await, ranked(&[ids[0], ids[2]]));
}
