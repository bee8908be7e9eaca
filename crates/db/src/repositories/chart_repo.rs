//! Multi-row chart transactions: reorder, move, submit and import.
//!
//! Each operation locks the owning user row, reads the current state,
//! plans the writes with `chartdesk_core`, applies the plan and commits.
//! A failed plan or a short write drops the transaction unapplied.

use chartdesk_core::category::Category;
use chartdesk_core::commands::{
    ChartScope, ImportCommand, MoveCommand, ReorderCommand, SubmitCommand,
};
use chartdesk_core::completeness::all_complete;
use chartdesk_core::error::CoreError;
use chartdesk_core::promotion::{
    next_order_index, plan_import, plan_submit, ImportPlan, OrderAssignment, SubmitCandidate,
    SubmitPlan,
};
use chartdesk_core::reorder::{plan_move, plan_reorder, resequence, PositionAssignment};
use chartdesk_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::DbResult;
use crate::models::list_entry::DraftList;
use crate::repositories::list_entry_repo::{fetch_drafts, DRAFT_ORDER};
use crate::repositories::UserRepo;

/// Provides the chart-wide state transitions.
pub struct ChartRepo;

impl ChartRepo {
    /// The draft list plus whether it can be submitted at `capacity`.
    pub async fn draft_list(
        pool: &PgPool,
        scope: ChartScope,
        capacity: usize,
    ) -> Result<DraftList, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        let entries = fetch_drafts(&mut conn, scope).await?;
        let can_submit = entries.len() >= capacity && all_complete(&entries, capacity);
        Ok(DraftList {
            entries,
            capacity,
            can_submit,
        })
    }

    /// Replace the draft order with `cmd.entry_ids`.
    pub async fn reorder(
        pool: &PgPool,
        scope: ChartScope,
        cmd: &ReorderCommand,
    ) -> DbResult<Vec<PositionAssignment>> {
        let mut tx = pool.begin().await?;
        UserRepo::lock(&mut tx, scope.user_id).await?;

        let current = draft_ids(&mut tx, scope).await?;
        let plan = plan_reorder(&current, &cmd.entry_ids)?;
        apply_positions(&mut tx, &plan).await?;
        tx.commit().await?;

        tracing::info!(
            user_id = scope.user_id,
            category = %scope.category,
            count = plan.len(),
            "Draft list reordered",
        );
        Ok(plan)
    }

    /// Drag one draft entry to a new index.
    pub async fn move_entry(
        pool: &PgPool,
        scope: ChartScope,
        cmd: MoveCommand,
    ) -> DbResult<Vec<PositionAssignment>> {
        let mut tx = pool.begin().await?;
        UserRepo::lock(&mut tx, scope.user_id).await?;

        let current = draft_ids(&mut tx, scope).await?;
        let plan = plan_move(&current, cmd.source_index, cmd.target_index)?;
        apply_positions(&mut tx, &plan).await?;
        tx.commit().await?;

        tracing::info!(
            user_id = scope.user_id,
            category = %scope.category,
            source_index = cmd.source_index,
            target_index = cmd.target_index,
            "Draft entry moved",
        );
        Ok(plan)
    }

    /// Promote the first `cmd.capacity` drafts to submitted.
    pub async fn submit(pool: &PgPool, cmd: SubmitCommand) -> DbResult<SubmitPlan> {
        let scope = cmd.scope;
        let mut tx = pool.begin().await?;
        UserRepo::lock(&mut tx, scope.user_id).await?;

        let drafts = fetch_drafts(&mut tx, scope).await?;
        let candidates: Vec<SubmitCandidate> = drafts
            .iter()
            .map(|entry| SubmitCandidate::from_entry(entry.id, entry))
            .collect();

        let max_order: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(order_index) FROM list_entries WHERE user_id = $1 AND category = $2",
        )
        .bind(scope.user_id)
        .bind(scope.category.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let plan = plan_submit(&candidates, cmd.capacity, next_order_index(max_order))?;
        promote(&mut tx, &plan.submitted).await?;
        apply_positions(&mut tx, &plan.renumbered).await?;
        tx.commit().await?;

        tracing::info!(
            user_id = scope.user_id,
            category = %scope.category,
            submitted = plan.submitted.len(),
            remaining = plan.renumbered.len(),
            "Chart submitted",
        );
        Ok(plan)
    }

    /// Whether the scope has submitted entries to import.
    pub async fn can_import(pool: &PgPool, scope: ChartScope) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM list_entries \
             WHERE user_id = $1 AND category = $2 AND status = true",
        )
        .bind(scope.user_id)
        .bind(scope.category.as_str())
        .fetch_one(pool)
        .await?;
        Ok(chartdesk_core::promotion::can_import(count))
    }

    /// Recall every submitted entry ahead of the current drafts.
    pub async fn import(pool: &PgPool, cmd: ImportCommand) -> DbResult<ImportPlan> {
        let scope = cmd.scope;
        let mut tx = pool.begin().await?;
        UserRepo::lock(&mut tx, scope.user_id).await?;

        let submitted: Vec<DbId> = sqlx::query_scalar(
            "SELECT id FROM list_entries \
             WHERE user_id = $1 AND category = $2 AND status = true \
             ORDER BY order_index ASC NULLS LAST, id",
        )
        .bind(scope.user_id)
        .bind(scope.category.as_str())
        .fetch_all(&mut *tx)
        .await?;
        let drafts = draft_ids(&mut tx, scope).await?;

        let plan = plan_import(&submitted, &drafts)?;
        recall(&mut tx, &submitted).await?;
        apply_positions(&mut tx, &plan.positions).await?;
        tx.commit().await?;

        tracing::info!(
            user_id = scope.user_id,
            category = %scope.category,
            recalled = plan.recalled,
            total = plan.positions.len(),
            "Submitted entries imported",
        );
        Ok(plan)
    }
}

// ---------------------------------------------------------------------------
// Connection-level helpers
// ---------------------------------------------------------------------------

/// Draft entry ids of a scope in list order.
async fn draft_ids(conn: &mut PgConnection, scope: ChartScope) -> Result<Vec<DbId>, sqlx::Error> {
    let query = format!(
        "SELECT id FROM list_entries \
         WHERE user_id = $1 AND category = $2 AND status = false \
         ORDER BY {DRAFT_ORDER}"
    );
    sqlx::query_scalar(&query)
        .bind(scope.user_id)
        .bind(scope.category.as_str())
        .fetch_all(&mut *conn)
        .await
}

/// Write every assignment in one statement.
///
/// Fails if any id is no longer a draft row.
async fn apply_positions(conn: &mut PgConnection, plan: &[PositionAssignment]) -> DbResult<()> {
    if plan.is_empty() {
        return Ok(());
    }
    let ids: Vec<DbId> = plan.iter().map(|a| a.id).collect();
    let positions: Vec<i32> = plan.iter().map(|a| a.position).collect();

    let result = sqlx::query(
        "UPDATE list_entries AS e SET position = v.position, updated_at = now() \
         FROM UNNEST($1::BIGINT[], $2::INTEGER[]) AS v(id, position) \
         WHERE e.id = v.id AND e.status = false",
    )
    .bind(&ids)
    .bind(&positions)
    .execute(&mut *conn)
    .await?;

    check_rows(result.rows_affected(), plan.len())
}

async fn promote(conn: &mut PgConnection, assignments: &[OrderAssignment]) -> DbResult<()> {
    let ids: Vec<DbId> = assignments.iter().map(|a| a.id).collect();
    let order: Vec<i32> = assignments.iter().map(|a| a.order_index).collect();

    let result = sqlx::query(
        "UPDATE list_entries AS e \
         SET status = true, order_index = v.order_index, position = NULL, updated_at = now() \
         FROM UNNEST($1::BIGINT[], $2::INTEGER[]) AS v(id, order_index) \
         WHERE e.id = v.id AND e.status = false",
    )
    .bind(&ids)
    .bind(&order)
    .execute(&mut *conn)
    .await?;

    check_rows(result.rows_affected(), assignments.len())
}

/// Flip submitted entries back to draft. Positions are written afterwards.
async fn recall(conn: &mut PgConnection, ids: &[DbId]) -> DbResult<()> {
    let result = sqlx::query(
        "UPDATE list_entries SET status = false, is_export = false, updated_at = now() \
         WHERE id = ANY($1) AND status = true",
    )
    .bind(ids)
    .execute(&mut *conn)
    .await?;

    check_rows(result.rows_affected(), ids.len())
}

fn check_rows(affected: u64, expected: usize) -> DbResult<()> {
    if affected != expected as u64 {
        return Err(CoreError::Internal(format!(
            "Expected to update {expected} entries, updated {affected}"
        ))
        .into());
    }
    Ok(())
}

/// Renumber a scope's drafts `1..=N`, keeping their current order.
pub(crate) async fn renumber_drafts(conn: &mut PgConnection, scope: ChartScope) -> DbResult<()> {
    let ids = draft_ids(conn, scope).await?;
    apply_positions(conn, &resequence(&ids)).await
}

/// Renumber the drafts of every user in a category.
pub(crate) async fn renumber_category_drafts(
    conn: &mut PgConnection,
    category: Category,
) -> Result<u64, sqlx::Error> {
    let query = format!(
        "UPDATE list_entries AS e SET position = r.new_position, updated_at = now() \
         FROM ( \
             SELECT id, ROW_NUMBER() OVER (PARTITION BY user_id ORDER BY {DRAFT_ORDER})::INTEGER AS new_position \
             FROM list_entries WHERE category = $1 AND status = false \
         ) AS r \
         WHERE e.id = r.id AND e.position IS DISTINCT FROM r.new_position"
    );
    let result = sqlx::query(&query)
        .bind(category.as_str())
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}
