//! Repository for the `goals` table.

use goalboard_core::goal::{GoalPriority, GoalStatus};
use goalboard_core::listing::order_by_clause;
use goalboard_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::goal::{CreateGoal, Goal, GoalFilter, GoalUpdate, UpdateGoal};
use crate::repositories::push_page;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, user_id, title, description, status, priority, \
                       due_date, created_at, updated_at";

/// Same columns qualified with the `g` alias used in participant joins.
const SELECT_COLUMNS: &str = "g.id, g.category_id, g.user_id, g.title, g.description, \
                              g.status, g.priority, g.due_date, g.created_at, g.updated_at";

/// Visible-goal join: goals whose category's board the user participates in.
const VISIBLE_FROM: &str = "FROM goals g
     JOIN goal_categories c ON c.id = g.category_id
     JOIN board_participants bp ON bp.board_id = c.board_id
     WHERE bp.user_id = ";

/// Provides CRUD operations for goals. Goals are never hard-deleted.
pub struct GoalRepo;

impl GoalRepo {
    /// Insert a goal created by `user_id` in a live category.
    ///
    /// `status` and `priority` are the resolved values (defaults applied by
    /// the caller). The category row is share-locked so a concurrent category
    /// or board deletion cannot miss the new goal; `None` is returned when
    /// the category is gone or deleted.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateGoal,
        status: GoalStatus,
        priority: GoalPriority,
    ) -> Result<Option<Goal>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let category_live = sqlx::query_scalar::<_, bool>(
            "SELECT NOT is_deleted FROM goal_categories WHERE id = $1 FOR SHARE",
        )
        .bind(input.category_id)
        .fetch_optional(&mut *tx)
        .await?
        .unwrap_or(false);
        if !category_live {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO goals (category_id, user_id, title, description, status, priority, due_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let goal = sqlx::query_as::<_, Goal>(&query)
            .bind(input.category_id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(status.id())
            .bind(priority.id())
            .bind(input.due_date)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(goal))
    }

    /// List goals visible to the user.
    pub async fn list_visible(
        pool: &PgPool,
        user_id: DbId,
        filter: &GoalFilter,
    ) -> Result<Vec<Goal>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {SELECT_COLUMNS} {VISIBLE_FROM}"));
        push_filters(&mut qb, user_id, filter);
        qb.push(" ORDER BY ")
            .push(order_by_clause(&filter.ordering, "g"));
        push_page(&mut qb, filter.page);
        qb.build_query_as::<Goal>().fetch_all(pool).await
    }

    /// Count goals visible to the user, ignoring pagination.
    pub async fn count_visible(
        pool: &PgPool,
        user_id: DbId,
        filter: &GoalFilter,
    ) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) {VISIBLE_FROM}"));
        push_filters(&mut qb, user_id, filter);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Find a goal visible to the user.
    pub async fn find_visible(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!("SELECT {SELECT_COLUMNS} {VISIBLE_FROM}$2 AND g.id = $1");
        sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a goal by ID regardless of visibility.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Goal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM goals WHERE id = $1");
        sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a goal. Only non-`None` fields in `input` are applied; status
    /// and priority must already be validated by the caller.
    ///
    /// The goal's current category is share-locked for the whole update, so
    /// a category or board cascade either runs first (and the update is
    /// refused) or waits and archives the updated goal. A goal in a deleted
    /// category is read-only. When `input.category_id` is set, the target
    /// category is share-locked the same way.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGoal,
    ) -> Result<GoalUpdate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current_live = sqlx::query_scalar::<_, bool>(
            "SELECT NOT is_deleted FROM goal_categories
             WHERE id = (SELECT category_id FROM goals WHERE id = $1)
             FOR SHARE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        match current_live {
            None => return Ok(GoalUpdate::NotFound),
            Some(false) => return Ok(GoalUpdate::CategoryDeleted),
            Some(true) => {}
        }

        if let Some(category_id) = input.category_id {
            let target_live = sqlx::query_scalar::<_, bool>(
                "SELECT NOT is_deleted FROM goal_categories WHERE id = $1 FOR SHARE",
            )
            .bind(category_id)
            .fetch_optional(&mut *tx)
            .await?
            .unwrap_or(false);
            if !target_live {
                return Ok(GoalUpdate::TargetUnavailable(category_id));
            }
        }

        let query = format!(
            "UPDATE goals SET
                category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                status = COALESCE($6, status),
                priority = COALESCE($7, priority),
                due_date = CASE WHEN $8 THEN $9 ELSE due_date END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let goal = sqlx::query_as::<_, Goal>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(input.status)
            .bind(input.priority)
            .bind(input.due_date.is_some())
            .bind(input.due_date.flatten())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(goal.map_or(GoalUpdate::NotFound, GoalUpdate::Updated))
    }

    /// Archive a goal (the goal-level soft delete; no cascade).
    ///
    /// Returns `true` if the goal exists. Archiving an already archived goal
    /// is a no-op that still reports `true`.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE goals SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(GoalStatus::Archived.id())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Append the user binding and optional filters shared by list and count.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, user_id: DbId, filter: &GoalFilter) {
    qb.push_bind(user_id);
    if !filter.category_ids.is_empty() {
        qb.push(" AND g.category_id = ANY(")
            .push_bind(filter.category_ids.clone())
            .push(")");
    }
    if !filter.statuses.is_empty() {
        qb.push(" AND g.status = ANY(")
            .push_bind(filter.statuses.clone())
            .push(")");
    }
    if !filter.priorities.is_empty() {
        qb.push(" AND g.priority = ANY(")
            .push_bind(filter.priorities.clone())
            .push(")");
    }
    if let Some(gte) = filter.due_date_gte {
        qb.push(" AND g.due_date >= ").push_bind(gte);
    }
    if let Some(lte) = filter.due_date_lte {
        qb.push(" AND g.due_date <= ").push_bind(lte);
    }
    if let Some(pattern) = &filter.search_pattern {
        qb.push(" AND (g.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR g.description ILIKE ")
            .push_bind(pattern.clone())
            .push(")");
    }
}
