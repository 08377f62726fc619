//! Repository for the `goal_categories` table.

use goalboard_core::goal::GoalStatus;
use goalboard_core::listing::order_by_clause;
use goalboard_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::category::{CategoryFilter, CreateCategory, GoalCategory};
use crate::repositories::push_page;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, board_id, user_id, title, is_deleted, created_at, updated_at";

/// Same columns qualified with the `c` alias used in participant joins.
const SELECT_COLUMNS: &str =
    "c.id, c.board_id, c.user_id, c.title, c.is_deleted, c.created_at, c.updated_at";

/// Visible-category join: live categories on boards the user participates in.
const VISIBLE_FROM: &str = "FROM goal_categories c
     JOIN board_participants bp ON bp.board_id = c.board_id
     WHERE c.is_deleted = false AND bp.user_id = ";

/// Provides CRUD operations and the delete cascade for goal categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a category owned by `user_id` on a live board.
    ///
    /// The board row is share-locked for the duration of the insert so a
    /// concurrent board deletion either sees the new category (and cascades
    /// to it) or completes first, in which case `None` is returned.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCategory,
    ) -> Result<Option<GoalCategory>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let board_live = sqlx::query_scalar::<_, bool>(
            "SELECT NOT is_deleted FROM boards WHERE id = $1 FOR SHARE",
        )
        .bind(input.board_id)
        .fetch_optional(&mut *tx)
        .await?
        .unwrap_or(false);
        if !board_live {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO goal_categories (board_id, user_id, title)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let category = sqlx::query_as::<_, GoalCategory>(&query)
            .bind(input.board_id)
            .bind(user_id)
            .bind(&input.title)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(category))
    }

    /// List live categories visible to the user.
    pub async fn list_visible(
        pool: &PgPool,
        user_id: DbId,
        filter: &CategoryFilter,
    ) -> Result<Vec<GoalCategory>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {SELECT_COLUMNS} {VISIBLE_FROM}"));
        push_filters(&mut qb, user_id, filter);
        qb.push(" ORDER BY ")
            .push(order_by_clause(&filter.ordering, "c"));
        push_page(&mut qb, filter.page);
        qb.build_query_as::<GoalCategory>().fetch_all(pool).await
    }

    /// Count live categories visible to the user, ignoring pagination.
    pub async fn count_visible(
        pool: &PgPool,
        user_id: DbId,
        filter: &CategoryFilter,
    ) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) {VISIBLE_FROM}"));
        push_filters(&mut qb, user_id, filter);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Find a live category visible to the user.
    pub async fn find_visible(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<GoalCategory>, sqlx::Error> {
        let query = format!("SELECT {SELECT_COLUMNS} {VISIBLE_FROM}$2 AND c.id = $1");
        sqlx::query_as::<_, GoalCategory>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by ID regardless of visibility or deletion state.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<GoalCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM goal_categories WHERE id = $1");
        sqlx::query_as::<_, GoalCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Rename a live category. Returns `None` if it does not exist or is deleted.
    pub async fn update_title(
        pool: &PgPool,
        id: DbId,
        title: Option<&str>,
    ) -> Result<Option<GoalCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE goal_categories SET title = COALESCE($2, title)
             WHERE id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GoalCategory>(&query)
            .bind(id)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a category and archive all of its goals in one transaction.
    ///
    /// Returns the number of goals archived, or `None` (and changes nothing)
    /// if the category was already deleted or does not exist.
    pub async fn soft_delete_cascade(pool: &PgPool, id: DbId) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let flagged = sqlx::query(
            "UPDATE goal_categories SET is_deleted = true WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if flagged == 0 {
            return Ok(None);
        }

        let goals_archived =
            sqlx::query("UPDATE goals SET status = $2 WHERE category_id = $1 AND status <> $2")
                .bind(id)
                .bind(GoalStatus::Archived.id())
                .execute(&mut *tx)
                .await?
                .rows_affected();

        tx.commit().await?;

        tracing::info!(
            category_id = id,
            goals_archived,
            "Category soft-deleted with cascade"
        );

        Ok(Some(goals_archived))
    }
}

/// Append the user binding and optional filters shared by list and count.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, user_id: DbId, filter: &CategoryFilter) {
    qb.push_bind(user_id);
    if let Some(board_id) = filter.board_id {
        qb.push(" AND c.board_id = ").push_bind(board_id);
    }
    if let Some(pattern) = &filter.title_pattern {
        qb.push(" AND c.title ILIKE ").push_bind(pattern.clone());
    }
}
