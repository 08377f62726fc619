//! Repository for the `goal_comments` table.

use goalboard_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::comment::{CommentFilter, CreateComment, GoalComment};
use crate::repositories::push_page;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, goal_id, user_id, text, created_at, updated_at";

/// Same columns qualified with the `gc` alias used in participant joins.
const SELECT_COLUMNS: &str =
    "gc.id, gc.goal_id, gc.user_id, gc.text, gc.created_at, gc.updated_at";

/// Visible-comment join: comments on goals whose board the user participates in.
const VISIBLE_FROM: &str = "FROM goal_comments gc
     JOIN goals g ON g.id = gc.goal_id
     JOIN goal_categories c ON c.id = g.category_id
     JOIN board_participants bp ON bp.board_id = c.board_id
     WHERE bp.user_id = ";

/// Provides CRUD operations for goal comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment authored by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateComment,
    ) -> Result<GoalComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO goal_comments (goal_id, user_id, text)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GoalComment>(&query)
            .bind(input.goal_id)
            .bind(user_id)
            .bind(&input.text)
            .fetch_one(pool)
            .await
    }

    /// List comments visible to the user, newest first.
    pub async fn list_visible(
        pool: &PgPool,
        user_id: DbId,
        filter: &CommentFilter,
    ) -> Result<Vec<GoalComment>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {SELECT_COLUMNS} {VISIBLE_FROM}"));
        push_filters(&mut qb, user_id, filter);
        qb.push(" ORDER BY gc.created_at DESC, gc.id DESC");
        push_page(&mut qb, filter.page);
        qb.build_query_as::<GoalComment>().fetch_all(pool).await
    }

    /// Count comments visible to the user, ignoring pagination.
    pub async fn count_visible(
        pool: &PgPool,
        user_id: DbId,
        filter: &CommentFilter,
    ) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) {VISIBLE_FROM}"));
        push_filters(&mut qb, user_id, filter);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Find a comment visible to the user.
    pub async fn find_visible(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<GoalComment>, sqlx::Error> {
        let query = format!("SELECT {SELECT_COLUMNS} {VISIBLE_FROM}$2 AND gc.id = $1");
        sqlx::query_as::<_, GoalComment>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a comment's text. Returns `None` if no row with the given `id` exists.
    pub async fn update_text(
        pool: &PgPool,
        id: DbId,
        text: &str,
    ) -> Result<Option<GoalComment>, sqlx::Error> {
        let query = format!("UPDATE goal_comments SET text = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, GoalComment>(&query)
            .bind(id)
            .bind(text)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a comment. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM goal_comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, user_id: DbId, filter: &CommentFilter) {
    qb.push_bind(user_id);
    if let Some(goal_id) = filter.goal_id {
        qb.push(" AND gc.goal_id = ").push_bind(goal_id);
    }
}
