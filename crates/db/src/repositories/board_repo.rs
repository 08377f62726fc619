//! Repository for the `boards` table.

use goalboard_core::goal::GoalStatus;
use goalboard_core::listing::Page;
use goalboard_core::roles::BoardRole;
use goalboard_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::board::{Board, BoardDeletion};
use crate::repositories::push_page;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, is_deleted, created_at, updated_at";

/// Same columns qualified with the `b` alias used in participant joins.
const SELECT_COLUMNS: &str = "b.id, b.title, b.is_deleted, b.created_at, b.updated_at";

/// Provides CRUD operations and the delete cascade for boards.
pub struct BoardRepo;

impl BoardRepo {
    /// Insert a board and register `owner_id` as its owner, atomically.
    pub async fn create_with_owner(
        pool: &PgPool,
        title: &str,
        owner_id: DbId,
    ) -> Result<Board, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO boards (title) VALUES ($1) RETURNING {COLUMNS}");
        let board = sqlx::query_as::<_, Board>(&query)
            .bind(title)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO board_participants (board_id, user_id, role) VALUES ($1, $2, $3)")
            .bind(board.id)
            .bind(owner_id)
            .bind(BoardRole::Owner.id())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(board)
    }

    /// List live boards the user participates in, ordered by title.
    pub async fn list_visible(
        pool: &PgPool,
        user_id: DbId,
        page: Option<Page>,
    ) -> Result<Vec<Board>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {SELECT_COLUMNS}
             FROM boards b
             JOIN board_participants bp ON bp.board_id = b.id
             WHERE b.is_deleted = false AND bp.user_id = "
        ));
        qb.push_bind(user_id);
        qb.push(" ORDER BY b.title ASC, b.id ASC");
        push_page(&mut qb, page);
        qb.build_query_as::<Board>().fetch_all(pool).await
    }

    /// Count live boards the user participates in.
    pub async fn count_visible(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)
             FROM boards b
             JOIN board_participants bp ON bp.board_id = b.id
             WHERE b.is_deleted = false AND bp.user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Find a live board the user participates in.
    pub async fn find_visible(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Board>, sqlx::Error> {
        let query = format!(
            "SELECT {SELECT_COLUMNS}
             FROM boards b
             JOIN board_participants bp ON bp.board_id = b.id
             WHERE b.id = $1 AND b.is_deleted = false AND bp.user_id = $2"
        );
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a board by ID regardless of visibility or deletion state.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Board>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boards WHERE id = $1");
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a live board's title and, optionally, its participant list.
    ///
    /// When `participants` is `Some`, every non-owner participant not listed
    /// is removed, listed users are inserted or have their role changed, and
    /// owner rows are never modified. Title and participant changes commit
    /// together. Returns `None` if the board does not exist or is deleted.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        title: Option<&str>,
        participants: Option<&[(DbId, BoardRole)]>,
    ) -> Result<Option<Board>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE boards SET title = COALESCE($2, title)
             WHERE id = $1 AND is_deleted = false
             RETURNING {COLUMNS}"
        );
        let Some(board) = sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .bind(title)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(participants) = participants {
            let keep: Vec<DbId> = participants.iter().map(|(user_id, _)| *user_id).collect();

            let removed = sqlx::query(
                "DELETE FROM board_participants
                 WHERE board_id = $1 AND role <> $2 AND user_id <> ALL($3)",
            )
            .bind(id)
            .bind(BoardRole::Owner.id())
            .bind(&keep)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            for (user_id, role) in participants {
                sqlx::query(
                    "INSERT INTO board_participants (board_id, user_id, role)
                     VALUES ($1, $2, $3)
                     ON CONFLICT ON CONSTRAINT uq_board_participants_board_user
                     DO UPDATE SET role = EXCLUDED.role
                     WHERE board_participants.role <> $4",
                )
                .bind(id)
                .bind(*user_id)
                .bind(role.id())
                .bind(BoardRole::Owner.id())
                .execute(&mut *tx)
                .await?;
            }

            tracing::debug!(
                board_id = id,
                removed,
                listed = participants.len(),
                "Replaced board participants"
            );
        }

        tx.commit().await?;
        Ok(Some(board))
    }

    /// Soft-delete a board and cascade to everything beneath it.
    ///
    /// In one transaction: the board is flagged deleted, all of its categories
    /// are flagged deleted, and every goal in those categories is archived.
    /// Returns `None` (and changes nothing) if the board was already deleted
    /// or does not exist.
    pub async fn soft_delete_cascade(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BoardDeletion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let flagged =
            sqlx::query("UPDATE boards SET is_deleted = true WHERE id = $1 AND is_deleted = false")
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        if flagged == 0 {
            return Ok(None);
        }

        let categories_deleted = sqlx::query(
            "UPDATE goal_categories SET is_deleted = true
             WHERE board_id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let goals_archived = sqlx::query(
            "UPDATE goals SET status = $2
             WHERE status <> $2
               AND category_id IN (SELECT id FROM goal_categories WHERE board_id = $1)",
        )
        .bind(id)
        .bind(GoalStatus::Archived.id())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;

        tracing::info!(
            board_id = id,
            categories_deleted,
            goals_archived,
            "Board soft-deleted with cascade"
        );

        Ok(Some(BoardDeletion {
            categories_deleted,
            goals_archived,
        }))
    }
}
