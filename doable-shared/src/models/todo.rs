/// Todo model and database operations
///
/// Todos are owner-scoped on every path: listing filters by owner,
/// completion updates are keyed by both id and owner in one statement, so
/// a todo under another owner is indistinguishable from one that doesn't
/// exist.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     due_date DATE NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     category_id BIGINT REFERENCES categories(id) ON DELETE SET NULL
/// );
/// ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Todo record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique todo id
    pub id: i64,

    /// Title
    pub title: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Due date, the list ordering key
    pub due_date: NaiveDate,

    /// Completion flag, false at creation
    pub completed: bool,

    /// Owning user id, set at creation and never reassigned
    pub user_id: i64,

    /// Optional category reference; must be owned by the same user
    pub category_id: Option<i64>,
}

/// Input for creating a new todo
#[derive(Debug, Clone)]
pub struct NewTodo {
    /// Title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Due date
    pub due_date: NaiveDate,

    /// Owning user id (the authenticated identity)
    pub user_id: i64,

    /// Optional category reference, already ownership-checked by the caller
    pub category_id: Option<i64>,
}

impl Todo {
    /// Inserts a new todo with completion unset
    ///
    /// The category-ownership check happens before this call; a concurrent
    /// category deletion between check and insert fails the foreign-key
    /// constraint instead.
    pub async fn create(pool: &PgPool, data: NewTodo) -> Result<Self, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (title, description, due_date, user_id, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, due_date, completed, user_id, category_id
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.due_date)
        .bind(data.user_id)
        .bind(data.category_id)
        .fetch_one(pool)
        .await?;

        Ok(todo)
    }

    /// Lists todos owned by `user_id`
    ///
    /// Optionally filtered by completion flag, ordered by due date
    /// ascending, offset-paginated. A page beyond the data returns an
    /// empty vector.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: i64,
        completed: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, title, description, due_date, completed, user_id, category_id
            FROM todos
            WHERE user_id = $1
              AND ($2::boolean IS NULL OR completed = $2)
            ORDER BY due_date ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(completed)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(todos)
    }

    /// Marks a todo completed, scoped by owner
    ///
    /// Id and owner are matched in the same statement, so "absent" and
    /// "owned by someone else" are both `None`. Idempotent: completing an
    /// already-completed todo succeeds and leaves it unchanged.
    pub async fn mark_completed(
        pool: &PgPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET completed = TRUE
            WHERE id = $1 AND user_id = $2
            RETURNING id, title, description, due_date, completed, user_id, category_id
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_serializes_camel_case() {
        let todo = Todo {
            id: 1,
            title: "Report".to_string(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            completed: false,
            user_id: 42,
            category_id: Some(7),
        };

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["dueDate"], "2025-01-01");
        assert_eq!(json["categoryId"], 7);
        assert_eq!(json["userId"], 42);
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn test_todo_deserializes_null_category() {
        let todo: Todo = serde_json::from_value(serde_json::json!({
            "id": 2,
            "title": "Groceries",
            "description": "milk",
            "dueDate": "2025-06-15",
            "completed": true,
            "userId": 1,
            "categoryId": null
        }))
        .unwrap();

        assert_eq!(todo.category_id, None);
        assert!(todo.completed);
    }
}
