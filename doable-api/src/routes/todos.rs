/// Todo endpoints
///
/// - `POST /todos` - create a todo, optionally attached to an owned category
/// - `GET /todos` - list the caller's todos with filter and pagination
/// - `PATCH /todos/:id/completed` - mark a todo completed
///
/// Every operation is scoped to the authenticated identity from the
/// request gate. A todo or category that exists under another owner is
/// reported exactly like one that doesn't exist.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use doable_shared::{
    auth::{
        middleware::AuthContext,
        ownership::{owns, Resource},
    },
    models::todo::{NewTodo, Todo},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Hard cap applied to the `limit` query parameter
const MAX_PAGE_SIZE: i64 = 100;

/// Default page size
const DEFAULT_PAGE_SIZE: i64 = 10;

/// Create-todo request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    /// Title (required)
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Due date (required)
    pub due_date: NaiveDate,

    /// Optional category reference; must be owned by the caller
    pub category_id: Option<i64>,
}

/// Create-todo response
#[derive(Debug, Serialize)]
pub struct CreateTodoResponse {
    /// Human-readable confirmation
    pub message: String,

    /// The created todo
    pub todo: Todo,
}

/// List query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListTodosQuery {
    /// Filter by completion flag
    pub completed: Option<bool>,

    /// Page number, 1-based (default 1)
    pub page: Option<i64>,

    /// Page size (default 10, capped at 100)
    pub limit: Option<i64>,
}

impl ListTodosQuery {
    /// Resolves page/limit to a (limit, offset) pair
    ///
    /// Values below 1 fall back to the defaults; limits above the cap are
    /// clamped.
    fn pagination(&self) -> (i64, i64) {
        let page = match self.page {
            Some(p) if p >= 1 => p,
            _ => 1,
        };
        let limit = match self.limit {
            Some(l) if l >= 1 => l.min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };

        (limit, (page - 1) * limit)
    }
}

/// Create a todo
///
/// A given `categoryId` must resolve to a category owned by the caller -
/// a category merely shared with them does not qualify.
///
/// # Errors
///
/// - `400`: validation failed
/// - `404`: category absent or owned by someone else
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<CreateTodoResponse>)> {
    req.validate()?;

    if let Some(category_id) = req.category_id {
        if !owns(&state.db, auth.user_id, Resource::Category, category_id).await? {
            return Err(ApiError::NotFound("Category not found".to_string()));
        }
    }

    let todo = Todo::create(
        &state.db,
        NewTodo {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
            user_id: auth.user_id,
            category_id: req.category_id,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTodoResponse {
            message: "Todo created".to_string(),
            todo,
        }),
    ))
}

/// List the caller's todos
///
/// Ordered by due date ascending; a page beyond the data returns an empty
/// list, not an error.
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListTodosQuery>,
) -> ApiResult<Json<Vec<Todo>>> {
    let (limit, offset) = query.pagination();

    let todos = Todo::list_for_user(&state.db, auth.user_id, query.completed, limit, offset).await?;

    Ok(Json(todos))
}

/// Mark-completed response
#[derive(Debug, Serialize)]
pub struct MarkCompletedResponse {
    /// Human-readable confirmation
    pub message: String,

    /// The updated todo
    pub todo: Todo,
}

/// Mark a todo completed
///
/// Idempotent: completing an already-completed todo succeeds and leaves
/// it unchanged.
///
/// # Errors
///
/// - `404`: todo absent or owned by someone else
pub async fn mark_completed(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MarkCompletedResponse>> {
    let todo = Todo::mark_completed(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))?;

    Ok(Json(MarkCompletedResponse {
        message: "Todo completed".to_string(),
        todo,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let query = ListTodosQuery::default();
        assert_eq!(query.pagination(), (10, 0));
    }

    #[test]
    fn test_pagination_offsets() {
        let query = ListTodosQuery {
            page: Some(2),
            limit: Some(5),
            ..Default::default()
        };
        assert_eq!(query.pagination(), (5, 5));

        let query = ListTodosQuery {
            page: Some(3),
            limit: Some(10),
            ..Default::default()
        };
        assert_eq!(query.pagination(), (10, 20));
    }

    #[test]
    fn test_pagination_clamps_limit() {
        let query = ListTodosQuery {
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(query.pagination(), (100, 0));
    }

    #[test]
    fn test_pagination_rejects_nonpositive_values() {
        let query = ListTodosQuery {
            page: Some(0),
            limit: Some(-3),
            ..Default::default()
        };
        assert_eq!(query.pagination(), (10, 0));
    }
}
