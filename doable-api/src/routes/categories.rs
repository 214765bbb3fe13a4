/// Category endpoints
///
/// - `POST /categories` - create a category owned by the caller
/// - `POST /categories/share` - grant another user visibility of an owned
///   category
/// - `GET /categories/shared` - list categories shared *with* the caller
///
/// Sharing requires ownership of the category: the caller must be its
/// creator-owner. Non-owners get the same 404 they would for a category
/// that doesn't exist.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use doable_shared::{
    auth::{
        middleware::AuthContext,
        ownership::{owns, Resource},
    },
    models::{
        category::Category,
        share::{ShareGrant, SharedCategory},
        user::User,
    },
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create-category request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Category name (required)
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
}

/// Create-category response
#[derive(Debug, Serialize)]
pub struct CreateCategoryResponse {
    /// Human-readable confirmation
    pub message: String,

    /// The created category
    pub category: Category,
}

/// Share request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    /// Category to share
    #[validate(range(min = 1, message = "categoryId must be positive"))]
    pub category_id: i64,

    /// Recipient user
    #[validate(range(min = 1, message = "userId must be positive"))]
    pub user_id: i64,
}

/// Share response
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    /// Human-readable confirmation
    pub message: String,

    /// The created grant
    pub share: ShareGrant,
}

/// Create a category
///
/// # Errors
///
/// - `400`: validation failed
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<CreateCategoryResponse>)> {
    req.validate()?;

    let category = Category::create(&state.db, &req.name, auth.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCategoryResponse {
            message: "Category created".to_string(),
            category,
        }),
    ))
}

/// Share a category with another user
///
/// The caller must own the category; the recipient must exist and be a
/// different user.
///
/// # Errors
///
/// - `400`: validation failed, or sharing with oneself
/// - `404`: category absent or not owned; recipient user absent
/// - `409`: the pair is already shared
pub async fn share(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ShareRequest>,
) -> ApiResult<(StatusCode, Json<ShareResponse>)> {
    req.validate()?;

    if req.user_id == auth.user_id {
        return Err(ApiError::BadRequest(
            "Cannot share a category with yourself".to_string(),
        ));
    }

    if !owns(&state.db, auth.user_id, Resource::Category, req.category_id).await? {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    if User::find_by_id(&state.db, req.user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let share = ShareGrant::create(&state.db, req.category_id, req.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShareResponse {
            message: "Category shared".to_string(),
            share,
        }),
    ))
}

/// List categories shared with the caller
pub async fn list_shared(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<SharedCategory>>> {
    let shared = ShareGrant::list_for_recipient(&state.db, auth.user_id).await?;

    Ok(Json(shared))
}
