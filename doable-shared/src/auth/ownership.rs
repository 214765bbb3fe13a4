/// The resource-ownership predicate
///
/// Every todo and category carries exactly one owning user id, set at
/// creation and never reassigned. Instead of inlining a lookup per
/// operation, the todo, category, and sharing paths all go through one
/// predicate: does this identity own this resource?
///
/// `owns` deliberately answers a bare yes/no. An absent resource and a
/// resource owned by someone else are the same `false` - callers turn that
/// into an ownership-opaque 404, so a prober can't learn whether a given
/// id exists.
///
/// # Example
///
/// ```no_run
/// use doable_shared::auth::ownership::{owns, Resource};
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// if !owns(&pool, 42, Resource::Category, 7).await? {
///     // respond 404, whether category 7 is absent or belongs to another user
/// }
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;

/// Resource kinds subject to ownership checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A todo item
    Todo,

    /// A category
    Category,
}

/// Checks whether `user_id` owns the resource with the given id
///
/// A single EXISTS query per call; the row is not fetched.
///
/// # Errors
///
/// Returns the underlying `sqlx::Error` on store failure.
pub async fn owns(
    pool: &PgPool,
    user_id: i64,
    resource: Resource,
    resource_id: i64,
) -> Result<bool, sqlx::Error> {
    let owned: bool = match resource {
        Resource::Todo => {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM todos WHERE id = $1 AND user_id = $2)",
            )
            .bind(resource_id)
            .bind(user_id)
            .fetch_one(pool)
            .await?
        }
        Resource::Category => {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1 AND user_id = $2)",
            )
            .bind(resource_id)
            .bind(user_id)
            .fetch_one(pool)
            .await?
        }
    };

    Ok(owned)
}
