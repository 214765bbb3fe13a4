/// Category model and database operations
///
/// A category belongs to exactly one user - its creator - for its whole
/// lifetime. Other users gain read access only through share grants; they
/// never become owners.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE categories (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Category record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category id
    pub id: i64,

    /// Category name
    pub name: String,

    /// Owning user id, set at creation and never reassigned
    pub user_id: i64,
}

impl Category {
    /// Inserts a new category owned by `user_id`
    pub async fn create(pool: &PgPool, name: &str, user_id: i64) -> Result<Self, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, user_id)
            VALUES ($1, $2)
            RETURNING id, name, user_id
            "#,
        )
        .bind(name)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    /// Finds a category only if `user_id` owns it
    ///
    /// Absent and not-owned both come back as `None`.
    pub async fn find_owned(
        pool: &PgPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, user_id
            FROM categories
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_camel_case() {
        let category = Category {
            id: 3,
            name: "Work".to_string(),
            user_id: 42,
        };

        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Work");
        assert_eq!(json["userId"], 42);
    }
}
