/// Share-grant model and database operations
///
/// A share grant extends a category's visibility to one user other than
/// its owner. Grants are flat and append-only in scope: no roles, no
/// revocation, no transitive sharing. The unique (category, user) pair
/// turns a repeated grant into a constraint violation instead of a silent
/// duplicate.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE category_shares (
///     id BIGSERIAL PRIMARY KEY,
///     category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     UNIQUE (category_id, user_id)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Share-grant record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShareGrant {
    /// Unique grant id
    pub id: i64,

    /// The shared category
    pub category_id: i64,

    /// The recipient ("shared-with") user, distinct from the owner
    pub user_id: i64,
}

/// A grant joined with the category it shares, as seen by the recipient
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SharedCategory {
    /// Grant id
    pub id: i64,

    /// Shared category id
    pub category_id: i64,

    /// Shared category name
    pub category_name: String,

    /// The category's owner
    pub owner_id: i64,
}

impl ShareGrant {
    /// Inserts a grant for `category_id` naming `user_id` as recipient
    ///
    /// # Errors
    ///
    /// A repeated grant for the same pair violates the unique constraint
    /// and surfaces as a database error; the caller maps it to a conflict.
    pub async fn create(
        pool: &PgPool,
        category_id: i64,
        user_id: i64,
    ) -> Result<Self, sqlx::Error> {
        let grant = sqlx::query_as::<_, ShareGrant>(
            r#"
            INSERT INTO category_shares (category_id, user_id)
            VALUES ($1, $2)
            RETURNING id, category_id, user_id
            "#,
        )
        .bind(category_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(grant)
    }

    /// Lists categories shared with `user_id`, joined with their details
    pub async fn list_for_recipient(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Vec<SharedCategory>, sqlx::Error> {
        let shared = sqlx::query_as::<_, SharedCategory>(
            r#"
            SELECT s.id, c.id AS category_id, c.name AS category_name, c.user_id AS owner_id
            FROM category_shares s
            JOIN categories c ON c.id = s.category_id
            WHERE s.user_id = $1
            ORDER BY s.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_category_serializes_camel_case() {
        let shared = SharedCategory {
            id: 11,
            category_id: 3,
            category_name: "Work".to_string(),
            owner_id: 1,
        };

        let json = serde_json::to_value(&shared).unwrap();
        assert_eq!(json["categoryId"], 3);
        assert_eq!(json["categoryName"], "Work");
        assert_eq!(json["ownerId"], 1);
    }
}
