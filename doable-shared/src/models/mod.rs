/// Database models
///
/// One module per table, each pairing a record struct (`sqlx::FromRow`)
/// with its queries:
///
/// - `user`: accounts, credentials, verification state
/// - `category`: user-owned todo categories
/// - `todo`: todo items with optional category references
/// - `share`: grants extending a category's visibility to a second user

pub mod category;
pub mod share;
pub mod todo;
pub mod user;
