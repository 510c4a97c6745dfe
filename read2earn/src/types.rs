//! Common type definitions.
//!
//! All entity IDs are UUIDs wrapped in type aliases so signatures say which table they refer to:
//!
//! - [`UserId`]: identity issued by the auth provider (`sub` claim), referenced by every per-user table
//! - [`ProfileId`]: primary key of a `profiles` row
//! - [`ArticleId`]: primary key of an `articles` row
//! - [`ReadingHistoryId`], [`WithdrawalId`], [`ApiKeyId`]: primary keys of their tables
//!
//! [`abbrev_uuid`] shortens UUIDs for log fields.

use uuid::Uuid;

pub type UserId = Uuid;
pub type ProfileId = Uuid;
pub type ArticleId = Uuid;
pub type ReadingHistoryId = Uuid;
pub type WithdrawalId = Uuid;
pub type ApiKeyId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviates_to_first_block() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(abbrev_uuid(&id), "550e8400");
    }
}
