use indexmap::IndexMap;
use serde::Serialize;

/// Placeholder for a follow date the export does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Reciprocal date of an unfollower. They never followed back, so this is
/// a fixed marker rather than a date.
pub const NEVER: &str = "Never";

/// Username → follow date, in the order usernames first appeared in the
/// source. Re-inserting a username replaces its date but keeps its slot.
pub type MembershipMap = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipRecord {
    pub username: String,
    pub followed_since: String,
}

impl MembershipRecord {
    pub fn new(username: impl Into<String>, followed_since: Option<String>) -> Self {
        Self {
            username: username.into(),
            followed_since: followed_since.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }

    /// Adds the record to `map`, replacing the date of an earlier entry
    /// with the same username.
    pub fn insert_into(self, map: &mut MembershipMap) {
        map.insert(self.username, self.followed_since);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnfollowerRecord {
    pub username: String,
    pub you_followed: String,
    pub they_followed: &'static str,
}

impl UnfollowerRecord {
    pub(crate) fn new(username: &str, you_followed: &str) -> Self {
        Self {
            username: username.to_string(),
            you_followed: you_followed.to_string(),
            they_followed: NEVER,
        }
    }
}
