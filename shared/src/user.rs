use serde::{Deserialize, Serialize};

use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: Username,
    pub avatar_url: String,
    /// Comma-joined medal ids exactly as stored in the sheet.
    pub owned_medals: String,
}

impl UserRecord {
    pub fn from_row(row: &Row) -> Self {
        Self {
            username: field(row, user_columns::USERNAME).to_string(),
            avatar_url: field(row, user_columns::AVATAR_URL).to_string(),
            owned_medals: field(row, user_columns::OWNED_MEDALS).to_string(),
        }
    }

    /// Owned medal ids in sheet order. Empty ownership yields nothing.
    pub fn owned_medal_ids(&self) -> impl Iterator<Item = &str> {
        let raw = if self.owned_medals.is_empty() {
            None
        } else {
            Some(self.owned_medals.split(','))
        };
        raw.into_iter().flatten().map(str::trim)
    }

    pub fn matches_username(&self, name: &str) -> bool {
        !name.is_empty() && self.username.to_lowercase() == name.to_lowercase()
    }
}
