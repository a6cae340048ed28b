//! Data models for user records

use serde::{Deserialize, Serialize};

/// Postal address attached to a user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
}

/// A user as held by the record store and persisted under the `users` key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique identifier, assigned by the store (or preserved from the seed)
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub address: Address,
}

/// A user that has not been stored yet; the store assigns its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

impl NewUser {
    /// Attach an identifier, producing the stored form
    pub fn with_id(self, id: i64) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
        }
    }
}

impl UserRecord {
    /// Case-insensitive match on name or city
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.address.city.to_lowercase().contains(needle_lower)
    }
}
