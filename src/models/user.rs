//! Dashboard accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Data;
use crate::core::field::FieldValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub pk: i64,

    /// Login identifier, stored lowercase
    pub email: String,

    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: &str, password_hash: String, is_staff: bool) -> Self {
        let now = Utc::now();
        Self {
            pk: 0,
            email: email.trim().to_lowercase(),
            password_hash,
            is_staff,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

crate::impl_entity!(User, "users");

impl Data for User {
    fn indexed_fields() -> &'static [&'static str] {
        &["email"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "pk" => Some(self.pk.into()),
            "email" => Some(self.email.as_str().into()),
            "is_staff" => Some(self.is_staff.into()),
            "is_active" => Some(self.is_active.into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_normalized() {
        let user = User::new("  Staff@Example.COM ", String::new(), true);
        assert_eq!(user.email, "staff@example.com");
        assert!(user.is_active);
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("a@b.c", "$argon2id$secret".to_string(), false);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
