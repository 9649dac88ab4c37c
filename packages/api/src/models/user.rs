//! # Application user record
//!
//! [`AppUser`] is the backend's own projection of a signed-in person, separate
//! from the identity provider's view. It carries the two flags the client
//! branches on:
//!
//! - `role`: `"admin"` unlocks the moderation views ([`AppUser::is_admin`]).
//! - `isPremium`: unlocks premium lessons and premium authoring.
//!
//! The client never mutates these flags locally; it refetches through
//! [`crate::AccountDirectory`] after anything that could change them.
//!
//! [`UserUpsert`] is the body the session bridge posts to `/users` on every
//! sign-in so the backend has a record before the first protected call.

use serde::{Deserialize, Serialize};

/// User record as stored by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
}

impl AppUser {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.email)
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserUpsert {
    pub email: String,
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// `GET /users/admin/:email`
#[derive(Debug, Deserialize)]
pub(crate) struct AdminFlag {
    #[serde(default)]
    pub admin: bool,
}

/// `POST /jwt`
#[derive(Debug, Deserialize)]
pub(crate) struct TokenGrant {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_backend_user() {
        let user: AppUser = serde_json::from_str(
            r#"{"_id":"65f0","email":"ana@example.com","name":"Ana","photoURL":"https://img/a.png","role":"admin","isPremium":true}"#,
        )
        .unwrap();

        assert_eq!(user.id, "65f0");
        assert!(user.is_admin());
        assert!(user.is_premium);
        assert_eq!(user.photo_url.as_deref(), Some("https://img/a.png"));
    }

    #[test]
    fn test_missing_flags_default_to_false() {
        let user: AppUser = serde_json::from_str(r#"{"email":"bo@example.com"}"#).unwrap();

        assert!(!user.is_admin());
        assert!(!user.is_premium);
        assert_eq!(user.display_name(), "bo@example.com");
    }

    #[test]
    fn test_upsert_uses_backend_field_names() {
        let body = serde_json::to_value(UserUpsert {
            email: "c@example.com".into(),
            name: Some("C".into()),
            photo_url: None,
        })
        .unwrap();

        assert_eq!(body["email"], "c@example.com");
        assert!(body.get("photoURL").is_some());
    }
}
