use reqwest::Method;
use serde_json::json;

use super::{segment, PublicClient, SecureClient};
use crate::error::ApiError;
use crate::models::{AdminFlag, AppUser, TokenGrant, UserUpsert};
use crate::session::SessionBackend;

impl PublicClient {
    /// `POST /users`: create or refresh the backend record for an identity.
    pub async fn upsert_user(&self, user: &UserUpsert) -> Result<(), ApiError> {
        let req = self.request(Method::POST, "/users").json(user);
        self.send_empty(req).await
    }

    /// `POST /jwt`: trade an identity's email for a backend access token.
    pub async fn exchange_token(&self, email: &str) -> Result<String, ApiError> {
        let req = self.request(Method::POST, "/jwt").json(&json!({ "email": email }));
        let grant: TokenGrant = self.send(req).await?;
        Ok(grant.token)
    }
}

impl SessionBackend for PublicClient {
    async fn upsert_user(&self, user: &UserUpsert) -> Result<(), ApiError> {
        PublicClient::upsert_user(self, user).await
    }

    async fn exchange_token(&self, email: &str) -> Result<String, ApiError> {
        PublicClient::exchange_token(self, email).await
    }
}

impl SecureClient {
    /// `GET /users/:email`; the backend answers `null` for unknown users.
    pub async fn user(&self, email: &str) -> Result<Option<AppUser>, ApiError> {
        let req = self.request(Method::GET, &format!("/users/{}", segment(email)));
        self.send(req).await
    }

    /// `GET /users/admin/:email`
    pub async fn admin_flag(&self, email: &str) -> Result<bool, ApiError> {
        let req = self.request(Method::GET, &format!("/users/admin/{}", segment(email)));
        let flag: AdminFlag = self.send(req).await?;
        Ok(flag.admin)
    }

    /// `GET /users`
    pub async fn users(&self) -> Result<Vec<AppUser>, ApiError> {
        self.send(self.request(Method::GET, "/users")).await
    }

    /// `PATCH /admin/users/:id/make-admin`
    pub async fn make_admin(&self, user_id: &str) -> Result<(), ApiError> {
        let req = self.request(Method::PATCH, &format!("/admin/users/{}/make-admin", segment(user_id)));
        self.send_empty(req).await
    }

    /// `DELETE /admin/users/:id`
    pub async fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        let req = self.request(Method::DELETE, &format!("/admin/users/{}", segment(user_id)));
        self.send_empty(req).await
    }
}
