use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use super::SecureClient;
use crate::error::ApiError;

#[derive(Deserialize)]
struct CheckoutSession {
    url: String,
}

impl SecureClient {
    /// `POST /create-checkout-session`, returning the hosted checkout URL.
    pub async fn create_checkout_session(&self, email: &str) -> Result<String, ApiError> {
        let req = self
            .request(Method::POST, "/create-checkout-session")
            .json(&json!({ "email": email }));
        let session: CheckoutSession = self.send(req).await?;
        Ok(session.url)
    }

    /// `PATCH /payment-success`: ask the backend to verify the checkout and
    /// flip the premium flag.
    pub async fn confirm_payment(&self, session_id: &str, email: &str) -> Result<(), ApiError> {
        let req = self
            .request(Method::PATCH, "/payment-success")
            .json(&json!({ "sessionId": session_id, "email": email }));
        self.send_empty(req).await
    }
}
