//! Identity Toolkit REST client.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use store::config::IdentityConfig;

use super::{Identity, IdentityWatch};
use crate::error::ApiError;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Account payload shared by every Identity Toolkit response we read.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountReply {
    #[serde(default)]
    local_id: String,
    #[serde(default)]
    email: String,
    display_name: Option<String>,
    photo_url: Option<String>,
    id_token: Option<String>,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupReply {
    #[serde(default)]
    users: Vec<AccountReply>,
}

/// Email/password and Google sign-in against the identity provider.
///
/// Every successful call publishes the resulting [`Identity`] on the shared
/// [`IdentityWatch`]; callers never hand identities around themselves.
#[derive(Clone)]
pub struct IdentityProvider {
    http: reqwest::Client,
    config: IdentityConfig,
    watch: IdentityWatch,
}

impl IdentityProvider {
    pub fn new(config: IdentityConfig, watch: IdentityWatch) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            watch,
        }
    }

    pub fn watch(&self) -> &IdentityWatch {
        &self.watch
    }

    /// Create an account, then set its name and photo.
    ///
    /// The new account is signed in as soon as it exists. A failed profile
    /// step is logged and the identity comes back without the name and photo.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: &str,
        photo_url: &str,
    ) -> Result<Identity, ApiError> {
        let reply: AccountReply = self
            .call(
                "accounts:signUp",
                json!({ "email": email, "password": password, "returnSecureToken": true }),
            )
            .await?;
        let identity = into_identity(reply, None)?;
        tracing::info!("Registered {}", identity.email);
        self.watch.publish(Some(identity.clone()));

        match self.apply_profile(identity.clone(), name, photo_url).await {
            Ok(updated) => Ok(updated),
            Err(e) => {
                tracing::warn!("Profile for {} not saved after sign-up: {e}", identity.email);
                Ok(identity)
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, ApiError> {
        let reply: AccountReply = self
            .call(
                "accounts:signInWithPassword",
                json!({ "email": email, "password": password, "returnSecureToken": true }),
            )
            .await?;
        let mut identity = into_identity(reply, None)?;

        // The password endpoint omits the photo; fetch it so the navbar has it.
        if identity.photo_url.is_none() {
            match self.lookup(&identity.id_token).await {
                Ok(Some(account)) => identity.photo_url = account.photo_url,
                Ok(None) => {}
                Err(e) => tracing::warn!("Profile lookup failed: {e}"),
            }
        }

        tracing::info!("Signed in {}", identity.email);
        self.watch.publish(Some(identity.clone()));
        Ok(identity)
    }

    /// Complete a Google sign-in from the `id_token` the OAuth redirect returned.
    pub async fn sign_in_with_google(&self, google_id_token: &str) -> Result<Identity, ApiError> {
        let post_body = format!(
            "id_token={}&providerId=google.com",
            urlencoding::encode(google_id_token)
        );
        let reply: AccountReply = self
            .call(
                "accounts:signInWithIdp",
                json!({
                    "postBody": post_body,
                    "requestUri": self.config.redirect_uri,
                    "returnIdpCredential": true,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        let identity = into_identity(reply, None)?;
        tracing::info!("Signed in {} with Google", identity.email);
        self.watch.publish(Some(identity.clone()));
        Ok(identity)
    }

    /// Change the current user's display name and photo.
    pub async fn update_profile(&self, name: &str, photo_url: &str) -> Result<Identity, ApiError> {
        let current = self.watch.current().ok_or(ApiError::NotSignedIn)?;
        self.apply_profile(current, name, photo_url).await
    }

    pub fn sign_out(&self) {
        if let Some(identity) = self.watch.current() {
            tracing::info!("Signing out {}", identity.email);
        }
        self.watch.publish(None);
    }

    /// Where to send the browser to start a Google sign-in. `None` when no
    /// client id is configured.
    pub fn google_sign_in_url(&self, nonce: &str) -> Option<String> {
        if self.config.google_client_id.is_empty() {
            return None;
        }
        reqwest::Url::parse_with_params(
            GOOGLE_AUTH_URL,
            &[
                ("client_id", self.config.google_client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "id_token"),
                ("scope", "openid email profile"),
                ("prompt", "select_account"),
                ("nonce", nonce),
            ],
        )
        .ok()
        .map(String::from)
    }

    async fn apply_profile(
        &self,
        identity: Identity,
        name: &str,
        photo_url: &str,
    ) -> Result<Identity, ApiError> {
        let reply: AccountReply = self
            .call(
                "accounts:update",
                json!({
                    "idToken": identity.id_token,
                    "displayName": name,
                    "photoUrl": photo_url,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        let updated = into_identity(reply, Some(&identity))?;
        self.watch.publish(Some(updated.clone()));
        Ok(updated)
    }

    async fn lookup(&self, id_token: &str) -> Result<Option<AccountReply>, ApiError> {
        let reply: LookupReply = self
            .call("accounts:lookup", json!({ "idToken": id_token }))
            .await?;
        Ok(reply.users.into_iter().next())
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: Value) -> Result<T, ApiError> {
        let url = format!(
            "{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            method
        );
        let resp = self
            .http
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ApiError::Identity(provider_message(&text)));
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Merge a reply into an identity. `update` replies may omit the tokens and
/// the uid, in which case the previous ones stay.
fn into_identity(reply: AccountReply, previous: Option<&Identity>) -> Result<Identity, ApiError> {
    let pick = |new: String, old: Option<&str>| {
        if new.is_empty() {
            old.unwrap_or_default().to_string()
        } else {
            new
        }
    };

    let identity = Identity {
        uid: pick(reply.local_id, previous.map(|p| p.uid.as_str())),
        email: pick(reply.email, previous.map(|p| p.email.as_str())),
        display_name: reply
            .display_name
            .or_else(|| previous.and_then(|p| p.display_name.clone())),
        photo_url: reply
            .photo_url
            .or_else(|| previous.and_then(|p| p.photo_url.clone())),
        id_token: pick(
            reply.id_token.unwrap_or_default(),
            previous.map(|p| p.id_token.as_str()),
        ),
        refresh_token: pick(
            reply.refresh_token.unwrap_or_default(),
            previous.map(|p| p.refresh_token.as_str()),
        ),
    };

    if identity.email.is_empty() {
        return Err(ApiError::Identity(
            "The sign-in provider did not return an email address".to_string(),
        ));
    }
    Ok(identity)
}

/// Turn `{"error":{"message":"EMAIL_EXISTS"}}` into something a person can read.
fn provider_message(body: &str) -> String {
    let raw = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_default();

    // Codes may carry detail after " : ", e.g. "WEAK_PASSWORD : Password should be ..."
    let code = raw.split(" : ").next().unwrap_or_default().trim();

    match code {
        "EMAIL_EXISTS" => "An account with this email already exists".to_string(),
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password".to_string()
        }
        "USER_DISABLED" => "This account has been disabled".to_string(),
        "WEAK_PASSWORD" => "Password should be at least 6 characters".to_string(),
        "INVALID_EMAIL" => "Please enter a valid email address".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts, please try again later".to_string(),
        "INVALID_ID_TOKEN" | "TOKEN_EXPIRED" | "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => {
            "Please sign in again to continue".to_string()
        }
        "" => "Sign-in failed".to_string(),
        other => other.replace('_', " ").to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedHttp;
    use std::rc::Rc;
    use store::MemoryStore;

    fn provider(client_id: &str) -> IdentityProvider {
        let config = IdentityConfig {
            google_client_id: client_id.to_string(),
            ..IdentityConfig::default()
        };
        IdentityProvider::new(config, IdentityWatch::new(Rc::new(MemoryStore::new())))
    }

    #[test]
    fn test_provider_messages() {
        assert_eq!(
            provider_message(r#"{"error":{"code":400,"message":"EMAIL_EXISTS"}}"#),
            "An account with this email already exists"
        );
        assert_eq!(
            provider_message(r#"{"error":{"message":"INVALID_LOGIN_CREDENTIALS"}}"#),
            "Invalid email or password"
        );
        assert_eq!(
            provider_message(
                r#"{"error":{"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}"#
            ),
            "Password should be at least 6 characters"
        );
        assert_eq!(
            provider_message(r#"{"error":{"message":"OPERATION_NOT_ALLOWED"}}"#),
            "operation not allowed"
        );
        assert_eq!(provider_message("<html>"), "Sign-in failed");
    }

    #[test]
    fn test_update_reply_keeps_previous_tokens() {
        let previous = Identity {
            uid: "u1".into(),
            email: "ana@example.com".into(),
            display_name: None,
            photo_url: None,
            id_token: "old-id".into(),
            refresh_token: "old-refresh".into(),
        };
        let reply = AccountReply {
            display_name: Some("Ana".into()),
            photo_url: Some("https://img/a.png".into()),
            ..AccountReply::default()
        };

        let merged = into_identity(reply, Some(&previous)).unwrap();
        assert_eq!(merged.uid, "u1");
        assert_eq!(merged.email, "ana@example.com");
        assert_eq!(merged.display_name.as_deref(), Some("Ana"));
        assert_eq!(merged.id_token, "old-id");
        assert_eq!(merged.refresh_token, "old-refresh");
    }

    #[test]
    fn test_reply_without_email_is_rejected() {
        let err = into_identity(AccountReply::default(), None).unwrap_err();
        assert!(matches!(err, ApiError::Identity(_)));
    }

    #[test]
    fn test_google_url() {
        assert!(provider("").google_sign_in_url("n1").is_none());

        let url = provider("client-123").google_sign_in_url("n1").unwrap();
        assert!(url.starts_with(GOOGLE_AUTH_URL));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("response_type=id_token"));
        assert!(url.contains("nonce=n1"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fauth%2Fcallback"));
    }

    #[tokio::test]
    async fn test_update_profile_requires_identity() {
        let result = provider("").update_profile("Ana", "").await;
        assert_eq!(result, Err(ApiError::NotSignedIn));
    }

    fn provider_at(endpoint: &str) -> IdentityProvider {
        let config = IdentityConfig {
            endpoint: endpoint.to_string(),
            api_key: "key-1".to_string(),
            ..IdentityConfig::default()
        };
        IdentityProvider::new(config, IdentityWatch::new(Rc::new(MemoryStore::new())))
    }

    const SIGN_UP_REPLY: &str = r#"{"localId":"u9","email":"new@example.com","idToken":"id-9","refreshToken":"r-9"}"#;

    #[tokio::test]
    async fn test_sign_up_keeps_account_signed_in_when_profile_fails() {
        let server = ScriptedHttp::serve(vec![
            (200, SIGN_UP_REPLY),
            (400, r#"{"error":{"message":"INVALID_ID_TOKEN"}}"#),
        ])
        .await;
        let provider = provider_at(&server.base_url);

        let identity = provider
            .sign_up("new@example.com", "secret1", "Nia", "https://img/n.png")
            .await
            .unwrap();

        assert_eq!(identity.email, "new@example.com");
        assert_eq!(identity.display_name, None);
        assert_eq!(provider.watch().current(), Some(identity));

        let paths = server.paths();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].starts_with("/accounts:signUp?key=key-1"));
        assert!(paths[1].starts_with("/accounts:update"));
    }

    #[tokio::test]
    async fn test_sign_up_applies_profile() {
        let server = ScriptedHttp::serve(vec![
            (200, SIGN_UP_REPLY),
            (200, r#"{"email":"new@example.com","displayName":"Nia","photoUrl":"https://img/n.png"}"#),
        ])
        .await;
        let provider = provider_at(&server.base_url);

        let identity = provider
            .sign_up("new@example.com", "secret1", "Nia", "https://img/n.png")
            .await
            .unwrap();

        assert_eq!(identity.display_name.as_deref(), Some("Nia"));
        assert_eq!(identity.id_token, "id-9");
        assert_eq!(provider.watch().current(), Some(identity));
    }

    #[tokio::test]
    async fn test_rejected_sign_up_publishes_nothing() {
        let server = ScriptedHttp::serve(vec![(400, r#"{"error":{"message":"EMAIL_EXISTS"}}"#)]).await;
        let provider = provider_at(&server.base_url);

        let result = provider.sign_up("new@example.com", "secret1", "Nia", "").await;

        assert_eq!(
            result,
            Err(ApiError::Identity("An account with this email already exists".into()))
        );
        assert!(provider.watch().current().is_none());
    }

    #[test]
    fn test_sign_out_publishes_none() {
        let provider = provider("");
        provider.watch().publish(Some(Identity {
            uid: "u1".into(),
            email: "ana@example.com".into(),
            display_name: None,
            photo_url: None,
            id_token: String::new(),
            refresh_token: String::new(),
        }));

        provider.sign_out();
        assert!(provider.watch().current().is_none());
    }
}
