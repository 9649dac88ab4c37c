use reqwest::Method;
use serde_json::json;

use super::{segment, SecureClient};
use crate::error::ApiError;
use crate::models::{Favorite, FavoriteList, Inserted};
use crate::toggle::FavoriteAction;

/// Result of a completed favorite mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteSettled {
    Added { favorite_id: String },
    Removed,
}

impl SecureClient {
    /// `GET /favorites` for the signed-in user.
    pub async fn favorites(&self) -> Result<Vec<Favorite>, ApiError> {
        let list: FavoriteList = self.send(self.request(Method::GET, "/favorites")).await?;
        Ok(list.into_vec())
    }

    /// `POST /favorites`, returning the new favorite's id.
    pub async fn add_favorite(&self, lesson_id: &str) -> Result<String, ApiError> {
        let req = self
            .request(Method::POST, "/favorites")
            .json(&json!({ "lessonId": lesson_id }));
        let inserted: Inserted = self.send(req).await?;
        inserted
            .inserted_id
            .ok_or_else(|| ApiError::Decode("favorite was not saved".to_string()))
    }

    /// `DELETE /favorites/:id`
    pub async fn remove_favorite(&self, favorite_id: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/favorites/{}", segment(favorite_id))))
            .await
    }

    /// Run the request a [`crate::FavoriteToggle`] asked for.
    pub async fn perform_favorite(&self, action: &FavoriteAction) -> Result<FavoriteSettled, ApiError> {
        match action {
            FavoriteAction::Add { lesson_id } => {
                let favorite_id = self.add_favorite(lesson_id).await?;
                Ok(FavoriteSettled::Added { favorite_id })
            }
            FavoriteAction::Remove { favorite_id } => {
                self.remove_favorite(favorite_id).await?;
                Ok(FavoriteSettled::Removed)
            }
        }
    }
}
