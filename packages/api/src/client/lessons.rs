use reqwest::Method;
use serde_json::json;

use super::{segment, PublicClient, SecureClient};
use crate::error::ApiError;
use crate::models::{
    Comment, Contributor, Highlight, Inserted, Lesson, LessonPage, LessonPatch, LessonQuery,
    LikeStatus, Listing, NewComment, NewLesson,
};

impl PublicClient {
    /// `GET /lessons/public`
    pub async fn public_lessons(&self, query: &LessonQuery) -> Result<LessonPage, ApiError> {
        let req = self
            .request(Method::GET, "/lessons/public")
            .query(&query.to_params());
        self.send(req).await
    }

    /// `GET /lessons/featured`
    pub async fn featured_lessons(&self) -> Result<Vec<Highlight>, ApiError> {
        let listing: Listing<Highlight> =
            self.send(self.request(Method::GET, "/lessons/featured")).await?;
        Ok(listing.into_vec())
    }

    /// `GET /stats/top-contributors`
    pub async fn top_contributors(&self) -> Result<Vec<Contributor>, ApiError> {
        let listing: Listing<Contributor> =
            self.send(self.request(Method::GET, "/stats/top-contributors")).await?;
        Ok(listing.into_vec())
    }
}

impl SecureClient {
    /// `GET /lessons/:id`
    pub async fn lesson(&self, id: &str) -> Result<Lesson, ApiError> {
        self.send(self.request(Method::GET, &format!("/lessons/{}", segment(id))))
            .await
    }

    /// `GET /lessons`: every lesson, for moderation.
    pub async fn all_lessons(&self) -> Result<Vec<Lesson>, ApiError> {
        self.send(self.request(Method::GET, "/lessons")).await
    }

    /// `GET /lessons/my?email=`
    pub async fn my_lessons(&self, email: &str) -> Result<Vec<Lesson>, ApiError> {
        let req = self
            .request(Method::GET, "/lessons/my")
            .query(&[("email", email)]);
        self.send(req).await
    }

    /// `POST /lessons`, returning the new lesson's id.
    pub async fn create_lesson(&self, lesson: &NewLesson) -> Result<String, ApiError> {
        let req = self.request(Method::POST, "/lessons").json(lesson);
        let inserted: Inserted = self.send(req).await?;
        inserted
            .inserted_id
            .ok_or_else(|| ApiError::Decode("lesson was not created".to_string()))
    }

    /// `PATCH /lessons/:id`
    pub async fn update_lesson(&self, id: &str, patch: &LessonPatch) -> Result<(), ApiError> {
        let req = self
            .request(Method::PATCH, &format!("/lessons/{}", segment(id)))
            .json(patch);
        self.send_empty(req).await
    }

    /// `DELETE /lessons/:id`: admin removal.
    pub async fn delete_lesson(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/lessons/{}", segment(id))))
            .await
    }

    /// `DELETE /lessons/my/:id`: owner removal.
    pub async fn delete_my_lesson(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/lessons/my/{}", segment(id))))
            .await
    }

    /// `PATCH /lessons/:id/like`
    pub async fn toggle_like(&self, id: &str, email: &str) -> Result<LikeStatus, ApiError> {
        let req = self
            .request(Method::PATCH, &format!("/lessons/{}/like", segment(id)))
            .json(&json!({ "email": email }));
        self.send(req).await
    }

    /// `GET /lessons/:id/comments`
    pub async fn comments(&self, id: &str) -> Result<Vec<Comment>, ApiError> {
        self.send(self.request(Method::GET, &format!("/lessons/{}/comments", segment(id))))
            .await
    }

    /// `POST /lessons/:id/comments`
    pub async fn add_comment(&self, id: &str, comment: &NewComment) -> Result<(), ApiError> {
        let req = self
            .request(Method::POST, &format!("/lessons/{}/comments", segment(id)))
            .json(comment);
        self.send_empty(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedHttp;

    #[tokio::test]
    async fn test_home_feeds() {
        let server = ScriptedHttp::serve(vec![
            (200, r#"{"lessons":[{"_id":"l1","title":"Slow down","savesCount":5}]}"#),
            (200, r#"[{"_id":"u1","name":"Ana","totalLessons":3,"totalSaves":9}]"#),
        ])
        .await;
        let client = PublicClient::new(&server.base_url);

        let featured = client.featured_lessons().await.unwrap();
        let contributors = client.top_contributors().await.unwrap();

        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].saves_count, 5);
        assert_eq!(contributors[0].name, "Ana");
        assert_eq!(contributors[0].total_saves, 9);
        assert_eq!(server.paths(), vec!["/lessons/featured", "/stats/top-contributors"]);
    }

    #[tokio::test]
    async fn test_featured_failure_is_reported() {
        let server = ScriptedHttp::serve(vec![(500, r#"{"message":"boom"}"#)]).await;
        let client = PublicClient::new(&server.base_url);

        assert!(client.featured_lessons().await.is_err());
    }
}
