use serde::{Deserialize, Serialize};

/// A moderation report against a lesson.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub lesson_id: String,
    #[serde(default)]
    pub lesson_title: String,
    #[serde(default)]
    pub reason: String,
    pub reporter_email: Option<String>,
    pub created_at: Option<String>,
}

/// Body of `POST /reports`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub lesson_id: String,
    pub lesson_title: String,
    pub reason: String,
    pub reporter_email: String,
}
