use reqwest::Method;
use serde::Deserialize;

use super::{segment, SecureClient};
use crate::error::ApiError;
use crate::models::{AdminStats, NewReport, Report, Visibility};

#[derive(Deserialize)]
struct VisibilityChange {
    visibility: Option<Visibility>,
}

impl SecureClient {
    /// `GET /admin/stats`
    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.send(self.request(Method::GET, "/admin/stats")).await
    }

    /// `PATCH /admin/lessons/:id/toggle-visibility`, returning the new visibility
    /// when the backend reports it.
    pub async fn toggle_lesson_visibility(&self, id: &str) -> Result<Option<Visibility>, ApiError> {
        let req = self.request(
            Method::PATCH,
            &format!("/admin/lessons/{}/toggle-visibility", segment(id)),
        );
        let change: VisibilityChange = self.send(req).await?;
        Ok(change.visibility)
    }

    /// `GET /reports`
    pub async fn reports(&self) -> Result<Vec<Report>, ApiError> {
        self.send(self.request(Method::GET, "/reports")).await
    }

    /// `POST /reports`
    pub async fn submit_report(&self, report: &NewReport) -> Result<(), ApiError> {
        let req = self.request(Method::POST, "/reports").json(report);
        self.send_empty(req).await
    }
}
