//! Data models exchanged with the backend.

mod favorite;
mod highlight;
mod lesson;
mod report;
mod stats;
mod user;

pub use favorite::{Favorite, FavoriteList};
pub use highlight::{Contributor, Highlight, Listing};
pub use lesson::{
    AccessLevel, Comment, LessonPage, LessonPatch, LessonQuery, LessonSort, LikeStatus, Lesson,
    NewComment, NewLesson, Pagination, Visibility, CATEGORIES, PAGE_SIZE, TONES,
};
pub use report::{NewReport, Report};
pub use stats::AdminStats;
pub use user::{AppUser, UserUpsert};

pub(crate) use user::{AdminFlag, TokenGrant};

use serde::{Deserialize, Deserializer};

/// `{ "insertedId": "..." }` returned by create endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Inserted {
    #[serde(rename = "insertedId", default)]
    pub inserted_id: Option<String>,
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Render a backend timestamp as a short local-style date, or pass it through
/// unchanged when it is not RFC 3339.
pub fn display_date(raw: Option<&str>) -> String {
    match raw {
        Some(s) => chrono::DateTime::parse_from_rfc3339(s)
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|_| s.to_string()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date() {
        assert_eq!(display_date(Some("2024-03-05T10:00:00.000Z")), "Mar 5, 2024");
        assert_eq!(display_date(Some("yesterday")), "yesterday");
        assert_eq!(display_date(None), "");
    }
}
