//! # Lessons, comments and the public listing
//!
//! A [`Lesson`] is owned by the backend; the client only ever holds the copy a
//! single response gave it. Two attributes drive client behaviour:
//!
//! | Field | Values | Effect |
//! |-------|--------|--------|
//! | [`AccessLevel`] | `free` / `premium` | Premium bodies are withheld from non-premium viewers (see [`crate::access::lesson_access`]). |
//! | [`Visibility`] | `public` / `private` | Only public lessons appear in `/lessons/public`; enforced server-side. |
//!
//! [`LessonQuery`] builds the query string for the public listing, dropping
//! every empty parameter the same way the listing page always has.

use serde::{Deserialize, Deserializer, Serialize};

use super::null_as_default;

/// Lessons per page in the public listing.
pub const PAGE_SIZE: u32 = 9;

/// Categories offered by the authoring form.
pub const CATEGORIES: &[&str] = &[
    "Self-Growth",
    "Productivity",
    "Relationships",
    "Mental Health",
    "Career",
    "Study Skills",
    "Money & Finance",
    "Other",
];

/// Emotional tones offered by the authoring form.
pub const TONES: &[&str] = &[
    "Reflective",
    "Hopeful",
    "Motivational",
    "Calm",
    "Sad",
    "Grateful",
    "Neutral",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    #[default]
    Free,
    Premium,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Free => "free",
            AccessLevel::Premium => "premium",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AccessLevel::Free => AccessLevel::Premium,
            AccessLevel::Premium => AccessLevel::Free,
        }
    }

    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("premium") {
            AccessLevel::Premium
        } else {
            AccessLevel::Free
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Visibility::Public => Visibility::Private,
            Visibility::Private => Visibility::Public,
        }
    }

    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("private") {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}

// Older records carry capitalised or null levels; anything unrecognised
// falls back to the default.
impl<'de> Deserialize<'de> for AccessLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(AccessLevel::parse).unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for Visibility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Visibility::parse).unwrap_or_default())
    }
}

/// A life lesson as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Older records keep the body here instead of `description`.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub details: String,
    pub category: Option<String>,
    pub emotional_tone: Option<String>,
    #[serde(default)]
    pub access_level: AccessLevel,
    #[serde(default)]
    pub visibility: Visibility,
    pub creator_email: Option<String>,
    pub creator_name: Option<String>,
    #[serde(rename = "creatorPhotoURL")]
    pub creator_photo_url: Option<String>,
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub saved_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments_count: u32,
}

impl Lesson {
    /// Full body, falling back to the short description.
    pub fn body(&self) -> &str {
        [&self.details, &self.description]
            .into_iter()
            .find(|b| !b.trim().is_empty())
            .unwrap_or(&self.short_description)
    }

    pub fn creator_display_name(&self) -> &str {
        self.creator_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Anonymous")
    }

    /// First letter of the creator's name for avatar placeholders.
    pub fn creator_initial(&self) -> String {
        self.creator_name
            .as_deref()
            .and_then(|n| n.chars().next())
            .unwrap_or('U')
            .to_uppercase()
            .to_string()
    }

    pub fn is_liked_by(&self, email: &str) -> bool {
        self.likes.iter().any(|e| e == email)
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        self.creator_email.as_deref() == Some(email)
    }
}

/// Body of `POST /lessons`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLesson {
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub category: String,
    pub emotional_tone: String,
    pub access_level: AccessLevel,
    pub visibility: Visibility,
    pub creator_email: String,
    pub creator_name: String,
    #[serde(rename = "creatorPhotoURL")]
    pub creator_photo_url: String,
}

/// Body of `PATCH /lessons/:id`; unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl LessonPatch {
    pub fn visibility(visibility: Visibility) -> Self {
        Self {
            visibility: Some(visibility),
            ..Self::default()
        }
    }

    pub fn access_level(level: AccessLevel) -> Self {
        Self {
            access_level: Some(level),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LessonSort {
    #[default]
    Newest,
    MostSaved,
}

impl LessonSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonSort::Newest => "newest",
            LessonSort::MostSaved => "mostSaved",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "mostSaved" => LessonSort::MostSaved,
            _ => LessonSort::Newest,
        }
    }
}

/// Filters for `GET /lessons/public`.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonQuery {
    pub search: String,
    pub category: String,
    pub tone: String,
    pub sort: LessonSort,
    pub page: u32,
    pub limit: u32,
}

impl Default for LessonQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            tone: String::new(),
            sort: LessonSort::Newest,
            page: 1,
            limit: PAGE_SIZE,
        }
    }
}

impl LessonQuery {
    /// Most-saved lessons for the home page.
    pub fn most_saved(limit: u32) -> Self {
        Self {
            sort: LessonSort::MostSaved,
            limit,
            ..Self::default()
        }
    }

    /// Query pairs with empty values dropped.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let search = self.search.trim();
        let pairs = [
            ("search", search.to_string()),
            ("category", self.category.clone()),
            ("tone", self.tone.clone()),
            ("sort", self.sort.as_str().to_string()),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        pairs
            .into_iter()
            .filter(|(_, v)| !v.is_empty() && v != "0")
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total: u32,
}

fn first_page() -> u32 {
    1
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            total: 0,
        }
    }
}

impl Pagination {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// One page of `GET /lessons/public`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LessonPage {
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl LessonPage {
    /// Distinct non-empty categories present on this page, in order of appearance.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.lessons.iter().filter_map(|l| l.category.as_deref()))
    }

    /// Distinct non-empty tones present on this page, in order of appearance.
    pub fn tones(&self) -> Vec<String> {
        distinct(self.lessons.iter().filter_map(|l| l.emotional_tone.as_deref()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values.filter(|v| !v.is_empty()) {
        if !out.iter().any(|o| o == v) {
            out.push(v.to_string());
        }
    }
    out
}

/// `PATCH /lessons/:id/like`
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatus {
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub likes_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub lesson_id: String,
    #[serde(default)]
    pub user_email: String,
    pub user_name: Option<String>,
    #[serde(default)]
    pub text: String,
    pub created_at: Option<String>,
}

impl Comment {
    pub fn author(&self) -> &str {
        self.user_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.user_email)
    }
}

/// Body of `POST /lessons/:id/comments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub text: String,
    pub user_email: String,
    pub user_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lesson_with_missing_fields() {
        let lesson: Lesson = serde_json::from_str(
            r#"{"_id":"l1","title":"Failing forward","shortDescription":"short","accessLevel":"premium"}"#,
        )
        .unwrap();

        assert_eq!(lesson.access_level, AccessLevel::Premium);
        assert_eq!(lesson.visibility, Visibility::Public);
        assert_eq!(lesson.body(), "short");
        assert_eq!(lesson.creator_display_name(), "Anonymous");
        assert_eq!(lesson.creator_initial(), "U");
        assert_eq!(lesson.saved_count, 0);
    }

    #[test]
    fn test_legacy_nulls_and_casing_decode() {
        let lessons: Vec<Lesson> = serde_json::from_str(
            r#"[
                {"_id":"a","accessLevel":"free","visibility":"public","savedCount":3},
                {"_id":"b","title":null,"accessLevel":null,"visibility":null,"savedCount":null,"likesCount":null,"likes":null,"commentsCount":null},
                {"_id":"c","accessLevel":"Premium","visibility":"Private"},
                {"_id":"d","accessLevel":"gold","visibility":"hidden"}
            ]"#,
        )
        .unwrap();

        assert_eq!(lessons.len(), 4);
        assert_eq!(lessons[0].saved_count, 3);

        assert_eq!(lessons[1].title, "");
        assert_eq!(lessons[1].access_level, AccessLevel::Free);
        assert_eq!(lessons[1].visibility, Visibility::Public);
        assert_eq!(lessons[1].saved_count, 0);
        assert!(lessons[1].likes.is_empty());

        assert_eq!(lessons[2].access_level, AccessLevel::Premium);
        assert_eq!(lessons[2].visibility, Visibility::Private);

        assert_eq!(lessons[3].access_level, AccessLevel::Free);
        assert_eq!(lessons[3].visibility, Visibility::Public);
    }

    #[test]
    fn test_levels_serialize_lowercase() {
        let body = serde_json::to_value(AccessLevel::Premium).unwrap();
        assert_eq!(body, serde_json::json!("premium"));
    }

    #[test]
    fn test_body_prefers_details_then_description() {
        let mut lesson = Lesson {
            short_description: "short".into(),
            description: "long".into(),
            ..Lesson::default()
        };
        assert_eq!(lesson.body(), "long");

        lesson.details = "edited".into();
        assert_eq!(lesson.body(), "edited");
    }

    #[test]
    fn test_query_drops_empty_params() {
        let query = LessonQuery {
            search: "  grit ".into(),
            category: String::new(),
            tone: "Hopeful".into(),
            ..LessonQuery::default()
        };

        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("search", "grit".to_string()),
                ("tone", "Hopeful".to_string()),
                ("sort", "newest".to_string()),
                ("page", "1".to_string()),
                ("limit", "9".to_string()),
            ]
        );
    }

    #[test]
    fn test_patch_only_serializes_set_fields() {
        let body = serde_json::to_value(LessonPatch::visibility(Visibility::Private)).unwrap();
        assert_eq!(body, serde_json::json!({ "visibility": "private" }));

        let body = serde_json::to_value(LessonPatch::access_level(AccessLevel::Premium)).unwrap();
        assert_eq!(body, serde_json::json!({ "accessLevel": "premium" }));
    }

    #[test]
    fn test_page_filters_are_distinct() {
        let page: LessonPage = serde_json::from_str(
            r#"{
                "lessons": [
                    {"_id":"1","category":"Career","emotionalTone":"Calm"},
                    {"_id":"2","category":"Career","emotionalTone":""},
                    {"_id":"3","category":"Productivity"}
                ],
                "pagination": {"page":2,"totalPages":3,"total":21}
            }"#,
        )
        .unwrap();

        assert_eq!(page.categories(), vec!["Career", "Productivity"]);
        assert_eq!(page.tones(), vec!["Calm"]);
        assert!(page.pagination.has_prev());
        assert!(page.pagination.has_next());
    }

    #[test]
    fn test_missing_pagination_is_single_page() {
        let page: LessonPage = serde_json::from_str(r#"{"lessons":[]}"#).unwrap();
        assert_eq!(page.pagination, Pagination::default());
        assert!(!page.pagination.has_next());
    }
}
