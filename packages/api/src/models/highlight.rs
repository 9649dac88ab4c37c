use serde::de::IgnoredAny;
use serde::Deserialize;

use super::null_as_default;

/// A lesson card on the landing page. The featured feed uses its own field
/// names, so the regular lesson names are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, alias = "shortDescription", deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "creatorName")]
    pub contributor_name: Option<String>,
    #[serde(default, alias = "savedCount", deserialize_with = "null_as_default")]
    pub saves_count: u32,
}

impl Highlight {
    pub fn category_label(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("Life Lesson")
    }

    pub fn contributor_label(&self) -> &str {
        self.contributor_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Anonymous")
    }
}

/// An entry of `GET /stats/top-contributors`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_lessons: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_saves: u32,
}

impl Contributor {
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .unwrap_or('U')
            .to_uppercase()
            .to_string()
    }
}

/// The home feeds answer with a bare array, an array under `lessons` or
/// `contributors`, or something else entirely, which reads as empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Lessons { lessons: Vec<T> },
    Contributors { contributors: Vec<T> },
    Other(IgnoredAny),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(v) => v,
            Listing::Lessons { lessons } => lessons,
            Listing::Contributors { contributors } => contributors,
            Listing::Other(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlights(json: &str) -> Vec<Highlight> {
        serde_json::from_str::<Listing<Highlight>>(json).unwrap().into_vec()
    }

    #[test]
    fn test_listing_shapes() {
        let bare = highlights(r#"[{"_id":"a","title":"Patience"}]"#);
        let wrapped = highlights(r#"{"lessons":[{"_id":"a","title":"Patience"}]}"#);
        assert_eq!(bare, wrapped);
        assert_eq!(bare[0].title, "Patience");

        let people: Vec<Contributor> =
            serde_json::from_str::<Listing<Contributor>>(r#"{"contributors":[{"_id":"u1","name":"ana"}]}"#)
                .unwrap()
                .into_vec();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].initial(), "A");
    }

    #[test]
    fn test_unexpected_payloads_read_as_empty() {
        assert!(highlights(r#"{"message":"no featured lessons"}"#).is_empty());
        assert!(highlights("null").is_empty());
        assert!(highlights(r#""oops""#).is_empty());
    }

    #[test]
    fn test_highlight_accepts_lesson_field_names() {
        let items = highlights(
            r#"[
                {"_id":"a","title":"Rest","summary":"Sleep first","contributorName":"Mo","savesCount":4,"category":"Mindset"},
                {"_id":"b","title":"Ask","shortDescription":"Ask early","creatorName":"Li","savedCount":2},
                {"_id":"c","title":null,"summary":null,"savesCount":null,"contributorName":""}
            ]"#,
        );

        assert_eq!(items[0].summary, "Sleep first");
        assert_eq!(items[0].saves_count, 4);
        assert_eq!(items[0].category_label(), "Mindset");
        assert_eq!(items[1].summary, "Ask early");
        assert_eq!(items[1].contributor_label(), "Li");
        assert_eq!(items[1].saves_count, 2);
        assert_eq!(items[1].category_label(), "Life Lesson");
        assert_eq!(items[2].title, "");
        assert_eq!(items[2].saves_count, 0);
        assert_eq!(items[2].contributor_label(), "Anonymous");
    }

    #[test]
    fn test_contributor_defaults() {
        let c: Contributor = serde_json::from_str(
            r#"{"name":"","photoURL":"https://img/c.png","totalLessons":7,"totalSaves":null}"#,
        )
        .unwrap();
        assert_eq!(c.initial(), "U");
        assert_eq!(c.total_lessons, 7);
        assert_eq!(c.total_saves, 0);
        assert_eq!(c.photo_url.as_deref(), Some("https://img/c.png"));
    }
}
