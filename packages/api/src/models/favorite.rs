use serde::{Deserialize, Serialize};

use super::Lesson;

/// A saved lesson.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub lesson_id: String,
    pub lesson: Option<Lesson>,
}

impl Favorite {
    /// Lesson id, preferring the embedded lesson when the link field is missing.
    pub fn lesson_id(&self) -> &str {
        if self.lesson_id.is_empty() {
            self.lesson.as_ref().map(|l| l.id.as_str()).unwrap_or("")
        } else {
            &self.lesson_id
        }
    }
}

/// `GET /favorites` has shipped both as a bare array and wrapped in an object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FavoriteList {
    Bare(Vec<Favorite>),
    Wrapped {
        #[serde(default)]
        favorites: Vec<Favorite>,
    },
}

impl FavoriteList {
    pub fn into_vec(self) -> Vec<Favorite> {
        match self {
            FavoriteList::Bare(v) => v,
            FavoriteList::Wrapped { favorites } => favorites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_list_shapes_decode() {
        let bare: FavoriteList =
            serde_json::from_str(r#"[{"_id":"f1","lessonId":"l1"}]"#).unwrap();
        let wrapped: FavoriteList =
            serde_json::from_str(r#"{"favorites":[{"_id":"f1","lessonId":"l1"}]}"#).unwrap();

        assert_eq!(bare.into_vec(), wrapped.into_vec());
    }

    #[test]
    fn test_lesson_id_falls_back_to_embedded_lesson() {
        let fav: Favorite =
            serde_json::from_str(r#"{"_id":"f1","lesson":{"_id":"l9","title":"t"}}"#).unwrap();
        assert_eq!(fav.lesson_id(), "l9");
    }
}
