//! Favorite button state for one lesson.
//!
//! Updates are pessimistic: the UI asks [`FavoriteToggle::next_action`] for
//! the request to send, and only after it succeeds calls
//! [`FavoriteToggle::settle`]. A failed request leaves the state untouched.

use crate::client::FavoriteSettled;
use crate::models::Favorite;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteAction {
    Add { lesson_id: String },
    Remove { favorite_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    lesson_id: String,
    favorite_id: Option<String>,
}

impl FavoriteToggle {
    pub fn new(lesson_id: impl Into<String>, favorite_id: Option<String>) -> Self {
        Self {
            lesson_id: lesson_id.into(),
            favorite_id,
        }
    }

    /// Initial state from the user's favorites list.
    pub fn from_favorites(lesson_id: &str, favorites: &[Favorite]) -> Self {
        let favorite_id = favorites
            .iter()
            .find(|f| f.lesson_id() == lesson_id)
            .map(|f| f.id.clone());
        Self::new(lesson_id, favorite_id)
    }

    pub fn lesson_id(&self) -> &str {
        &self.lesson_id
    }

    pub fn is_favorited(&self) -> bool {
        self.favorite_id.is_some()
    }

    pub fn next_action(&self) -> FavoriteAction {
        match &self.favorite_id {
            Some(id) => FavoriteAction::Remove {
                favorite_id: id.clone(),
            },
            None => FavoriteAction::Add {
                lesson_id: self.lesson_id.clone(),
            },
        }
    }

    pub fn apply_added(&mut self, favorite_id: String) {
        self.favorite_id = Some(favorite_id);
    }

    pub fn apply_removed(&mut self) {
        self.favorite_id = None;
    }

    pub fn settle(&mut self, settled: FavoriteSettled) {
        match settled {
            FavoriteSettled::Added { favorite_id } => self.apply_added(favorite_id),
            FavoriteSettled::Removed => self.apply_removed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut toggle = FavoriteToggle::new("l1", None);
        assert!(!toggle.is_favorited());
        assert_eq!(toggle.next_action(), FavoriteAction::Add { lesson_id: "l1".into() });

        toggle.settle(FavoriteSettled::Added { favorite_id: "f9".into() });
        assert!(toggle.is_favorited());
        assert_eq!(toggle.next_action(), FavoriteAction::Remove { favorite_id: "f9".into() });

        toggle.settle(FavoriteSettled::Removed);
        assert_eq!(toggle, FavoriteToggle::new("l1", None));
    }

    #[test]
    fn test_from_favorites() {
        let favorites: Vec<Favorite> = serde_json::from_str(
            r#"[{"_id":"f1","lessonId":"l1"},{"_id":"f2","lesson":{"_id":"l2","title":"t"}}]"#,
        )
        .unwrap();

        assert_eq!(
            FavoriteToggle::from_favorites("l2", &favorites).next_action(),
            FavoriteAction::Remove { favorite_id: "f2".into() }
        );
        assert!(!FavoriteToggle::from_favorites("l3", &favorites).is_favorited());
    }
}
