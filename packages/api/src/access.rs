//! Access decisions for guarded routes and premium content.
//!
//! Pure functions so the redirect rules can be tested without a renderer.

use crate::models::{AccessLevel, Lesson};

pub const LOGIN_PATH: &str = crate::client::LOGIN_PATH;
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ADMIN_HOME_PATH: &str = "/dashboard/admin";
pub const PRICING_PATH: &str = "/pricing";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    /// Any signed-in user.
    Private,
    /// Signed-in users whose admin flag is set.
    Admin,
}

/// Where the identity provider stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Resolving,
    SignedOut,
    SignedIn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Render the loading placeholder.
    Loading,
    Allow,
    /// Replace-navigate, so the guarded URL does not stay in history.
    Redirect { to: &'static str },
}

/// Decide what a guarded route renders.
///
/// `admin` is the memoized admin flag for the signed-in email: `None` while
/// the lookup is outstanding. A failed lookup should be passed as
/// `Some(false)`.
pub fn route_access(guard: RouteGuard, phase: AuthPhase, admin: Option<bool>) -> Access {
    match phase {
        AuthPhase::Resolving => Access::Loading,
        AuthPhase::SignedOut => Access::Redirect { to: LOGIN_PATH },
        AuthPhase::SignedIn => match guard {
            RouteGuard::Private => Access::Allow,
            RouteGuard::Admin => match admin {
                None => Access::Loading,
                Some(true) => Access::Allow,
                Some(false) => Access::Redirect { to: DASHBOARD_PATH },
            },
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonAccess {
    Full,
    /// Body withheld; show the upgrade prompt.
    Locked,
}

pub fn lesson_access(lesson: &Lesson, viewer_is_premium: bool) -> LessonAccess {
    if lesson.access_level == AccessLevel::Premium && !viewer_is_premium {
        LessonAccess::Locked
    } else {
        LessonAccess::Full
    }
}

/// Only premium users may publish premium lessons.
pub fn can_author(level: AccessLevel, author_is_premium: bool) -> bool {
    level == AccessLevel::Free || author_is_premium
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_route() {
        use AuthPhase::*;
        assert_eq!(route_access(RouteGuard::Private, Resolving, None), Access::Loading);
        assert_eq!(
            route_access(RouteGuard::Private, SignedOut, None),
            Access::Redirect { to: "/auth/login" }
        );
        assert_eq!(route_access(RouteGuard::Private, SignedIn, None), Access::Allow);
    }

    #[test]
    fn test_admin_route_waits_for_flag() {
        assert_eq!(
            route_access(RouteGuard::Admin, AuthPhase::SignedIn, None),
            Access::Loading
        );
    }

    #[test]
    fn test_admin_route_redirects_non_admins_to_dashboard() {
        assert_eq!(
            route_access(RouteGuard::Admin, AuthPhase::SignedIn, Some(false)),
            Access::Redirect { to: "/dashboard" }
        );
        assert_eq!(
            route_access(RouteGuard::Admin, AuthPhase::SignedIn, Some(true)),
            Access::Allow
        );
    }

    #[test]
    fn test_admin_route_signed_out_goes_to_login_not_dashboard() {
        for flag in [None, Some(true), Some(false)] {
            assert_eq!(
                route_access(RouteGuard::Admin, AuthPhase::SignedOut, flag),
                Access::Redirect { to: LOGIN_PATH }
            );
        }
    }

    #[test]
    fn test_lesson_access() {
        let mut lesson = Lesson {
            access_level: AccessLevel::Premium,
            ..Lesson::default()
        };
        assert_eq!(lesson_access(&lesson, false), LessonAccess::Locked);
        assert_eq!(lesson_access(&lesson, true), LessonAccess::Full);

        lesson.access_level = AccessLevel::Free;
        assert_eq!(lesson_access(&lesson, false), LessonAccess::Full);
    }

    #[test]
    fn test_can_author() {
        assert!(can_author(AccessLevel::Free, false));
        assert!(!can_author(AccessLevel::Premium, false));
        assert!(can_author(AccessLevel::Premium, true));
    }
}
