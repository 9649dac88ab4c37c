//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
    pub mod brands {
        pub use dioxus_free_icons::icons::fa_brands_icons::*;
    }
}

mod services;
pub use services::{location_fragment, make_store, nonce, use_services, BrowserRedirect, Services};

mod auth;
pub use auth::{
    use_account, use_auth, use_return_to, AuthProvider, AuthState, GoogleButton, LogoutButton,
};

mod guard;
pub use guard::{AdminRoute, PrivateRoute};

pub mod toast;
pub use toast::{notify, use_toasts, ToastHost, ToastLevel};

mod spinner;
pub use spinner::Spinner;

mod navbar;
pub use navbar::Navbar;

mod footer;
pub use footer::Footer;

mod sidebar;
pub use sidebar::DashboardSidebar;

mod lesson_card;
pub use lesson_card::{LessonCard, StatCard};
