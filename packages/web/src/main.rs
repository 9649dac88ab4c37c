use dioxus::prelude::*;

use store::LessonsConfig;
use ui::{AuthProvider, Services, ToastHost};
use views::{
    AddLesson, AdminHome, AdminLayout, AuthCallback, AuthLayout, DashboardLayout, Home,
    LessonDetails, Login, ManageLessons, ManageUsers, MyFavorites, MyLessons, NotFound,
    PaymentCancel, PaymentSuccess, Pricing, PrivateLayout, Profile, PublicLessons, Register,
    ReportedLessons, RootLayout, UpdateLesson, UserHome,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(RootLayout)]
        #[route("/")]
        Home {},
        #[route("/lessons")]
        PublicLessons {},
        #[route("/pricing")]
        Pricing {},
        #[route("/payment/success?:session_id")]
        PaymentSuccess { session_id: String },
        #[route("/payment/cancel")]
        PaymentCancel {},
        #[layout(PrivateLayout)]
            #[route("/lessons/:id")]
            LessonDetails { id: String },
        #[end_layout]
    #[end_layout]

    #[layout(AuthLayout)]
        #[route("/auth/login")]
        Login {},
        #[route("/auth/register")]
        Register {},
        #[route("/auth/callback")]
        AuthCallback {},
    #[end_layout]

    #[layout(DashboardLayout)]
        #[route("/dashboard")]
        UserHome {},
        #[route("/dashboard/add-lesson")]
        AddLesson {},
        #[route("/dashboard/my-lessons")]
        MyLessons {},
        #[route("/dashboard/update-lesson/:id")]
        UpdateLesson { id: String },
        #[route("/dashboard/my-favorites")]
        MyFavorites {},
        #[route("/dashboard/profile")]
        Profile {},
        #[layout(AdminLayout)]
            #[route("/dashboard/admin")]
            AdminHome {},
            #[route("/dashboard/manage-users")]
            ManageUsers {},
            #[route("/dashboard/manage-lessons")]
            ManageLessons {},
            #[route("/dashboard/reported-lessons")]
            ReportedLessons {},
        #[end_layout]
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Client configuration, embedded at build time.
const CONFIG_TOML: &str = include_str!("../lessons.toml");

fn load_config() -> LessonsConfig {
    match LessonsConfig::from_toml(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid {}, using defaults: {e}", LessonsConfig::filename());
            LessonsConfig::default()
        }
    }
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| {
        let config = load_config();
        tracing::info!("Backend at {}", config.base_url());
        Services::for_browser(config)
    });

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Title { "Digital Life Lessons" }

        ToastHost {
            AuthProvider {
                Router::<Route> {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::access::{ADMIN_HOME_PATH, DASHBOARD_PATH, LOGIN_PATH, PRICING_PATH};

    #[test]
    fn test_shared_paths_match_routes() {
        assert_eq!(Route::Login {}.to_string(), LOGIN_PATH);
        assert_eq!(Route::UserHome {}.to_string(), DASHBOARD_PATH);
        assert_eq!(Route::AdminHome {}.to_string(), ADMIN_HOME_PATH);
        assert_eq!(Route::Pricing {}.to_string(), PRICING_PATH);
    }
}
