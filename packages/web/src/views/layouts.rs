//! Route layouts: page chrome and guards.

use dioxus::prelude::*;
use ui::{AdminRoute, DashboardSidebar, Footer, Navbar, PrivateRoute};

use crate::Route;

#[component]
pub fn RootLayout() -> Element {
    rsx! {
        div {
            class: "min-h-screen flex flex-col",
            Navbar {}
            main { class: "flex-1", Outlet::<Route> {} }
            Footer {}
        }
    }
}

#[component]
pub fn AuthLayout() -> Element {
    rsx! {
        div {
            class: "auth-shell",
            Link { class: "auth-brand", to: Route::Home {}, "Digital Life Lessons" }
            div { class: "auth-card", Outlet::<Route> {} }
        }
    }
}

/// Signed-in only pages outside the dashboard.
#[component]
pub fn PrivateLayout() -> Element {
    let route = use_route::<Route>();
    rsx! {
        PrivateRoute { from: route.to_string(), Outlet::<Route> {} }
    }
}

#[component]
pub fn DashboardLayout() -> Element {
    let route = use_route::<Route>();
    let services = ui::use_services();
    let auth = ui::use_auth();

    let is_admin = use_resource(move || {
        let state = auth();
        let accounts = services.accounts.clone();
        async move {
            let email = state.email().filter(|_| !state.loading)?;
            accounts.is_admin(&email).await.ok()
        }
    });
    let is_admin = is_admin().flatten().unwrap_or(false);

    rsx! {
        PrivateRoute {
            from: route.to_string(),
            div {
                class: "min-h-screen flex",
                DashboardSidebar { is_admin, active: route.to_string() }
                main {
                    class: "flex-1 bg-gray-50",
                    div {
                        class: "dashboard-topbar",
                        Link { class: "nav-link", to: Route::Home {}, "← Back to site" }
                        ui::LogoutButton { class: "btn btn-outline btn-sm" }
                    }
                    Outlet::<Route> {}
                }
            }
        }
    }
}

/// Admin pages; nested inside the dashboard, so the user is already signed in.
#[component]
pub fn AdminLayout() -> Element {
    let route = use_route::<Route>();
    rsx! {
        AdminRoute { from: route.to_string(), Outlet::<Route> {} }
    }
}
