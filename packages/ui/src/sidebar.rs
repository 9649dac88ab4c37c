use dioxus::prelude::*;

use crate::icons::{FaBook, FaChartBar, FaFlag, FaHeart, FaHouse, FaLayerGroup, FaPlus, FaUser, FaUsers};
use crate::Icon;

/// Dashboard navigation. Admin links are listed only for admins.
#[component]
pub fn DashboardSidebar(is_admin: bool, active: String) -> Element {
    let item = |to: &'static str| {
        if active == to {
            "sidebar-link active"
        } else {
            "sidebar-link"
        }
    };

    rsx! {
        aside {
            class: "sidebar",
            h2 { class: "text-lg font-bold mb-4", "Dashboard" }

            ul {
                class: "space-y-1",
                li {
                    Link { class: item("/dashboard"), to: "/dashboard",
                        Icon { icon: FaHouse, width: 14, height: 14 }
                        span { "Overview" }
                    }
                }
                li {
                    Link { class: item("/dashboard/add-lesson"), to: "/dashboard/add-lesson",
                        Icon { icon: FaPlus, width: 14, height: 14 }
                        span { "Add Lesson" }
                    }
                }
                li {
                    Link { class: item("/dashboard/my-lessons"), to: "/dashboard/my-lessons",
                        Icon { icon: FaBook, width: 14, height: 14 }
                        span { "My Lessons" }
                    }
                }
                li {
                    Link { class: item("/dashboard/my-favorites"), to: "/dashboard/my-favorites",
                        Icon { icon: FaHeart, width: 14, height: 14 }
                        span { "My Favorites" }
                    }
                }
                li {
                    Link { class: item("/dashboard/profile"), to: "/dashboard/profile",
                        Icon { icon: FaUser, width: 14, height: 14 }
                        span { "Profile" }
                    }
                }
            }

            if is_admin {
                h3 { class: "text-xs uppercase tracking-wide text-gray-400 mt-6 mb-2", "Admin" }
                ul {
                    class: "space-y-1",
                    li {
                        Link { class: item("/dashboard/admin"), to: "/dashboard/admin",
                            Icon { icon: FaChartBar, width: 14, height: 14 }
                            span { "Admin Home" }
                        }
                    }
                    li {
                        Link { class: item("/dashboard/manage-users"), to: "/dashboard/manage-users",
                            Icon { icon: FaUsers, width: 14, height: 14 }
                            span { "Manage Users" }
                        }
                    }
                    li {
                        Link { class: item("/dashboard/manage-lessons"), to: "/dashboard/manage-lessons",
                            Icon { icon: FaLayerGroup, width: 14, height: 14 }
                            span { "Manage Lessons" }
                        }
                    }
                    li {
                        Link { class: item("/dashboard/reported-lessons"), to: "/dashboard/reported-lessons",
                            Icon { icon: FaFlag, width: 14, height: 14 }
                            span { "Reported Lessons" }
                        }
                    }
                }
            }
        }
    }
}
