use api::access::PRICING_PATH;
use dioxus::prelude::*;

use crate::icons::brands::{FaFacebook, FaInstagram, FaTwitter, FaYoutube};
use crate::Icon;

#[component]
pub fn Footer() -> Element {
    rsx! {
        footer {
            class: "footer",
            div {
                class: "max-w-6xl mx-auto px-4 grid grid-cols-1 md:grid-cols-3 gap-8",
                div {
                    class: "flex items-center gap-3",
                    span { class: "logo-mark", "DL" }
                    h2 { class: "font-semibold text-lg text-gray-900", "Digital Life Lessons" }
                }
                div {
                    h3 { class: "font-semibold text-gray-900 mb-3", "Contact Info" }
                    p { class: "text-sm text-gray-700", "Email: support@digitallessons.com" }
                    p { class: "text-sm text-gray-700", "Phone: +880 1234-567890" }
                    p { class: "text-sm text-gray-700", "Dhaka, Bangladesh" }
                }
                div {
                    h3 { class: "font-semibold text-gray-900 mb-3", "Quick Links" }
                    ul {
                        class: "space-y-2 text-sm text-gray-700",
                        li { Link { to: "/lessons", "Public Lessons" } }
                        li { Link { to: PRICING_PATH, "Pricing" } }
                        li { Link { to: "/dashboard", "Dashboard" } }
                    }
                }
            }
            div {
                class: "max-w-6xl mx-auto px-4 flex justify-between items-center mt-10 pt-5 border-t",
                p { class: "text-gray-500 text-sm", "© Digital Life Lessons. All rights reserved." }
                div {
                    class: "flex gap-4 text-gray-600",
                    a { href: "https://facebook.com", target: "_blank", rel: "noreferrer",
                        Icon { icon: FaFacebook, width: 18, height: 18 }
                    }
                    a { href: "https://twitter.com", target: "_blank", rel: "noreferrer",
                        Icon { icon: FaTwitter, width: 18, height: 18 }
                    }
                    a { href: "https://instagram.com", target: "_blank", rel: "noreferrer",
                        Icon { icon: FaInstagram, width: 18, height: 18 }
                    }
                    a { href: "https://youtube.com", target: "_blank", rel: "noreferrer",
                        Icon { icon: FaYoutube, width: 18, height: 18 }
                    }
                }
            }
        }
    }
}
