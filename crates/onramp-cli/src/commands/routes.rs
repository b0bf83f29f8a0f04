//! `onramp routes`

use onramp_core::routes::{Page, ROUTES, SECTION_SCROLL_DELAY, section_for};

/// One line per route; anchor routes show their scroll target.
pub fn render() -> String {
    let mut out = String::new();
    for route in ROUTES {
        let page = match route.page {
            Page::Landing => "landing",
            Page::Signup => "signup",
        };
        out.push_str(&format!("{:<18} {:<12} {page}", route.name, route.path));
        if let Some(section) = section_for(route.path) {
            out.push_str(&format!(
                " (scrolls to {section} after {}ms)",
                SECTION_SCROLL_DELAY.as_millis()
            ));
        }
        out.push('\n');
    }
    out
}
