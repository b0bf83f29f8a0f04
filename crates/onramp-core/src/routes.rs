//! Site route table.
//!
//! Two pages, the landing page and the signup wizard, plus the legacy
//! in-page anchor routes that scroll the landing page to a section.

use serde::Serialize;
use std::time::Duration;

/// Delay between navigation and scrolling to an anchor section, so the page
/// has rendered before the scroll.
pub const SECTION_SCROLL_DELAY: Duration = Duration::from_millis(100);

/// Page a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// Marketing landing page
    Landing,
    /// Multi-step signup wizard
    Signup,
}

/// A named route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Route name
    pub name: &'static str,
    /// Path, including the anchor for section routes
    pub path: &'static str,
    /// Rendered page
    pub page: Page,
}

/// All routes, landing first.
pub const ROUTES: &[Route] = &[
    Route { name: "landing", path: "/", page: Page::Landing },
    Route { name: "landing-hero", path: "/#hero", page: Page::Landing },
    Route { name: "landing-features", path: "/#features", page: Page::Landing },
    Route { name: "landing-about", path: "/#about", page: Page::Landing },
    Route { name: "landing-contact", path: "/#contact", page: Page::Landing },
    Route { name: "signup", path: "/signup", page: Page::Signup },
];

/// Finds the route for a path.
pub fn resolve(path: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.path == path)
}

/// Finds a route by name.
pub fn by_name(name: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.name == name)
}

/// Returns the element selector to scroll to after navigating to `path`.
///
/// Only anchor routes (`/#section`) have one.
pub fn section_for(path: &str) -> Option<&str> {
    path.strip_prefix('/')
        .filter(|rest| rest.starts_with('#') && rest.len() > 1)
}

/// Vertical scroll target after a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollPosition {
    /// Offset from the top, in pixels
    pub top: f64,
    /// Whether the browser should animate the scroll
    pub smooth: bool,
}

impl ScrollPosition {
    /// Smooth scroll to the top of the page.
    pub const TOP: ScrollPosition = ScrollPosition { top: 0.0, smooth: true };
}

/// Decides where to scroll after navigating from `from` to `to`.
///
/// Changing path always goes to the top (anchor routes then scroll to their
/// section after [`SECTION_SCROLL_DELAY`]); staying on the same path restores
/// the saved position when there is one.
pub fn scroll_position(to: &str, from: &str, saved: Option<ScrollPosition>) -> ScrollPosition {
    if to != from {
        return ScrollPosition::TOP;
    }
    saved.unwrap_or(ScrollPosition::TOP)
}
