//! Platform catalog.
//!
//! Static display metadata for the social platforms a customer can pick in
//! the wizard. Lookups never fail: unknown keys get fallback values.

use serde::Serialize;

/// Icon shown for platforms missing from the catalog.
pub const FALLBACK_ICON: &str = "📱";

/// Display metadata for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformConfig {
    /// Key stored in `selected_platforms`
    pub key: &'static str,
    /// Display label
    pub label: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Emoji icon
    pub icon: &'static str,
    /// Logo path, relative to the site root
    pub image_path: Option<&'static str>,
}

/// All supported platforms, in display order.
pub const PLATFORMS: &[PlatformConfig] = &[
    PlatformConfig {
        key: "red",
        label: "Red",
        description: "China's leading social media platform",
        icon: "🔴",
        image_path: Some("/images/platforms/red.svg"),
    },
    PlatformConfig {
        key: "weibo",
        label: "Weibo",
        description: "China's Twitter equivalent",
        icon: "📱",
        image_path: Some("/images/platforms/weibo.svg"),
    },
    PlatformConfig {
        key: "wechat",
        label: "WeChat",
        description: "Multi-purpose messaging and social app",
        icon: "💬",
        image_path: Some("/images/platforms/wechat.svg"),
    },
    PlatformConfig {
        key: "douyin",
        label: "Douyin",
        description: "China's TikTok - short video platform",
        icon: "🎵",
        image_path: Some("/images/platforms/douyin.svg"),
    },
];

/// Looks up a platform by key.
pub fn find(key: &str) -> Option<&'static PlatformConfig> {
    PLATFORMS.iter().find(|p| p.key == key)
}

/// Returns `true` if the key is in the catalog.
pub fn is_known(key: &str) -> bool {
    find(key).is_some()
}

/// Display label, or the raw key when unknown.
pub fn label(key: &str) -> &str {
    find(key).map_or(key, |p| p.label)
}

/// Icon, or [`FALLBACK_ICON`] when unknown.
pub fn icon(key: &str) -> &'static str {
    find(key).map_or(FALLBACK_ICON, |p| p.icon)
}

/// Description, or an empty string when unknown.
pub fn description(key: &str) -> &'static str {
    find(key).map_or("", |p| p.description)
}

/// Logo path, if any.
pub fn image_path(key: &str) -> Option<&'static str> {
    find(key).and_then(|p| p.image_path)
}
