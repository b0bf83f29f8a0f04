//! `onramp platforms`

use onramp_core::platforms::PLATFORMS;

/// One line per supported platform.
pub fn render() -> String {
    let mut out = String::new();
    for platform in PLATFORMS {
        out.push_str(&format!(
            "{} {:<8} {:<8} {}\n",
            platform.icon, platform.key, platform.label, platform.description
        ));
    }
    out
}
