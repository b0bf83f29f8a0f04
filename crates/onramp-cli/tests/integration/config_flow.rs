//! Integration tests for config file handling.

use onramp_cli::OnrampConfig;
use onramp_cli::config_handlers::{cmd_config_init, lookup};

use crate::common::ConfigFixture;

#[test]
fn test_init_then_load_gives_defaults() {
    let fixture = ConfigFixture::with_content("");
    std::fs::remove_file(&fixture.path).unwrap();

    cmd_config_init(fixture.arg(), false).unwrap();
    let loaded = OnrampConfig::from_file(&fixture.path).unwrap();

    assert_eq!(loaded, OnrampConfig::default());
}

#[test]
fn test_file_values_are_visible_through_lookup() {
    let fixture = ConfigFixture::with_content(
        r#"
[backend]
url = "https://project.example.co"
timeout_secs = 5

[request]
referrer = "https://partner.test/"
"#,
    );

    let config = OnrampConfig::from_file(&fixture.path).unwrap();

    assert_eq!(lookup(&config, "backend.timeout_secs").unwrap(), "5");
    assert_eq!(lookup(&config, "request.referrer").unwrap(), "https://partner.test/");
    assert_eq!(
        config.request_metadata().referrer.as_deref(),
        Some("https://partner.test/")
    );
}

#[test]
fn test_unknown_sections_are_ignored() {
    let fixture = ConfigFixture::with_content("[telemetry]\nenabled = true\n");
    let config = OnrampConfig::from_file(&fixture.path).unwrap();
    assert_eq!(config.backend, OnrampConfig::default().backend);
}
