/*!
 * Tests for application configuration functionality
 */

use std::fs;

use lingoswitch::app_config::Config;

#[test]
fn from_file_reads_provider_sections() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("conf.json");
    fs::write(
        &path,
        r#"{
            "default_provider": "deepl",
            "deepl": {"api_key": "dk"},
            "baidu": {"app_id": "id", "secret_key": "sk"},
            "microsoft": {"api_key": "mk", "region": "westeurope"},
            "libretranslate": {"custom_instances": ["https://my.libre.example"]}
        }"#,
    )
    .expect("write config");

    let config = Config::from_file(&path).expect("load config");
    assert_eq!(config.default_provider, "deepl");
    assert_eq!(config.deepl.api_key.as_deref(), Some("dk"));
    assert_eq!(config.baidu.app_id.as_deref(), Some("id"));
    assert_eq!(config.microsoft.region, "westeurope");
    assert_eq!(
        config.libretranslate.custom_instances,
        vec!["https://my.libre.example"]
    );
    // Untouched sections keep their defaults
    assert!(config.google.api_key.is_none());
    assert!(config.mymemory.endpoint.is_none());
}

#[test]
fn from_file_rejects_missing_and_invalid_files() {
    assert!(Config::from_file("/nonexistent/conf.json").is_err());

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").expect("write file");
    assert!(Config::from_file(&path).is_err());
}

#[test]
fn env_overrides_fill_missing_values_only() {
    // set_var is unsafe in edition 2024; this test is the only writer of
    // these variables
    unsafe {
        std::env::set_var("BAIDU_APP_ID", "env-id");
        std::env::set_var("BAIDU_SECRET_KEY", "env-sk");
    }

    let mut config = Config::default();
    config.baidu.secret_key = Some("file-sk".to_string());
    let config = config.with_env_overrides();

    assert_eq!(config.baidu.app_id.as_deref(), Some("env-id"));
    // File value wins over the environment
    assert_eq!(config.baidu.secret_key.as_deref(), Some("file-sk"));

    unsafe {
        std::env::remove_var("BAIDU_APP_ID");
        std::env::remove_var("BAIDU_SECRET_KEY");
    }
}
