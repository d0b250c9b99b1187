//! Configuration Tests

use figment::Jail;
use shim_domain::error::Error;
use shim_infrastructure::config::{ConfigLoader, ShimConfig};
use shim_infrastructure::config::loader::validate_config;
use shim_providers::constants::AGENT_KEEP_ALIVE_TIMEOUT_MS;

#[test]
fn test_defaults() {
    let config = ShimConfig::default();
    assert_eq!(config.agents.keep_alive_timeout_ms, AGENT_KEEP_ALIVE_TIMEOUT_MS);
    assert_eq!(config.agents.keep_alive_timeout_ms, 300_000);
    assert!(config.runtime.polyfill_abort_controller);
    assert!(config.runtime.file_from_path);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_file_and_env_layers() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "shim.toml",
            r#"
                [agents]
                keep_alive_timeout_ms = 60000
                user_agent = "from-file"

                [runtime]
                polyfill_abort_controller = false
            "#,
        )?;
        jail.set_env("SHIM__AGENTS__USER_AGENT", "from-env");
        jail.set_env("SHIM__LOGGING__LEVEL", "debug");

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;

        assert_eq!(config.agents.keep_alive_timeout_ms, 60_000);
        assert_eq!(config.agents.user_agent, "from-env");
        assert!(!config.runtime.polyfill_abort_controller);
        assert!(config.runtime.file_from_path);
        assert_eq!(config.logging.level, "debug");
        Ok(())
    });
}

#[test]
fn test_explicit_missing_path_falls_back_to_defaults() {
    Jail::expect_with(|jail| {
        let missing = jail.directory().join("nowhere.toml");
        let config = ConfigLoader::new()
            .with_config_path(&missing)
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(config, ShimConfig::default());
        Ok(())
    });
}

#[test]
fn test_zero_keep_alive_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("SHIM__AGENTS__KEEP_ALIVE_TIMEOUT_MS", "0");

        let result = ConfigLoader::new().load();
        assert!(matches!(result, Err(Error::Configuration { .. })));
        Ok(())
    });
}

#[test]
fn test_unknown_log_level_rejected() {
    let mut config = ShimConfig::default();
    config.logging.level = "chatty".to_string();
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.toml");

    let mut config = ShimConfig::default();
    config.agents.max_idle_per_host = 3;
    config.runtime.file_from_path = false;

    let loader = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("SHIM_SAVE_TEST");
    loader.save_to_file(&config, &path).unwrap();

    assert_eq!(loader.load().unwrap(), config);
}
