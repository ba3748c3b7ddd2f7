use cwl_upgrader::core::config::{ConfigLoader, CONFIG_FILE_NAME};
use cwl_upgrader::logging::{ConsoleOutput, LoggingConfig};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

fn clear_upgrader_env() {
    for v in &[
        "CWL_UPGRADER_EXTENSION",
        "CWL_UPGRADER_FAIL_FAST",
        "CWL_UPGRADER_LOG_LEVEL",
    ] {
        env::remove_var(v);
    }
}

/// One file feeds both the upgrade settings and the logging settings.
#[test]
#[serial]
fn test_shared_config_file() {
    clear_upgrader_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &config_path,
        r#"
[upgrade]
extension = "cwl3"

[batch]
fail_fast = true

[logging]
default_level = "warn"
console_output = "stdout"
enable_file = false
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(&config_path).unwrap();
    let options = config.batch_options();
    assert_eq!(options.extension, "cwl3");
    assert!(options.fail_fast);

    let logging = LoggingConfig::load(Some(&config_path), false).unwrap();
    assert_eq!(logging.default_level, "warn");
    assert_eq!(logging.console_output, Some(ConsoleOutput::Stdout));
    assert!(!logging.enable_file);
}

#[test]
#[serial]
fn test_environment_beats_file() {
    clear_upgrader_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &config_path,
        "[upgrade]\nextension = \"cwl3\"\n\n[logging]\ndefault_level = \"warn\"\n",
    )
    .unwrap();

    env::set_var("CWL_UPGRADER_EXTENSION", "yaml");
    env::set_var("CWL_UPGRADER_LOG_LEVEL", "trace");

    assert_eq!(
        ConfigLoader::load(&config_path).unwrap().upgrade.extension,
        "yaml"
    );
    assert_eq!(
        LoggingConfig::load(Some(&config_path), false)
            .unwrap()
            .default_level,
        "trace"
    );

    clear_upgrader_env();
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    clear_upgrader_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = ConfigLoader::resolve_path(None, temp_dir.path());

    let config = ConfigLoader::load(&config_path).unwrap();
    assert_eq!(config.upgrade.extension, "cwl");
    assert!(!config.batch.fail_fast);
    assert_eq!(
        LoggingConfig::load(Some(&config_path), false).unwrap(),
        LoggingConfig::default()
    );
}

#[test]
#[serial]
fn test_empty_extension_rejected() {
    clear_upgrader_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    fs::write(&config_path, "[upgrade]\nextension = \"\"\n").unwrap();

    let err = ConfigLoader::load(&config_path).unwrap_err();
    assert_eq!(err.code, "CWL-CONFIG-001");
}
