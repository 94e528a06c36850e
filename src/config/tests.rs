use std::env;
use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use super::load_config;
use super::settings::Settings;
use crate::codec::DecoderLimits;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.storage.directory, "audit");
    assert_eq!(settings.log.level, "info");
    assert_eq!(
        DecoderLimits::from(&settings.codec),
        DecoderLimits::default()
    );
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    // Run inside a temporary directory so load_config picks up
    // config/default.toml from there.
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    fs::create_dir_all("config").expect("create config dir");
    let toml = r#"
        [storage]
        directory = "/var/log/audit"

        [codec]
        max_payload_len = 1024
    "#;
    fs::write("config/default.toml", toml).expect("write config file");

    let cfg = load_config();

    // restore cwd before asserting
    env::set_current_dir(orig).expect("restore cwd");

    let cfg = cfg.expect("load_config failed");
    assert_eq!(cfg.storage.directory, "/var/log/audit");
    assert_eq!(cfg.codec.max_payload_len, 1024);
    assert_eq!(
        cfg.codec.max_connection_id_len,
        Settings::default().codec.max_connection_id_len
    );
    assert_eq!(cfg.log.level, "info");
}

#[test]
#[serial]
fn load_config_from_environment() {
    temp_env::with_vars(
        [
            ("AUDITLOG__STORAGE__DIRECTORY", Some("/srv/audit")),
            ("AUDITLOG__LOG__LEVEL", Some("debug")),
            ("AUDITLOG__CODEC__MAX_CONNECTION_ID_LEN", Some("128")),
        ],
        || {
            let cfg = load_config().expect("load_config failed");
            assert_eq!(cfg.storage.directory, "/srv/audit");
            assert_eq!(cfg.log.level, "debug");
            assert_eq!(cfg.codec.max_connection_id_len, 128);
        },
    );
}
