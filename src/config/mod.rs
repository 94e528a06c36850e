mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{CodecSettings, LogSettings, Settings, StorageSettings};

/// Environment variable prefix, e.g. `AUDITLOG__STORAGE__DIRECTORY`.
pub const ENV_PREFIX: &str = "AUDITLOG";

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the storage, codec and log configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        storage: StorageSettings {
            directory: partial
                .storage
                .as_ref()
                .and_then(|s| s.directory.clone())
                .unwrap_or(default.storage.directory),
        },
        codec: CodecSettings {
            max_connection_id_len: partial
                .codec
                .as_ref()
                .and_then(|c| c.max_connection_id_len)
                .unwrap_or(default.codec.max_connection_id_len),
            max_payload_len: partial
                .codec
                .as_ref()
                .and_then(|c| c.max_payload_len)
                .unwrap_or(default.codec.max_payload_len),
        },
        log: LogSettings {
            level: partial
                .log
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.log.level),
        },
    })
}

#[cfg(test)]
mod tests;
