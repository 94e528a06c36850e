use serde::Deserialize;

use crate::codec::DecoderLimits;

/// Top-level configuration settings for the application.
///
/// Includes settings for the storage backend, the decoder and logging.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub storage: StorageSettings,
    pub codec: CodecSettings,
    pub log: LogSettings,
}

/// Configuration settings for the storage backend.
///
/// `directory` is where audit logs and their metadata index live.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub directory: String,
}

/// Limits applied while decoding untrusted streams.
#[derive(Debug, Deserialize, Clone)]
pub struct CodecSettings {
    pub max_connection_id_len: u32,
    pub max_payload_len: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub storage: Option<PartialStorageSettings>,
    pub codec: Option<PartialCodecSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialStorageSettings {
    pub directory: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialCodecSettings {
    pub max_connection_id_len: Option<u32>,
    pub max_payload_len: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

/// Provides default values for `Settings`.
///
/// Codec defaults follow `DecoderLimits::default()`.
impl Default for Settings {
    fn default() -> Self {
        let limits = DecoderLimits::default();
        Self {
            storage: StorageSettings {
                directory: "audit".to_string(),
            },
            codec: CodecSettings {
                max_connection_id_len: limits.max_connection_id_len,
                max_payload_len: limits.max_payload_len,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl From<&CodecSettings> for DecoderLimits {
    fn from(settings: &CodecSettings) -> Self {
        Self {
            max_connection_id_len: settings.max_connection_id_len,
            max_payload_len: settings.max_payload_len,
        }
    }
}
