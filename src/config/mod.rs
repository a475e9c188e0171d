use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// ceiling on a single upload, in bytes
    #[serde(rename = "uploadlimitbytes")]
    pub upload_limit_bytes: u64,
}

#[derive(Deserialize, Clone)]
pub struct StorageConfig {
    /// directory the physical upload tree lives under
    #[serde(rename = "uploadroot")]
    pub upload_root: String,
    /// path of the JSON metadata document
    #[serde(rename = "metadatafile")]
    pub metadata_file: String,
}

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    /// path of the JSON credential list
    #[serde(rename = "credentialsfile")]
    pub credentials_file: String,
    /// master secret rocket derives its cookie key from
    #[serde(rename = "sessionsecret")]
    pub session_secret: String,
    #[serde(rename = "sessionttlminutes")]
    pub session_ttl_minutes: u64,
}

#[derive(Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone)]
pub struct FileDropConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Parses the config file located at ./FileDrop.toml, if it exists.
/// If this fails to parse the file, the application will panic
pub fn parse_config() -> FileDropConfig {
    let builder = Config::builder()
        .add_source(config::File::with_name("./FileDrop.toml"))
        .build();
    // some errors are fine, such as not found
    if let Err(ConfigError::Foreign(e)) = builder {
        let message = e.to_string();
        if message.contains("not found") {
            log::warn!("No config file found. Continuing startup...");
            return FILEDROP_CONFIG_DEFAULT.clone();
        }
        panic!("Failed to parse config file. Exception is {e}");
        // basically everything else is unrecoverable, though
    } else if let Err(e) = builder {
        log::error!("Failed to parse config file. Exception is {e}");
        panic!("Failed to parse config file. Exception is {e}");
    }
    let settings = builder.unwrap();
    settings
        .try_deserialize()
        .unwrap_or(FILEDROP_CONFIG_DEFAULT.clone())
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static FILEDROP_CONFIG: Lazy<FileDropConfig> = Lazy::new(parse_config);
static FILEDROP_CONFIG_DEFAULT: Lazy<FileDropConfig> = Lazy::new(|| FileDropConfig {
    server: ServerConfig {
        port: 8000,
        upload_limit_bytes: 50 * 1024 * 1024,
    },
    storage: StorageConfig {
        upload_root: "./uploads".to_string(),
        metadata_file: "./metadata.json".to_string(),
    },
    auth: AuthConfig {
        credentials_file: "./credentials.json".to_string(),
        session_secret: "change-me-before-exposing-this-host".to_string(),
        session_ttl_minutes: 60,
    },
    logging: LoggingConfig {
        level: "info".to_string(),
    },
});
