use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub auth: AuthConfig,
    pub templates: TemplatesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Cookie signing key. Mock only, never a real secret.
    pub secret: String,
    /// Idle time after which a session is dropped.
    pub ttl_seconds: u64,
    pub cleanup_interval_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub registered_email: String,
    pub shared_password: String,
    /// Stoves seeded into every new session
    pub stove_ids: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TemplatesConfig {
    pub directory: PathBuf,
    pub stove_status_file: String,
    pub summary_file: String,
    pub placeholder: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    /// Daily rolling log files are written here when set
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            session: SessionConfig {
                cookie_name: "connect.sid".to_string(),
                secret: "Unsecure cookies signing key".to_string(),
                ttl_seconds: 10 * 60,
                cleanup_interval_seconds: 60,
            },
            auth: AuthConfig {
                registered_email: "registered-user@rika-firenet.com".to_string(),
                shared_password: "Secret".to_string(),
                stove_ids: vec!["12345".to_string(), "333444".to_string()],
            },
            templates: TemplatesConfig {
                directory: PathBuf::from("assets"),
                stove_status_file: "stove-status.json".to_string(),
                summary_file: "summary.html".to_string(),
                placeholder: "__stove_id__".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Built-in defaults, then `config/settings.toml` if present, then
    /// `APP__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.stove_ids")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session.ttl_seconds)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.session.cleanup_interval_seconds.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_vendor_mock() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.session.cookie_name, "connect.sid");
        assert_eq!(settings.session_ttl(), Duration::from_secs(600));
        assert_eq!(settings.auth.stove_ids, vec!["12345", "333444"]);
        assert_eq!(settings.templates.placeholder, "__stove_id__");
    }

    #[test]
    fn test_defaults_survive_config_round_trip() {
        let config = Config::builder()
            .add_source(Config::try_from(&Settings::default()).unwrap())
            .build()
            .unwrap();
        let settings: Settings = config.try_deserialize().unwrap();
        assert_eq!(settings.auth.registered_email, "registered-user@rika-firenet.com");
        assert!(settings.logging.directory.is_none());
    }
}
