use config::{Config, ConfigError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::Level;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    server: Server,
    #[serde(default)]
    data: Data,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("LINHAS").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn data(&self) -> &Data {
        &self.data
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    log_level: String,
}

impl Core {
    /// The configured log level, `INFO` when it is not a valid level.
    pub fn log_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    host: String,
    port: u16,
    #[serde(with = "humantime_serde")]
    request_timeout: Duration,
}

impl Server {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Data {
    seed_file: Option<String>,
}

impl Data {
    pub fn seed_file(&self) -> Option<&Path> {
        self.seed_file.as_deref().map(Path::new)
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    log_level: "debug".to_string(),
                },
                server: Server {
                    host: "127.0.0.1".to_string(),
                    port: 0,
                    request_timeout: Duration::from_secs(5),
                },
                data: Data::default(),
            },
        }
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.server.request_timeout = timeout;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
