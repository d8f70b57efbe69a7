use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::caller::{CallerContext, Role};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Every request acts as the configured single user.
    SingleUser,
    /// A trusted front proxy identifies the caller through request headers.
    Proxy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub single_user: Option<SingleUserAuthConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleUserAuthConfig {
    pub employee_id: String,
    pub role: Role,
}

impl SingleUserAuthConfig {
    #[must_use]
    pub fn caller(&self) -> CallerContext {
        CallerContext::new(self.employee_id.as_str(), self.role)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Limits applied by the schedule query boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Widest query window accepted, in days (inclusive of both ends).
    pub max_window_days: u32,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// JSON file with employees, shift types and rules loaded at startup.
    pub seed_path: Option<String>,
}

impl Settings {
    /// ## Summary
    /// Returns a configuration builder pre-populated with every default.
    ///
    /// ## Errors
    /// Returns an error if a default value cannot be set.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8710)?
            .set_default("logging.level", "debug")?
            .set_default("auth.method", "proxy")?
            .set_default("schedule.max_window_days", 366)?
            .set_default("schedule.default_page_size", 100)?
            .set_default("schedule.max_page_size", 500)?)
    }

    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional
    /// `config.toml`.
    ///
    /// Environment variables use the `ROTA_` prefix and `__` between nested keys,
    /// e.g. `ROTA_SERVER__PORT=9000` or `ROTA_SCHEDULE__MAX_WINDOW_DAYS=92`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(
                config::Environment::with_prefix("ROTA")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
