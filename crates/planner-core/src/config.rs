use anyhow::Result;
use config::{Config, ConfigBuilder, FileFormat, builder::DefaultState};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file.
    pub url: String,
    pub max_connections: u8,
}

#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared password. Authentication is disabled when unset or empty.
    pub password: Option<String>,
    /// Key used to sign session tokens. Derived from the password when unset.
    pub token_secret: Option<String>,
    pub token_ttl_hours: u32,
}

impl AuthConfig {
    /// ## Summary
    /// Returns the configured password, treating an empty string as unset.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("password", &self.password().map(|_| "<redacted>"))
            .field("token_secret", &self.token_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the listen address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Directory holding the frontend's static files.
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Environment variables understood by earlier releases, mapped onto settings keys.
const LEGACY_ENV_OVERRIDES: [(&str, &str); 3] = [
    ("TODO_PORT", "server.port"),
    ("TODO_DBFILE", "database.url"),
    ("TODO_PASSWORD", "auth.password"),
];

impl Settings {
    fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 7540)?
            .set_default("database.url", "scheduler.db")?
            .set_default("database.max_connections", 4)?
            .set_default("auth.token_ttl_hours", 8)?
            .set_default("web.dir", "./web")?
            .set_default("logging.level", "info")?)
    }

    /// ## Summary
    /// Loads configuration from `config.toml`, `PLANNER__*` environment variables
    /// and the legacy `TODO_*` variables, in increasing order of precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let mut builder = Self::builder()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Environment, e.g. PLANNER__SERVER__PORT
            .add_source(
                config::Environment::with_prefix("PLANNER")
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            );

        for (var, key) in LEGACY_ENV_OVERRIDES {
            let value = std::env::var(var).ok().filter(|v| !v.is_empty());
            if value.is_some() {
                tracing::debug!(var, key, "Applying legacy environment override");
            }
            builder = builder.set_override_option(key, value)?;
        }

        Ok(builder.build()?.try_deserialize::<Self>()?)
    }

    /// ## Summary
    /// Builds settings from the defaults overlaid with a TOML document.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or does not deserialize.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?)
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
