//! Bot configuration.
//!
//! Values come from a TOML file (or built-in defaults), then the
//! environment, then CLI flags applied by main.rs.

use anyhow::{bail, Context, Result};
use catalogbot_core::{PgSslMode, PostgresSettings};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Which catalog backend to read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Postgres,
    Sqlite,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "sqlite" => Ok(Backend::Sqlite),
            _ => Err(format!("Invalid backend: '{}'. Use 'postgres' or 'sqlite'.", s)),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Postgres => write!(f, "postgres"),
            Backend::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_db_host")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    /// Postgres `sslmode`: disable, allow, prefer, require, verify-ca or verify-full.
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,
    /// SQLite catalog file, used by the sqlite backend.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_ssl_mode() -> String {
    "prefer".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            host: default_db_host(),
            port: default_db_port(),
            user: String::new(),
            password: String::new(),
            name: String::new(),
            ssl_mode: default_ssl_mode(),
            path: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    pub fn postgres_settings(&self) -> Result<PostgresSettings> {
        let ssl_mode: PgSslMode = self
            .ssl_mode
            .trim()
            .parse()
            .with_context(|| format!("Invalid database.ssl_mode: '{}'", self.ssl_mode))?;
        Ok(PostgresSettings {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.name.clone(),
            ssl_mode,
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        })
    }
}

#[derive(Clone, Default, Deserialize)]
pub struct Config {
    /// Telegram bot API token.
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load config from `config/default.toml`, then the user config dir,
    /// falling back to defaults.
    pub fn load() -> Result<Self> {
        let mut candidates = vec![PathBuf::from("config/default.toml")];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("catalogbot").join("config.toml"));
        }

        for path in candidates {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Config::default())
    }

    /// Apply `BOT_TOKEN` and the `DB_*` environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("BOT_TOKEN") {
            self.bot_token = Some(token);
        }

        let db = &mut self.database;
        if let Some(backend) = lookup("DB_BACKEND") {
            db.backend = backend.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(host) = lookup("DB_HOST") {
            db.host = host;
        }
        if let Some(port) = lookup("DB_PORT") {
            db.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid DB_PORT: '{}'", port))?;
        }
        if let Some(user) = lookup("DB_USER") {
            db.user = user;
        }
        if let Some(password) = lookup("DB_PASSWORD") {
            db.password = password;
        }
        if let Some(name) = lookup("DB_NAME") {
            db.name = name;
        }
        if let Some(ssl_mode) = lookup("DB_SSLMODE") {
            db.ssl_mode = ssl_mode;
        }
        if let Some(path) = lookup("DB_PATH") {
            db.path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Check that everything needed to start is present.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.as_deref().is_none_or(|t| t.trim().is_empty()) {
            bail!("Bot token is not configured (set BOT_TOKEN or bot_token in the config file)");
        }

        let db = &self.database;
        match db.backend {
            Backend::Postgres => {
                let missing: Vec<&str> = [("DB_HOST", &db.host), ("DB_USER", &db.user), ("DB_NAME", &db.name)]
                    .into_iter()
                    .filter(|(_, value)| value.trim().is_empty())
                    .map(|(key, _)| key)
                    .collect();
                if !missing.is_empty() {
                    bail!("Postgres catalog is missing: {}", missing.join(", "));
                }
                if db.max_connections == 0 {
                    bail!("database.max_connections must be at least 1");
                }
                db.postgres_settings()?;
            }
            Backend::Sqlite => {
                if db.path.is_none() {
                    bail!("SQLite catalog needs a path (set DB_PATH or database.path)");
                }
            }
        }
        Ok(())
    }
}
