/*
 * Responsibility
 * - Load settings from the environment (.env supported)
 * - Validate them once at startup (missing or malformed → startup fails)
 */
use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::services::decision::{Identity, IdentityError, parse_token_table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Which `DecisionEngine` serves `/dev/auth/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Static,
    TokenTable,
}

impl FromStr for EngineKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "token" | "tokens" => Ok(Self::TokenTable),
            _ => Err(ConfigError::Invalid("AUTH_ENGINE")),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub static_dir: PathBuf,

    pub engine: EngineKind,
    // Fixed identity for the always-allow endpoints and the static engine
    pub identity: Identity,
    pub tokens: HashMap<String, Identity>,
    pub session_cookie: String,
    pub policy_timeout: Duration,

    pub body_limit: usize,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            app_env: AppEnv::Development,
            static_dir: PathBuf::from("app/static"),
            engine: EngineKind::Static,
            identity: Identity::from_static("test", "test"),
            tokens: HashMap::new(),
            session_cookie: "session".to_string(),
            policy_timeout: Duration::from_millis(2000),
            body_limit: 1024 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let port: u16 = env_parse("PORT", 8080)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let engine = match std::env::var("AUTH_ENGINE") {
            Ok(s) => s.parse::<EngineKind>()?,
            Err(_) => EngineKind::Static,
        };

        let user = std::env::var("AUTH_USER").unwrap_or_else(|_| "test".to_string());
        let groups = std::env::var("AUTH_GROUPS").unwrap_or_else(|_| "test".to_string());
        let identity = Identity::new(user, groups).map_err(|err| match err {
            IdentityError::Empty("groups") | IdentityError::InvalidHeaderValue("groups") => {
                ConfigError::Invalid("AUTH_GROUPS")
            }
            _ => ConfigError::Invalid("AUTH_USER"),
        })?;

        let tokens = match (engine, std::env::var("AUTH_TOKENS")) {
            (_, Ok(raw)) => {
                parse_token_table(&raw).map_err(|_| ConfigError::Invalid("AUTH_TOKENS"))?
            }
            (EngineKind::TokenTable, Err(_)) => return Err(ConfigError::Missing("AUTH_TOKENS")),
            (EngineKind::Static, Err(_)) => HashMap::new(),
        };

        let session_cookie =
            std::env::var("AUTH_SESSION_COOKIE").unwrap_or(defaults.session_cookie);

        let policy_timeout = Duration::from_millis(env_parse(
            "AUTH_POLICY_TIMEOUT_MS",
            defaults.policy_timeout.as_millis() as u64,
        )?);

        let body_limit: usize = env_parse("REQUEST_BODY_LIMIT_BYTES", defaults.body_limit)?;

        let request_timeout = Duration::from_secs(env_parse(
            "REQUEST_TIMEOUT_SECONDS",
            defaults.request_timeout.as_secs(),
        )?);

        Ok(Self {
            addr,
            app_env,
            static_dir,
            engine,
            identity,
            tokens,
            session_cookie,
            policy_timeout,
            body_limit,
            request_timeout,
        })
    }
}

/// Read `key` from the environment; unset → `default`, unparseable → `Invalid`.
fn env_parse<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    parse_var(key, std::env::var(key).ok(), default)
}

fn parse_var<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}
