//! Configuration management.
//!
//! Configuration is loaded from a YAML file and then overridden by environment variables:
//!
//! 1. `config.yaml` (or the file given with `-f`/`LETTERPLAY_CONFIG`)
//! 2. `LETTERPLAY_`-prefixed variables, with `__` separating nested keys
//!    (e.g. `LETTERPLAY_RANKING__LIMIT=25`)
//! 3. `DATABASE_URL`, which replaces `database.url`
//!
//! Every section has a default, so an empty file is a valid configuration.

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "LETTERPLAY_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Populated from `DATABASE_URL`; folded into `database.url` on load
    #[serde(skip_serializing)]
    pub database_url: Option<String>,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    /// CORS configuration for the browser client
    pub cors: CorsConfig,
    pub ranking: RankingConfig,
    /// Export traces over OTLP (endpoint and headers come from the standard `OTEL_*` variables)
    pub enable_otel_export: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: String,
    pub pool: PoolSettings,
}

/// Connection pool settings passed through to `PgPoolOptions`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolSettings {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of idle connections to maintain
    pub min_connections: u32,
    /// Maximum time to wait for a connection (seconds)
    pub acquire_timeout_secs: u64,
    /// Time before idle connections are closed (seconds, 0 = never)
    pub idle_timeout_secs: u64,
    /// Maximum lifetime of a connection (seconds, 0 = never)
    pub max_lifetime_secs: u64,
}

impl PoolSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }

    pub fn max_lifetime(&self) -> Option<Duration> {
        (self.max_lifetime_secs > 0).then(|| Duration::from_secs(self.max_lifetime_secs))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    pub proxy_header: ProxyHeaderAuthConfig,
}

/// Identity comes from a trusted upstream proxy that has already authenticated the user.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProxyHeaderAuthConfig {
    pub enabled: bool,
    /// Header carrying the username of the authenticated caller
    pub header_name: String,
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests
    pub allowed_origins: Vec<CorsOrigin>,
    /// Allow credentials (cookies) in CORS requests
    pub allow_credentials: bool,
    /// Cache preflight requests for this many seconds
    pub max_age: Option<u64>,
}

/// CORS origin specification.
///
/// Can be either a wildcard (`*`) to allow all origins, or a specific URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorsOrigin {
    #[serde(deserialize_with = "parse_wildcard")]
    Wildcard,
    #[serde(deserialize_with = "parse_url")]
    Url(Url),
}

fn parse_wildcard<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s == "*" {
        Ok(())
    } else {
        Err(serde::de::Error::custom("Expected '*'"))
    }
}

fn parse_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Url::parse(&s).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankingConfig {
    /// Number of games returned by the leaderboard
    pub limit: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            database_url: None,
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            ranking: RankingConfig::default(),
            enable_otel_export: false,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost:5432/letterplay".to_string(),
            pool: PoolSettings::default(),
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,  // 10 minutes
            max_lifetime_secs: 1800, // 30 minutes
        }
    }
}

impl Default for ProxyHeaderAuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            header_name: "x-letterplay-user".to_string(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![CorsOrigin::Url(
                Url::parse("http://localhost:5173").expect("static URL is valid"),
            )],
            allow_credentials: true,
            max_age: Some(3600),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        if let Some(url) = config.database_url.take() {
            config.database.url = url;
        }

        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if !self.auth.proxy_header.enabled {
            return Err(Error::Internal {
                operation: "Config validation: auth.proxy_header must be enabled, it is the only way to identify callers".to_string(),
            });
        }

        if self.auth.proxy_header.header_name.trim().is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: auth.proxy_header.header_name cannot be empty".to_string(),
            });
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: cors.allowed_origins cannot be empty".to_string(),
            });
        }

        if self.cors.allow_credentials && self.cors.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard)) {
            return Err(Error::Internal {
                operation: "Config validation: cors.allow_credentials cannot be combined with a wildcard origin".to_string(),
            });
        }

        if self.ranking.limit <= 0 {
            return Err(Error::Internal {
                operation: format!("Config validation: ranking.limit must be positive, got {}", self.ranking.limit),
            });
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values.
            // LETTERPLAY_CONFIG names the file itself and is read by clap.
            .merge(Env::prefixed("LETTERPLAY_").ignore(&["config"]).split("__"))
            .merge(Env::raw().only(&["DATABASE_URL"]))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn args(path: &str) -> Args {
        Args {
            config: path.to_string(),
            validate: false,
        }
    }

    #[test]
    fn test_defaults_from_empty_file() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "")?;

            let config = Config::load(&args("test.yaml"))?;

            assert_eq!(config.bind_address(), "0.0.0.0:3001");
            assert_eq!(config.ranking.limit, 10);
            assert!(config.auth.proxy_header.enabled);
            assert_eq!(config.auth.proxy_header.header_name, "x-letterplay-user");
            assert_eq!(config.database.pool.max_connections, 10);
            assert!(!config.enable_otel_export);

            Ok(())
        });
    }

    #[test]
    fn test_yaml_sections() {
        Jail::expect_with(|jail| {
            // DATABASE_URL is usually set when running the database tests
            jail.clear_env();
            jail.create_file(
                "test.yaml",
                r#"
port: 8080
database:
  url: postgres://db:5432/catalogo
  pool:
    max_connections: 4
    idle_timeout_secs: 0
auth:
  proxy_header:
    header_name: x-forwarded-user
cors:
  allowed_origins:
    - https://letterplay.example.com
  max_age: 60
ranking:
  limit: 25
"#,
            )?;

            let config = Config::load(&args("test.yaml"))?;

            assert_eq!(config.port, 8080);
            assert_eq!(config.database.url, "postgres://db:5432/catalogo");
            assert_eq!(config.database.pool.max_connections, 4);
            assert_eq!(config.database.pool.idle_timeout(), None);
            assert_eq!(config.database.pool.acquire_timeout(), Duration::from_secs(30));
            assert_eq!(config.auth.proxy_header.header_name, "x-forwarded-user");
            assert_eq!(config.cors.max_age, Some(60));
            assert!(matches!(
                &config.cors.allowed_origins[..],
                [CorsOrigin::Url(url)] if url.as_str() == "https://letterplay.example.com/"
            ));
            assert_eq!(config.ranking.limit, 25);

            Ok(())
        });
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
host: 10.0.0.1
ranking:
  limit: 5
"#,
            )?;

            jail.set_env("LETTERPLAY_HOST", "127.0.0.1");
            jail.set_env("LETTERPLAY_RANKING__LIMIT", "20");
            jail.set_env("DATABASE_URL", "postgres://override:5432/letterplay");

            let config = Config::load(&args("test.yaml"))?;

            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.ranking.limit, 20);
            assert_eq!(config.database.url, "postgres://override:5432/letterplay");
            assert!(config.database_url.is_none());

            Ok(())
        });
    }

    #[test]
    fn test_config_path_variable_is_not_a_key() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("custom.yaml", "port: 4000\n")?;
            jail.set_env("LETTERPLAY_CONFIG", "custom.yaml");

            let args = Args::try_parse_from(["letterplay"]).map_err(|e| e.to_string())?;
            assert_eq!(args.config, "custom.yaml");

            let config = Config::load(&args)?;
            assert_eq!(config.port, 4000);

            Ok(())
        });
    }

    #[test]
    fn test_unknown_fields_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "rankings:\n  limit: 3\n")?;

            assert!(Config::load(&args("test.yaml")).is_err());

            Ok(())
        });
    }

    #[test]
    fn test_validation_failures() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.ranking.limit = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.auth.proxy_header.enabled = false;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cors.allowed_origins.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cors.allowed_origins = vec![CorsOrigin::Wildcard];
        assert!(config.validate().is_err());
        config.cors.allow_credentials = false;
        assert!(config.validate().is_ok());
    }
}
