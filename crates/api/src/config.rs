use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rentals_db::PoolSettings;

/// How the admin secret is checked at login.
#[derive(Clone, PartialEq, Eq)]
pub enum AdminCredential {
    /// Plaintext shared secret (`ADMIN_PASSWORD`).
    Password(String),
    /// Argon2 PHC hash (`ADMIN_PASSWORD_HASH`).
    Hash(String),
}

impl AdminCredential {
    /// Pick the credential source. A hash wins over a plaintext password;
    /// blank values count as unset.
    pub fn from_values(password: Option<String>, hash: Option<String>) -> Option<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        match (present(password), present(hash)) {
            (_, Some(hash)) => Some(Self::Hash(hash)),
            (Some(password), None) => Some(Self::Password(password)),
            (None, None) => None,
        }
    }
}

// Never print the secret.
impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password(_) => f.write_str("Password(<redacted>)"),
            Self::Hash(_) => f.write_str("Hash(<redacted>)"),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the admin credential have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Admin session lifetime in hours (default: `24`).
    pub session_ttl_hours: i64,
    /// Seconds between lease status refresh passes (default: `86400`).
    pub lease_refresh_interval_secs: u64,
    /// Connection pool bounds.
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_max_lifetime_secs: u64,
    pub admin_credential: AdminCredential,
}

/// Origins allowed when `CORS_ORIGINS` is unset.
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                                       |
    /// |-------------------------------|-----------------------------------------------|
    /// | `HOST`                        | `0.0.0.0`                                     |
    /// | `PORT`                        | `8080`                                        |
    /// | `CORS_ORIGINS`                | `http://localhost:3000,http://localhost:3001` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                                          |
    /// | `SESSION_TTL_HOURS`           | `24`                                          |
    /// | `LEASE_REFRESH_INTERVAL_SECS` | `86400`                                       |
    /// | `DB_MAX_CONNECTIONS`          | `10`                                          |
    /// | `DB_MIN_CONNECTIONS`          | `5`                                           |
    /// | `DB_MAX_LIFETIME_SECS`        | `300`                                         |
    /// | `ADMIN_PASSWORD_HASH`         | --                                            |
    /// | `ADMIN_PASSWORD`              | --                                            |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values, or if neither `ADMIN_PASSWORD_HASH` nor
    /// `ADMIN_PASSWORD` is set.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.into()),
        );

        let session_ttl_hours: i64 = env_or("SESSION_TTL_HOURS", 24);
        assert!(session_ttl_hours > 0, "SESSION_TTL_HOURS must be positive");

        let lease_refresh_interval_secs: u64 = env_or("LEASE_REFRESH_INTERVAL_SECS", 86_400);
        assert!(
            lease_refresh_interval_secs > 0,
            "LEASE_REFRESH_INTERVAL_SECS must be positive"
        );

        let admin_credential = AdminCredential::from_values(
            std::env::var("ADMIN_PASSWORD").ok(),
            std::env::var("ADMIN_PASSWORD_HASH").ok(),
        )
        .expect("ADMIN_PASSWORD_HASH or ADMIN_PASSWORD must be set");

        Self {
            host,
            port: env_or("PORT", 8080),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            session_ttl_hours,
            lease_refresh_interval_secs,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10),
            db_min_connections: env_or("DB_MIN_CONNECTIONS", 5),
            db_max_lifetime_secs: env_or("DB_MAX_LIFETIME_SECS", 300),
            admin_credential,
        }
    }

    /// Pool bounds derived from the `DB_*` settings.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            min_connections: self.db_min_connections,
            max_lifetime: Duration::from_secs(self.db_max_lifetime_secs),
            ..PoolSettings::default()
        }
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }

    pub fn lease_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.lease_refresh_interval_secs)
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Read `name` from the environment, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse.
fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
