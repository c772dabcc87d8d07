use anyhow::{ensure, Context, Result};

const DEFAULT_SERVER_PORT: u16 = 8080;
// 300 minutes
const DEFAULT_TOKEN_TTL_SECS: u64 = 300 * 60;
// 30 days
const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // new は環境変数を読むためにこれを使う
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key).with_context(|| format!("environment variable {key} is not set"))
        };

        let database = DatabaseConfig {
            host: required("DATABASE_HOST")?,
            port: required("DATABASE_PORT")?
                .parse()
                .context("DATABASE_PORT must be a port number")?,
            username: required("DATABASE_USERNAME")?,
            password: required("DATABASE_PASSWORD")?,
            database: required("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: required("REDIS_HOST")?,
            port: required("REDIS_PORT")?
                .parse()
                .context("REDIS_PORT must be a port number")?,
        };
        let auth = AuthConfig {
            secret: required("JWT_SECRET")?,
            ttl: match lookup("AUTH_TOKEN_TTL") {
                Some(ttl) => ttl
                    .parse()
                    .context("AUTH_TOKEN_TTL must be a number of seconds")?,
                None => DEFAULT_TOKEN_TTL_SECS,
            },
        };
        ensure!(
            (1..=MAX_TOKEN_TTL_SECS).contains(&auth.ttl),
            "AUTH_TOKEN_TTL must be between 1 and {MAX_TOKEN_TTL_SECS} seconds"
        );
        let server = ServerConfig {
            port: match lookup("PORT") {
                Some(port) => port.parse().context("PORT must be a port number")?,
                None => DEFAULT_SERVER_PORT,
            },
        };
        let bootstrap_admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdminConfig { email, password }),
            _ => None,
        };

        Ok(Self {
            database,
            redis,
            auth,
            server,
            bootstrap_admin,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    // アクセストークンの有効期間（秒）
    pub ttl: u64,
}

pub struct ServerConfig {
    pub port: u16,
}

pub struct BootstrapAdminConfig {
    pub email: String,
    pub password: String,
}
