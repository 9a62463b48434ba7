use std::env;
use std::process;

use lazy_static::lazy_static;
use thiserror::Error;
use tracing::error;

pub const ENV_ENVIRONMENT: &str = "PIPEBIRD_ENV";
pub const ENV_BASE_URL: &str = "PIPEBIRD_BASE_URL";
pub const ENV_TLS: &str = "PIPEBIRD_TLS";
pub const ENV_SECRET_KEY: &str = "PIPEBIRD_SECRET_KEY";

/// Deployment mode the process was started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "development" => Some(Environment::Development),
            "production" => Some(Environment::Production),
            "test" => Some(Environment::Test),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }
}

/// Whether the deployment serves the dashboard over TLS. Controls the
/// `Secure` attribute on the auth cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsMode {
    Tls,
    #[default]
    NoTls,
}

impl TlsMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "TLS" => Some(TlsMode::Tls),
            "NO_TLS" => Some(TlsMode::NoTls),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid environment configuration: {}", .issues.join("; "))]
pub struct EnvironError {
    pub issues: Vec<String>,
}

/// Validated process configuration. Loaded once at startup and immutable for
/// the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Environ {
    pub environment: Environment,
    pub base_url: String,
    pub tls: TlsMode,
    /// Legacy static bearer secret consumed by [`crate::session::StaticSecret`].
    pub secret_key: Option<String>,
}

lazy_static! {
    static ref ENVIRON: Environ = Environ::load();
}

impl Environ {
    pub fn from_env() -> Result<Self, EnvironError> {
        dotenv::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Fail-fast loader: logs the structured error and terminates the
    /// process. A partially valid configuration is never exposed.
    pub fn load() -> Self {
        match Self::from_env() {
            Ok(environ) => environ,
            Err(err) => {
                error!(environ_error = %err, "refusing to start with invalid configuration");
                process::exit(1);
            }
        }
    }

    /// Process-wide configuration. First access validates the environment
    /// and exits on failure.
    pub fn global() -> &'static Environ {
        &ENVIRON
    }

    pub fn cookie_secure(&self) -> bool {
        self.tls == TlsMode::Tls
    }

    fn from_source<F>(lookup: F) -> Result<Self, EnvironError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut issues = Vec::new();

        let environment = match lookup(ENV_ENVIRONMENT) {
            Some(raw) => match Environment::from_str(&raw) {
                Some(environment) => Some(environment),
                None => {
                    issues.push(format!(
                        "{} must be one of development, production, test (got {:?})",
                        ENV_ENVIRONMENT, raw
                    ));
                    None
                }
            },
            None => {
                issues.push(format!("{} must be set", ENV_ENVIRONMENT));
                None
            }
        };

        let base_url = match lookup(ENV_BASE_URL) {
            Some(url) if !url.trim().is_empty() => Some(url),
            _ => {
                issues.push(format!(
                    "{} must be set to the backend base URL",
                    ENV_BASE_URL
                ));
                None
            }
        };

        let tls = match lookup(ENV_TLS) {
            Some(raw) => match TlsMode::from_str(&raw) {
                Some(tls) => Some(tls),
                None => {
                    issues.push(format!("{} must be TLS or NO_TLS (got {:?})", ENV_TLS, raw));
                    None
                }
            },
            None => Some(TlsMode::default()),
        };

        let secret_key = lookup(ENV_SECRET_KEY);

        match (environment, base_url, tls) {
            (Some(environment), Some(base_url), Some(tls)) if issues.is_empty() => Ok(Environ {
                environment,
                base_url,
                tls,
                secret_key,
            }),
            _ => Err(EnvironError { issues }),
        }
    }
}
