//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::SecretBox;
use serde::Deserialize;
use service::domain::{feature, user, Language};
use smart_default::SmartDefault;
use url::Url;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// CMS configuration.
    pub cms: Cms,

    /// Maps provider configuration.
    pub maps: Maps,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// [`Language`] content is shown in by default.
    pub default_language: Language,

    /// Upper bound of price sliders, in dollars.
    #[default(50_000_000)]
    pub price_ceiling: u32,

    /// IDs of listing features in the CMS schema.
    pub features: feature::Table,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            default_language,
            price_ceiling,
            features,
        } = value;
        Self {
            features,
            default_language,
            price_ceiling: price_ceiling.into(),
        }
    }
}

/// [Directus] CMS configuration.
///
/// [Directus]: https://directus.io
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cms {
    /// Base URL of the CMS API.
    #[default(Url::parse("http://127.0.0.1:8055").unwrap_or_else(|_| {
        unreachable!("valid URL")
    }))]
    pub url: Url,

    /// Timeout of a single request to the CMS.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,

    /// Service account to sign into the CMS with.
    ///
    /// The CMS is accessed anonymously if [`None`].
    pub account: Option<Account>,
}

/// CMS service account.
#[derive(Clone, Debug, Deserialize)]
pub struct Account {
    /// Email of the account.
    pub email: String,

    /// Password of the account.
    pub password: String,
}

impl Account {
    /// Converts this [`Account`] into [`user::Credentials`].
    ///
    /// [`None`] is returned if the email or the password is invalid.
    #[must_use]
    pub fn credentials(&self) -> Option<user::Credentials> {
        Some(user::Credentials {
            email: user::Email::new(self.email.clone())?,
            password: SecretBox::new(Box::new(user::Password::new(
                self.password.clone(),
            )?)),
        })
    }
}

/// [Google Maps Platform] configuration.
///
/// [Google Maps Platform]: https://developers.google.com/maps
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Maps {
    /// Base URL of the maps API.
    #[default(Url::parse("https://maps.googleapis.com").unwrap_or_else(|_| {
        unreachable!("valid URL")
    }))]
    pub url: Url,

    /// API key to sign requests with.
    pub api_key: String,

    /// Region code biasing place search.
    #[default(Some("au".to_owned()))]
    pub region: Option<String>,

    /// Timeout of a single request to the maps API.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Account, Config};

    #[test]
    fn defaults_without_file() {
        let config = Config::new("does-not-exist.toml").unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cms.url.as_str(), "http://127.0.0.1:8055/");
        assert_eq!(config.maps.region.as_deref(), Some("au"));
        assert_eq!(config.service.price_ceiling, 50_000_000);
        assert!(config.cms.account.is_none());
    }

    #[test]
    fn validates_account_credentials() {
        let account = Account {
            email: "bot@example.com".into(),
            password: "long enough password".into(),
        };
        assert!(account.credentials().is_some());

        let account = Account {
            email: "not an email".into(),
            ..account
        };
        assert!(account.credentials().is_none());
    }
}
