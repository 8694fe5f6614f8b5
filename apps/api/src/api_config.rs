use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use fieldkit_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_ADDRESS_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_ADDRESS_MIN_CHARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpAddressRuntimeConfig {
    pub search_url: Url,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressProviderConfig {
    Static,
    Http(HttpAddressRuntimeConfig),
}

impl AddressProviderConfig {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Http(_) => "http",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub address_provider: AddressProviderConfig,
    pub address_min_chars: usize,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let frontend_url =
            lookup("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = lookup("API_PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let address_min_chars = match lookup("ADDRESS_MIN_CHARS") {
            Some(value) => value.trim().parse::<usize>().map_err(|error| {
                AppError::Validation(format!("invalid ADDRESS_MIN_CHARS: {error}"))
            })?,
            None => DEFAULT_ADDRESS_MIN_CHARS,
        };

        let address_provider = match lookup("ADDRESS_PROVIDER")
            .unwrap_or_else(|| "static".to_owned())
            .as_str()
        {
            "static" => AddressProviderConfig::Static,
            "http" => {
                let raw_url = required_non_empty_env(&lookup, "ADDRESS_SEARCH_URL")?;
                let search_url = Url::parse(&raw_url).map_err(|error| {
                    AppError::Validation(format!("invalid ADDRESS_SEARCH_URL: {error}"))
                })?;
                let timeout_ms = match lookup("ADDRESS_SEARCH_TIMEOUT_MS") {
                    Some(value) => value.trim().parse::<u64>().map_err(|error| {
                        AppError::Validation(format!("invalid ADDRESS_SEARCH_TIMEOUT_MS: {error}"))
                    })?,
                    None => DEFAULT_ADDRESS_TIMEOUT_MS,
                };

                AddressProviderConfig::Http(HttpAddressRuntimeConfig {
                    search_url,
                    api_key: lookup("ADDRESS_SEARCH_API_KEY")
                        .filter(|value| !value.trim().is_empty()),
                    timeout: Duration::from_millis(timeout_ms),
                })
            }
            other => {
                return Err(AppError::Validation(format!(
                    "ADDRESS_PROVIDER must be either 'static' or 'http', got '{other}'"
                )));
            }
        };

        Ok(Self {
            frontend_url,
            api_host,
            api_port,
            address_provider,
            address_min_chars,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, AppError> {
    lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, AppError> {
    let value = required_env(lookup, name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
