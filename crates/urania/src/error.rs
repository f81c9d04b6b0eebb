use std::time::Duration;
use thiserror::Error;

/// Caller input the aggregator cannot work with. The only error its operations return.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid birth date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid birth time '{0}'. Expected HH:MM or HH:MM:SS")]
    InvalidTime(String),
    #[error("Birth place must not be empty")]
    EmptyPlace,
    #[error("Coordinates ({lat}, {lon}) are outside latitude [-90, 90] / longitude [-180, 180]")]
    CoordinatesOutOfRange { lat: f64, lon: f64 },
    #[error("Guidance message must not be empty")]
    EmptyMessage,
}

/// Why a provider produced nothing usable. Always converted to fallback data
/// inside the crate; never returned from a public operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Unavailable {
    #[error("{0} provider is not configured")]
    NotConfigured(&'static str),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Provider answered with HTTP {0}")]
    Status(u16),
    #[error("No answer within {0:?}")]
    Timeout(Duration),
    #[error("Malformed provider payload: {0}")]
    Shape(String),
}

impl From<reqwest::Error> for Unavailable {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Unavailable::Status(status.as_u16())
        } else if err.is_decode() {
            Unavailable::Shape(err.to_string())
        } else {
            Unavailable::Transport(err.to_string())
        }
    }
}

pub type ProviderResult<T> = Result<T, Unavailable>;
