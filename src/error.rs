use thiserror::Error;

#[derive(Error, Debug)]
pub enum OfficeError {
    // Remote service errors
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("authentication error: {0}")]
    Auth(String),

    // Local value errors
    #[error("invalid {field} '{value}', expected one of: {expected}")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("invalid API URL '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl OfficeError {
    /// Build an `InvalidValue` error listing the accepted values.
    pub fn invalid_value(field: &'static str, value: &str, expected: &[&str]) -> Self {
        OfficeError::InvalidValue {
            field,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }

    /// HTTP status of a server error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            OfficeError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, OfficeError::Network(_))
    }

    /// Message shown to the user when this error ends a store operation.
    /// Server errors show the service's own message.
    pub fn user_message(&self) -> String {
        match self {
            OfficeError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OfficeError>;
