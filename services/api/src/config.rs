use secrecy::SecretString;
use std::net::SocketAddr;
use tracing::Level;

const DEFAULT_API_BASE: &str = "https://dialogflow.googleapis.com/v2";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Defines the supported backends for the NLU client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NluProvider {
    Dialogflow,
    /// Scripted local replies, no network access.
    Mock,
}

impl NluProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            NluProvider::Dialogflow => "dialogflow",
            NluProvider::Mock => "mock",
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Voice-platform application id that every request must carry.
    pub alexa_app_id: String,
    pub nlu_project_id: String,
    pub nlu_provider: NluProvider,
    pub nlu_api_base: String,
    pub nlu_access_token: Option<SecretString>,
    pub language_code: String,
    pub log_level: Level,
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingVar(name.to_string()))
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let alexa_app_id = required_var("ALEXA_APP_ID")?;
        let nlu_project_id = required_var("NLU_PROJECT_ID")?;

        let provider_str =
            std::env::var("NLU_PROVIDER").unwrap_or_else(|_| "dialogflow".to_string());
        let nlu_provider = match provider_str.to_lowercase().as_str() {
            "dialogflow" => NluProvider::Dialogflow,
            "mock" => NluProvider::Mock,
            other => {
                return Err(ConfigError::InvalidValue(
                    "NLU_PROVIDER".to_string(),
                    format!("'{}' is not one of 'dialogflow', 'mock'", other),
                ));
            }
        };

        let nlu_api_base =
            std::env::var("NLU_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let nlu_access_token = std::env::var("NLU_ACCESS_TOKEN")
            .ok()
            .map(SecretString::from);

        let language_code =
            std::env::var("NLU_LANGUAGE_CODE").unwrap_or_else(|_| "en-US".to_string());

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        if nlu_provider == NluProvider::Dialogflow && nlu_access_token.is_none() {
            return Err(ConfigError::MissingVar(
                "NLU_ACCESS_TOKEN must be set for 'dialogflow' provider".to_string(),
            ));
        }

        Ok(Self {
            bind_address,
            alexa_app_id,
            nlu_project_id,
            nlu_provider,
            nlu_api_base,
            nlu_access_token,
            language_code,
            log_level,
        })
    }
}
