use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Declaration graph error: {message}")]
    GraphError { message: String },

    #[error("Zone lookup failed: {message}")]
    ZoneLookupError { message: String },

    #[error("Provisioning engine error: {message}")]
    EngineError { message: String },
}

impl StackError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            StackError::MissingConfigError { field } => {
                format!("Required configuration value {} is not set", field)
            }
            StackError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value {} is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StackError::MissingConfigError { .. } => {
                "Set the variable in the environment or provide a stack.toml via --config"
            }
            StackError::InvalidConfigValueError { .. } | StackError::ConfigError { .. } => {
                "Check the configuration values in the environment or stack.toml"
            }
            StackError::ZoneLookupError { .. } => {
                "Verify the provisioning credentials allow hosted zone lookups"
            }
            StackError::EngineError { .. } => {
                "Inspect the provisioning engine logs; the declaration was not applied"
            }
            _ => "Re-run with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, StackError>;
