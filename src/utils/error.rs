use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to fetch plans.")]
    FetchStatus { status: u16 },

    #[error("Failed to parse plans: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl PlanError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PlanError::ConfigValidationError { .. }
                | PlanError::InvalidConfigValueError { .. }
                | PlanError::UrlError(_)
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlanError::HttpError(_) => "Could not reach the plan server.".to_string(),
            PlanError::FetchStatus { status } => {
                format!("The plan server answered with status {}.", status)
            }
            PlanError::Parse(_) => "The plan list is not valid JSON.".to_string(),
            PlanError::IoError(e) => format!("File access failed: {}", e),
            _ => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlanError::HttpError(_) => "Check the base URL and your network connection",
            PlanError::FetchStatus { .. } => "Make sure plans.json is deployed next to the app",
            PlanError::Parse(_) => "Validate plans.json against the plan record shape",
            PlanError::IoError(_) => "Check that the file exists and is readable",
            _ => "Fix the configuration file or command line flags",
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            return 2;
        }
        match self {
            PlanError::HttpError(_) | PlanError::FetchStatus { .. } => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_status_message_is_generic() {
        let err = PlanError::FetchStatus { status: 404 };
        assert_eq!(err.to_string(), "Failed to fetch plans.");
        assert!(err.user_friendly_message().contains("404"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_config_errors_share_exit_code() {
        let err = PlanError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: "missing field `source`".to_string(),
        };
        assert!(err.is_config_error());
        assert_eq!(err.exit_code(), 2);
    }
}
