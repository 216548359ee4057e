use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Remote API returned {status}: {message}")]
    RemoteStatusError { status: u16, message: String },

    #[error("Base64 decode error: {0}")]
    DecodeError(#[from] base64::DecodeError),

    #[error("File content is not valid UTF-8: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("Unsupported content encoding: {encoding}")]
    UnsupportedEncoding { encoding: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid pull request URL: {url}")]
    InvalidPullRequestUrl { url: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Decoding,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CheckError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CheckError::ApiError(_) => ErrorCategory::Network,
            CheckError::RemoteStatusError { .. } => ErrorCategory::Remote,
            CheckError::DecodeError(_)
            | CheckError::Utf8Error(_)
            | CheckError::UnsupportedEncoding { .. }
            | CheckError::SerializationError(_) => ErrorCategory::Decoding,
            CheckError::InvalidPullRequestUrl { .. } => ErrorCategory::Input,
            CheckError::ConfigError { .. }
            | CheckError::InvalidConfigValueError { .. }
            | CheckError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            CheckError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Decoding => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CheckError::ApiError(_) => {
                "Check network connectivity and the configured API base URL".to_string()
            }
            CheckError::RemoteStatusError { status: 401, .. }
            | CheckError::RemoteStatusError { status: 403, .. } => {
                "Provide a GitHub token with read access via --github-token or GITHUB_TOKEN"
                    .to_string()
            }
            CheckError::RemoteStatusError { status: 404, .. } => {
                "Verify the organization, repository and file path exist".to_string()
            }
            CheckError::RemoteStatusError { .. } => {
                "Retry later; the remote API may be unavailable".to_string()
            }
            CheckError::DecodeError(_)
            | CheckError::Utf8Error(_)
            | CheckError::UnsupportedEncoding { .. } => {
                "The remote file could not be decoded; confirm it is a text file".to_string()
            }
            CheckError::SerializationError(_) => {
                "Check that the input JSON is an array of {filename, patch} objects".to_string()
            }
            CheckError::InvalidPullRequestUrl { .. } => {
                "Use a URL of the form https://github.com/<org>/<repo>/pull/<number>".to_string()
            }
            CheckError::IoError(_) => "Check file paths and permissions".to_string(),
            CheckError::ConfigError { .. }
            | CheckError::InvalidConfigValueError { .. }
            | CheckError::ConfigValidationError { .. } => {
                "Review the configuration file and command line flags".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the remote API: {}", self),
            ErrorCategory::Remote => format!("The remote API rejected the request: {}", self),
            ErrorCategory::Decoding => format!("Could not read the remote data: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
