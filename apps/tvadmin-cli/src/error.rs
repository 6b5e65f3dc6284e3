//! CLI error types and exit codes

use thiserror::Error;
use tvadmin_core::{ApiError, ReconcileError};
use tvadmin_webapi::ConfigError;

/// Exit codes for the CLI
/// - 0: Success
/// - 1: General error
/// - 2: Authentication failed
/// - 3: Network error
/// - 4: Validation error
/// - 5: Server error
/// - 6: Run finished but some items failed
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Source group not found: {0}")]
    SourceGroupMissing(String),

    #[error("Confirmation required but no interactive terminal is available")]
    ConfirmationUnavailable,

    #[error("I/O error: {0}")]
    Io(String),

    #[error("{failed} of {total} item(s) failed")]
    ItemsFailed { failed: u32, total: u32 },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::AuthenticationFailed(_) => 2,
            CliError::Network(_) => 3,
            CliError::Validation(_)
            | CliError::SourceGroupMissing(_)
            | CliError::ConfirmationUnavailable => 4,
            CliError::Server(_) => 5,
            CliError::Api { status, .. } => {
                if *status >= 500 {
                    5
                } else if *status == 401 || *status == 403 {
                    2
                } else {
                    4
                }
            }
            CliError::Config(_) | CliError::Io(_) => 1,
            CliError::ItemsFailed { .. } => 6,
        }
    }

    /// Print the error to stderr with formatting
    pub fn print(&self) {
        let use_color = std::env::var("NO_COLOR").is_err();

        if use_color {
            eprintln!("\x1b[31mError:\x1b[0m {}", self);
        } else {
            eprintln!("Error: {}", self);
        }

        if let Some(suggestion) = self.suggestion() {
            if use_color {
                eprintln!("\n\x1b[33mSuggestion:\x1b[0m {}", suggestion);
            } else {
                eprintln!("\nSuggestion: {}", suggestion);
            }
        }
    }

    fn suggestion(&self) -> Option<&'static str> {
        match self {
            CliError::AuthenticationFailed(_) => {
                Some("Check TEAMVIEWER_API_TOKEN or pass a valid --api-token.")
            }
            CliError::Network(_) => Some("Check your network connection and --api-url."),
            CliError::ConfirmationUnavailable => {
                Some("Re-run with --force to skip the prompt, or --dry-run to preview.")
            }
            CliError::SourceGroupMissing(_) => Some("Group names are matched exactly."),
            CliError::ItemsFailed { .. } => Some("Fix the failed items and run again."),
            _ => None,
        }
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Unauthorized(msg) => CliError::AuthenticationFailed(msg),
            ApiError::Network(msg) => CliError::Network(msg),
            ApiError::Decode(msg) => CliError::Server(msg),
            ApiError::NotFound(msg) => CliError::Api {
                status: 404,
                message: msg,
            },
            ApiError::RateLimited { .. } => CliError::Api {
                status: 429,
                message: e.to_string(),
            },
            ApiError::Status { .. } if e.is_server_error() => CliError::Server(e.to_string()),
            ApiError::Status { status, message } => CliError::Api { status, message },
        }
    }
}

impl From<ReconcileError> for CliError {
    fn from(e: ReconcileError) -> Self {
        match e {
            ReconcileError::Fetch { source, .. } | ReconcileError::RemoteCallFailed { source, .. } => {
                CliError::from(source)
            }
            ReconcileError::SourceGroupMissing(name) => CliError::SourceGroupMissing(name),
            ReconcileError::ConfirmationUnavailable => CliError::ConfirmationUnavailable,
            ReconcileError::UserNotFound(_) | ReconcileError::DeviceNotFound(_) => {
                CliError::Validation(e.to_string())
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(format!("JSON error: {}", e))
    }
}
