//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use siteforge_config::ConfigError;
use siteforge_core::{CoreError, MacError};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the management API: {reason}")]
    #[diagnostic(
        code(siteforge::connection_failed),
        help("Check network access and the profile's base_url, or pass --base-url.")
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(siteforge::timeout),
        help("Increase the timeout with --timeout.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(siteforge::auth_failed),
        help("Verify the API token has write access to the organization.")
    )]
    AuthFailed { message: String },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(siteforge::no_credentials),
        help(
            "Pass --token, set SITEFORGE_TOKEN, set token_env in the profile,\n\
             or store the token in the system keyring under service 'siteforge'."
        )
    )]
    NoCredentials { profile: String },

    // ── Sites ────────────────────────────────────────────────────────
    #[error("Site '{name}' already exists")]
    #[diagnostic(
        code(siteforge::conflict),
        help("Choose another name. Run: siteforge sites")
    )]
    Conflict { name: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    #[diagnostic(code(siteforge::api_error))]
    ApiError { status: Option<u16>, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(siteforge::invalid_mac),
        help("MACs are 12 hex digits; ':' separators and case are ignored.")
    )]
    InvalidMac(MacError),

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(siteforge::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(siteforge::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Add one to {path}, or place an env.json in the working directory."
        )
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(siteforge::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Prompt failed: {message}")]
    #[diagnostic(
        code(siteforge::prompt),
        help("Pass --name and --devices when running without a terminal.")
    )]
    Prompt { message: String },

    // ── Serialization ────────────────────────────────────────────────
    #[error("Failed to render output: {0}")]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::InvalidMac(_) | Self::Validation { .. } | Self::ProfileNotFound { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transport { message } => Self::ConnectionFailed { reason: message },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Authentication { message } => Self::AuthFailed { message },
            CoreError::Api { message, status } => Self::ApiError { status, message },
            CoreError::Validation(e) => Self::InvalidMac(e),
            CoreError::InvalidSiteName => Self::Validation {
                field: "site name".into(),
                reason: "must not be empty".into(),
            },
            CoreError::NameConflict { name } => Self::Conflict { name },
            CoreError::Operator { message } => Self::Prompt { message },
            CoreError::Config { message } => Self::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::ProfileNotFound { name, available } => Self::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
                path: siteforge_config::config_path().display().to_string(),
            },
            ConfigError::Figment(e) => Self::Config {
                message: e.to_string(),
            },
        }
    }
}
