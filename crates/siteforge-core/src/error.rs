// ── Core error types ──
//
// Workflow-level errors. Consumers never see reqwest errors or JSON parse
// failures directly; the `From<siteforge_api::Error>` impl folds them into
// transport, auth, and API variants.

use thiserror::Error;

use crate::mac::MacError;

/// Unified error type for the core crate.
///
/// Every variant is fatal to a provisioning run. Benign early stops (empty
/// pool, unknown MAC) are [`Outcome`](crate::Outcome)s, not errors.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport errors ─────────────────────────────────────────────
    #[error("Cannot reach the management API: {message}")]
    Transport { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Input errors ─────────────────────────────────────────────────
    #[error(transparent)]
    Validation(#[from] MacError),

    #[error("Site name must not be empty")]
    InvalidSiteName,

    #[error("Site name '{name}' already exists")]
    NameConflict { name: String },

    #[error("Operator input failed: {message}")]
    Operator { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<siteforge_api::Error> for CoreError {
    fn from(err: siteforge_api::Error) -> Self {
        use siteforge_api::Error as Api;

        match err {
            Api::Authentication { message } => Self::Authentication { message },
            Api::InvalidToken => Self::Authentication {
                message: "API token rejected (HTTP 401)".into(),
            },
            Api::Transport(e) => Self::Transport {
                message: e.to_string(),
            },
            Api::Timeout { timeout_secs } => Self::Timeout { timeout_secs },
            Api::InvalidUrl(e) => Self::Config {
                message: format!("invalid API URL: {e}"),
            },
            Api::Tls(message) => Self::Config { message },
            Api::Api { status, message } => Self::Api {
                message,
                status: Some(status),
            },
            Api::Deserialization { message, .. } => Self::Api {
                message: format!("unexpected response: {message}"),
                status: None,
            },
        }
    }
}
