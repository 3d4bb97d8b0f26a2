//! Provisioning logic between `siteforge-api` and the CLI.
//!
//! - **[`Provisioner`]**: Runs the site build: uniqueness check, creation,
//!   template attach, optional settings patch, inventory fetch, device
//!   resolution, validation, reconciliation, and assignment. Returns an
//!   [`Outcome`] for every non-fatal ending.
//!
//! - **[`mac`]**: Candidate normalization, validation, deduplication, and
//!   the cross-check against the unassigned pool.
//!
//! - **[`source`]**: The [`DeviceSource`] capability with file and
//!   operator-prompt providers, plus the [`Operator`] terminal seam.
//!
//! - **[`AssignmentReport`]**: Positional pairing of failed MACs and
//!   reasons, rendered as operator-facing lines.

pub mod config;
pub mod error;
pub mod mac;
pub mod provision;
pub mod report;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ProvisionConfig, SessionConfig, TemplateIds};
pub use error::CoreError;
pub use mac::{MacAddress, MacError};
pub use provision::{Outcome, Provisioner};
pub use report::{AssignmentFailure, AssignmentReport};
pub use source::{DeviceSource, FileDeviceSource, Operator, PromptDeviceSource, SourceKind};

pub use siteforge_api::{InventoryDevice, LatLng, LocationSettings, Site, TlsMode};
