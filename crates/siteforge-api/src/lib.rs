// siteforge-api: Async Rust client for the cloud site, template, and inventory API

pub mod client;
pub mod error;
pub mod inventory;
pub mod models;
pub mod sites;
pub mod templates;
pub mod transport;

pub use client::MistClient;
pub use error::Error;
pub use models::{
    AssignmentResult, InventoryDevice, LatLng, LocationSettings, Site, SiteDraft, Template,
    TemplateApplies, TemplateAttach,
};
pub use transport::{TlsMode, TransportConfig};
