// ── Runtime provisioning configuration ──
//
// Describes *where* to provision (API session) and *what* every new site
// gets (templates, location, variables). Built by the CLI from config files
// and flags, then handed in; core never reads config files itself.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde_json::{Map, Value};
use url::Url;

use siteforge_api::{LocationSettings, MistClient, SiteDraft, TlsMode, TransportConfig};

use crate::error::CoreError;

/// API session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// API root (e.g., `https://api.mist.com/api/v1`).
    pub base_url: Url,
    /// Organization that owns the sites, templates, and inventory.
    pub org_id: String,
    /// API token sent as `Authorization: Token <token>`.
    pub token: SecretString,
    /// TLS verification strategy.
    pub tls: TlsMode,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl SessionConfig {
    /// Build the API client for this session.
    pub fn client(&self) -> Result<MistClient, CoreError> {
        let transport = TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        };
        Ok(MistClient::from_token(
            self.base_url.as_str(),
            self.org_id.clone(),
            &self.token,
            &transport,
        )?)
    }
}

/// Templates every new site is bound to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateIds {
    pub gateway: Option<String>,
    pub network: Option<String>,
    /// WLAN template the site is appended to after creation.
    pub wlan: String,
}

/// Per-site provisioning settings.
#[derive(Debug, Clone, Default)]
pub struct ProvisionConfig {
    pub templates: TemplateIds,
    pub location: LocationSettings,
    /// Site variables. `None` skips the settings patch; an empty map is
    /// still sent.
    pub vars: Option<Map<String, Value>>,
    /// Line-delimited device list consulted before prompting.
    pub device_file: PathBuf,
}

impl ProvisionConfig {
    /// Merge a site name with the configured templates and location.
    pub fn site_draft(&self, name: &str) -> SiteDraft {
        SiteDraft {
            name: name.to_owned(),
            gatewaytemplate_id: self.templates.gateway.clone(),
            networktemplate_id: self.templates.network.clone(),
            location: self.location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_merges_templates_and_location() {
        let config = ProvisionConfig {
            templates: TemplateIds {
                gateway: Some("gw".into()),
                network: None,
                wlan: "wlan".into(),
            },
            location: LocationSettings {
                timezone: Some("Europe/Berlin".into()),
                ..LocationSettings::default()
            },
            ..ProvisionConfig::default()
        };

        let draft = config.site_draft("Berlin-01");
        assert_eq!(draft.name, "Berlin-01");
        assert_eq!(draft.gatewaytemplate_id.as_deref(), Some("gw"));
        assert!(draft.networktemplate_id.is_none());
        assert_eq!(draft.location.timezone.as_deref(), Some("Europe/Berlin"));
    }
}
