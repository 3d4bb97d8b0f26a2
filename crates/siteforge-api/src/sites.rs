// Site endpoints
//
// Listing and creation are org-scoped (`orgs/{org}/sites`); settings are
// addressed by site id alone (`sites/{site}/setting`).

use serde_json::{Map, Value};
use tracing::debug;

use crate::client::MistClient;
use crate::error::Error;
use crate::models::{Site, SiteDraft, SiteSettingsPatch};

impl MistClient {
    /// List every site in the organization.
    ///
    /// `GET /orgs/{org}/sites`
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        debug!("listing sites");
        self.get(&self.org_path("sites")).await
    }

    /// Create a site and return it with its server-assigned id.
    ///
    /// `POST /orgs/{org}/sites`
    pub async fn create_site(&self, draft: &SiteDraft) -> Result<Site, Error> {
        debug!(name = %draft.name, "creating site");
        self.post(&self.org_path("sites"), draft).await
    }

    /// Patch the site settings document with `{"vars": vars}`.
    ///
    /// `PUT /sites/{site}/setting`
    pub async fn apply_site_settings(
        &self,
        site_id: &str,
        vars: &Map<String, Value>,
    ) -> Result<(), Error> {
        debug!(site_id, count = vars.len(), "applying site variables");
        self.put_no_response(&format!("sites/{site_id}/setting"), &SiteSettingsPatch { vars })
            .await
    }
}
