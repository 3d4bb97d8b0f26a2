// Template endpoints
//
// Attaching a site is a read-modify-write of the template's `applies`
// document. There is no version token, so a concurrent editor's change to
// `applies` between the GET and the PUT is overwritten.

use tracing::debug;

use crate::client::MistClient;
use crate::error::Error;
use crate::models::{Template, TemplateApplies, TemplateAttach, TemplateUpdate};

impl MistClient {
    /// `GET /orgs/{org}/templates/{template}`
    pub async fn get_template(&self, template_id: &str) -> Result<Template, Error> {
        debug!(template_id, "fetching template");
        self.get(&self.org_path(&format!("templates/{template_id}")))
            .await
    }

    /// Replace the template's `applies` document.
    ///
    /// `PUT /orgs/{org}/templates/{template}` with `{"applies": ...}`
    pub async fn put_template_applies(
        &self,
        template_id: &str,
        applies: &TemplateApplies,
    ) -> Result<(), Error> {
        debug!(template_id, sites = applies.site_ids.len(), "writing template applies");
        self.put_no_response(
            &self.org_path(&format!("templates/{template_id}")),
            &TemplateUpdate { applies },
        )
        .await
    }

    /// Add `site_id` to the template's site list.
    ///
    /// A site that is already listed is left alone and no write is issued.
    pub async fn attach_site_to_template(
        &self,
        template_id: &str,
        site_id: &str,
    ) -> Result<TemplateAttach, Error> {
        let mut template = self.get_template(template_id).await?;

        if template.applies.site_ids.iter().any(|id| id == site_id) {
            debug!(template_id, site_id, "site already attached to template");
            return Ok(TemplateAttach::AlreadyAttached);
        }

        template.applies.site_ids.push(site_id.to_owned());
        self.put_template_applies(template_id, &template.applies)
            .await?;
        Ok(TemplateAttach::Attached)
    }
}
