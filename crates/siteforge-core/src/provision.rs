// ── Site provisioning workflow ──
//
// One linear pass: name check, site creation, template attach, optional
// settings patch, inventory fetch, device resolution, validation,
// reconciliation, assignment. Nothing is retried and nothing is rolled
// back; a failure after creation leaves the site in place.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use siteforge_api::{InventoryDevice, MistClient, Site, TemplateAttach};

use crate::config::ProvisionConfig;
use crate::error::CoreError;
use crate::mac::{self, MacAddress};
use crate::report::AssignmentReport;
use crate::source::{self, Operator, SourceKind};

// ── Outcome ──────────────────────────────────────────────────────

/// How a run that did not fail came to an end.
///
/// Every variant is a success from the process's point of view; only
/// `Assigned` reached the assignment call.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Devices were submitted for assignment.
    Assigned { site: Site, report: AssignmentReport },
    /// The org has no unassigned devices.
    EmptyPool { site: Site },
    /// The device source yielded no candidates.
    NoCandidates { site: Site },
    /// A requested MAC is not in the unassigned pool.
    UnknownMac { site: Site, mac: MacAddress },
}

impl Outcome {
    pub fn site(&self) -> &Site {
        match self {
            Self::Assigned { site, .. }
            | Self::EmptyPool { site }
            | Self::NoCandidates { site }
            | Self::UnknownMac { site, .. } => site,
        }
    }

    /// One-line operator message for the early stops.
    pub fn stop_reason(&self) -> Option<String> {
        match self {
            Self::Assigned { .. } => None,
            Self::EmptyPool { .. } => Some("no unassigned devices in inventory".into()),
            Self::NoCandidates { .. } => Some("no devices given to add to the site".into()),
            Self::UnknownMac { mac, .. } => {
                Some(format!("device '{mac}' does not exist in unassigned inventory"))
            }
        }
    }
}

// ── Provisioner ──────────────────────────────────────────────────

/// Drives a single provisioning run against one organization.
pub struct Provisioner {
    client: MistClient,
    config: ProvisionConfig,
}

impl Provisioner {
    pub fn new(client: MistClient, config: ProvisionConfig) -> Self {
        Self { client, config }
    }

    /// Run the full workflow for `site_name`.
    ///
    /// The operator is only consulted when no device file is readable.
    pub async fn run(
        &self,
        site_name: &str,
        operator: &mut dyn Operator,
    ) -> Result<Outcome, CoreError> {
        self.ensure_name_available(site_name).await?;

        let site = self.create_site(site_name).await?;
        self.attach_template(&site).await?;

        if let Some(vars) = &self.config.vars {
            self.apply_settings(&site, vars).await?;
        } else {
            debug!("no site variables configured, skipping settings patch");
        }

        let pool = self.client.list_unassigned_devices().await?;
        info!(count = pool.len(), "fetched unassigned inventory");
        if pool.is_empty() {
            return Ok(Outcome::EmptyPool { site });
        }

        let macs = self.resolve_devices(&pool, operator)?;
        if macs.is_empty() {
            return Ok(Outcome::NoCandidates { site });
        }

        if let Err(missing) = mac::reconcile(&macs, &pool) {
            info!(mac = %missing, "device not in unassigned inventory, stopping");
            return Ok(Outcome::UnknownMac {
                mac: missing.clone(),
                site,
            });
        }

        let report = self.assign(&site, macs).await?;
        Ok(Outcome::Assigned { site, report })
    }

    // ── Steps ────────────────────────────────────────────────────

    /// Fail with `NameConflict` if any site already has exactly this name.
    pub async fn ensure_name_available(&self, site_name: &str) -> Result<(), CoreError> {
        if site_name.trim().is_empty() {
            return Err(CoreError::InvalidSiteName);
        }

        let sites = self.client.list_sites().await?;
        if sites.iter().any(|s| s.name == site_name) {
            return Err(CoreError::NameConflict {
                name: site_name.to_owned(),
            });
        }

        info!(site = site_name, "site name is available");
        Ok(())
    }

    pub async fn create_site(&self, site_name: &str) -> Result<Site, CoreError> {
        let draft = self.config.site_draft(site_name);
        info!(site = site_name, "creating site");
        let site = self.client.create_site(&draft).await?;
        info!(site = %site.name, id = %site.id, "site created");
        Ok(site)
    }

    pub async fn attach_template(&self, site: &Site) -> Result<TemplateAttach, CoreError> {
        let template_id = &self.config.templates.wlan;
        let outcome = self
            .client
            .attach_site_to_template(template_id, &site.id)
            .await?;
        match outcome {
            TemplateAttach::Attached => {
                info!(site = %site.name, template_id, "site added to template");
            }
            TemplateAttach::AlreadyAttached => {
                info!(site = %site.name, template_id, "site already in template");
            }
        }
        Ok(outcome)
    }

    pub async fn apply_settings(
        &self,
        site: &Site,
        vars: &Map<String, Value>,
    ) -> Result<(), CoreError> {
        info!(site = %site.name, count = vars.len(), "applying site variables");
        self.client.apply_site_settings(&site.id, vars).await?;
        Ok(())
    }

    /// Read candidates from the file or the operator, then validate them.
    pub fn resolve_devices(
        &self,
        pool: &[InventoryDevice],
        operator: &mut dyn Operator,
    ) -> Result<Vec<MacAddress>, CoreError> {
        let mut source = source::select_source(&self.config.device_file, operator);
        let candidates = source.read_candidates(pool)?;
        match source.kind() {
            SourceKind::File(path) => {
                debug!(path = %path.display(), count = candidates.len(), "candidates from file");
            }
            SourceKind::Prompt => debug!(count = candidates.len(), "candidates from operator"),
        }

        let macs = mac::validate(&candidates)?;
        debug!(count = macs.len(), "validated device MACs");
        Ok(macs)
    }

    pub async fn assign(
        &self,
        site: &Site,
        macs: Vec<MacAddress>,
    ) -> Result<AssignmentReport, CoreError> {
        let macs: Vec<String> = macs.into_iter().map(MacAddress::into_string).collect();
        info!(site = %site.name, count = macs.len(), "assigning devices to site");
        let result = self.client.assign_devices(&site.id, &macs).await?;
        Ok(AssignmentReport::new(site.name.clone(), result))
    }
}
