//! `siteforge sites`: list the organization's sites.

use tabled::Tabled;

use siteforge_core::{CoreError, Site};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Timezone")]
    timezone: String,
    #[tabled(rename = "Country")]
    country: String,
}

impl From<&Site> for SiteRow {
    fn from(s: &Site) -> Self {
        Self {
            id: s.id.clone(),
            name: s.name.clone(),
            timezone: s.timezone.clone().unwrap_or_default(),
            country: s.country_code.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let resolved = config::resolve(global, None)?;
    let client = resolved.session.client()?;

    let sites = client.list_sites().await.map_err(CoreError::from)?;
    let out = output::render_list(
        &global.output,
        &sites,
        SiteRow::from,
        |s| s.name.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
