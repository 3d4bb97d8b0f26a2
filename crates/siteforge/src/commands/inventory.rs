//! `siteforge inventory`: list devices not yet claimed by a site.

use siteforge_core::CoreError;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::operator::InventoryRow;
use crate::output;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let resolved = config::resolve(global, None)?;
    let client = resolved.session.client()?;

    let devices = client
        .list_unassigned_devices()
        .await
        .map_err(CoreError::from)?;
    tracing::info!(count = devices.len(), "fetched unassigned inventory");

    let out = output::render_list(
        &global.output,
        &devices,
        InventoryRow::from,
        |d| d.mac.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
