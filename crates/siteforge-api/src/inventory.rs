// Inventory endpoints

use tracing::debug;

use crate::client::MistClient;
use crate::error::Error;
use crate::models::{AssignDevicesRequest, AssignmentResult, InventoryDevice};

impl MistClient {
    /// List devices in the org inventory that are not assigned to any site.
    ///
    /// `GET /orgs/{org}/inventory?unassigned=true`
    ///
    /// Entries that come back with a `site_id` anyway are dropped, so every
    /// returned device is assignable.
    pub async fn list_unassigned_devices(&self) -> Result<Vec<InventoryDevice>, Error> {
        debug!("listing unassigned inventory");
        let devices: Vec<InventoryDevice> = self
            .get_with_params(&self.org_path("inventory"), &[("unassigned", "true")])
            .await?;

        let total = devices.len();
        let unassigned: Vec<_> = devices
            .into_iter()
            .filter(InventoryDevice::is_unassigned)
            .collect();
        if unassigned.len() != total {
            debug!(
                dropped = total - unassigned.len(),
                "ignoring assigned devices in unassigned listing"
            );
        }
        Ok(unassigned)
    }

    /// Assign a batch of devices to a site in one request.
    ///
    /// `PUT /orgs/{org}/inventory` with `{"op": "assign", ...}`. The API
    /// decides success per MAC; failures come back in the result rather
    /// than as an error.
    pub async fn assign_devices(
        &self,
        site_id: &str,
        macs: &[String],
    ) -> Result<AssignmentResult, Error> {
        debug!(site_id, count = macs.len(), "assigning devices to site");
        let body = AssignDevicesRequest {
            op: "assign",
            site_id,
            macs,
            managed: true,
            disable_auto_config: false,
        };
        self.put(&self.org_path("inventory"), &body).await
    }
}
