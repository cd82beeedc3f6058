// Device endpoints
//
// Device inventory and bulk provisioning-state updates.

use tracing::debug;

use crate::client::NmsClient;
use crate::error::Error;
use crate::types::{DeviceListResponse, DeviceResponse, ProvisionUpdateRequest};

impl NmsClient {
    /// List all known devices.
    ///
    /// `GET /api/devices`. A `null` device list decodes as empty.
    pub async fn list_devices(&self) -> Result<Vec<DeviceResponse>, Error> {
        debug!("listing devices");
        let resp: Option<DeviceListResponse> = self.get("devices").await?;
        Ok(resp.and_then(|r| r.devices).unwrap_or_default())
    }

    /// Flip the provisioning state of every listed device.
    ///
    /// `PUT /api/devices/update-provisioning`
    pub async fn update_provisioning(&self, req: &ProvisionUpdateRequest) -> Result<(), Error> {
        debug!(count = req.provision_update_ips.len(), "updating provisioning");
        self.put_no_response("devices/update-provisioning", req)
            .await
    }
}
