// Discovery profile endpoints
//
// Deletion uses a plain `DELETE`; there is no method-override fallback.

use tracing::debug;

use crate::client::NmsClient;
use crate::error::Error;
use crate::types::{DiscoveryProfileListResponse, DiscoveryProfileRequest, DiscoveryProfileResponse};

impl NmsClient {
    /// `GET /api/discovery-profiles`
    pub async fn list_discovery_profiles(&self) -> Result<Vec<DiscoveryProfileResponse>, Error> {
        debug!("listing discovery profiles");
        let resp: Option<DiscoveryProfileListResponse> = self.get("discovery-profiles").await?;
        Ok(resp.and_then(|r| r.profiles).unwrap_or_default())
    }

    /// `POST /api/discovery-profiles`
    pub async fn create_discovery_profile(&self, req: &DiscoveryProfileRequest) -> Result<(), Error> {
        debug!(is_cidr = req.is_cidr, "creating discovery profile");
        self.post_no_response("discovery-profiles", req).await
    }

    /// `PUT /api/discovery-profiles/{id}`
    pub async fn update_discovery_profile(
        &self,
        id: i64,
        req: &DiscoveryProfileRequest,
    ) -> Result<(), Error> {
        debug!(id, is_cidr = req.is_cidr, "updating discovery profile");
        self.put_no_response(&format!("discovery-profiles/{id}"), req)
            .await
    }

    /// `DELETE /api/discovery-profiles/{id}`
    pub async fn delete_discovery_profile(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting discovery profile");
        self.delete(&format!("discovery-profiles/{id}")).await
    }

    /// Trigger a discovery run for one profile.
    ///
    /// `GET /api/discovery-profiles/{id}/run-discovery`
    pub async fn run_discovery(&self, id: i64) -> Result<(), Error> {
        debug!(id, "running discovery");
        self.get_no_response(&format!("discovery-profiles/{id}/run-discovery"))
            .await
    }
}
