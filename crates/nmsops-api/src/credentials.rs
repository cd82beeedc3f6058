// Credential profile endpoints
//
// The password is write-only: it is exposed only while the request body
// is being serialized and never read back.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::NmsClient;
use crate::error::Error;
use crate::types::{
    CredentialProfileListResponse, CredentialProfileRequest, CredentialProfileResponse,
};

impl NmsClient {
    /// `GET /api/credential-profiles`
    pub async fn list_credential_profiles(&self) -> Result<Vec<CredentialProfileResponse>, Error> {
        debug!("listing credential profiles");
        let resp: Option<CredentialProfileListResponse> =
            self.get("credential-profiles").await?;
        Ok(resp.and_then(|r| r.profiles).unwrap_or_default())
    }

    /// `POST /api/credential-profiles`
    pub async fn create_credential_profile(
        &self,
        hostname: &str,
        password: &SecretString,
        port: u16,
    ) -> Result<(), Error> {
        debug!(hostname, port, "creating credential profile");
        let body = CredentialProfileRequest {
            hostname,
            password: password.expose_secret(),
            port,
        };
        self.post_no_response("credential-profiles", &body).await
    }

    /// `PUT /api/credential-profiles/{id}`
    pub async fn update_credential_profile(
        &self,
        id: i64,
        hostname: &str,
        password: &SecretString,
        port: u16,
    ) -> Result<(), Error> {
        debug!(id, hostname, port, "updating credential profile");
        let body = CredentialProfileRequest {
            hostname,
            password: password.expose_secret(),
            port,
        };
        self.put_no_response(&format!("credential-profiles/{id}"), &body)
            .await
    }

    /// `DELETE /api/credential-profiles/{id}`
    pub async fn delete_credential_profile(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting credential profile");
        self.delete(&format!("credential-profiles/{id}")).await
    }
}
