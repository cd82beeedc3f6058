// ── Console facade ──
//
// The async entry point consumers use. Wraps an `NmsClient`, converts
// every response into domain types, and applies the client-side checks
// (drafts, selections, expansion ceiling) before anything goes out.

use chrono::Utc;
use tracing::{debug, info, warn};

use nmsops_api::NmsClient;
use nmsops_api::types::{DiscoveryProfileRequest, TelemetryQueryRequest};

use crate::config::ConsoleConfig;
use crate::convert::provision_request;
use crate::discovery::{DiscoveryDraft, DiscoveryProfile, DiscoverySubmission};
use crate::error::CoreError;
use crate::model::device::sort_by_address;
use crate::model::{CredentialProfileDraft, CredentialProfileRef, Device, DeviceAddress};
use crate::provisioning::ProvisioningSelection;
use crate::target::{ResolvedTargetSet, ResolvedTargets};
use crate::telemetry::{
    AggregationMode, NormalizedSeries, TelemetryQuery, TelemetryQueryBuilder, TimeWindow, normalize,
};

/// Disk and CPU series for one device over one window.
///
/// Each side carries its own outcome: one counter failing never hides
/// the other's samples.
#[derive(Debug, Clone)]
pub struct DeviceTelemetry {
    pub device: DeviceAddress,
    pub window: TimeWindow,
    pub aggregation: AggregationMode,
    pub interval: u32,
    pub disk: Result<NormalizedSeries, CoreError>,
    pub cpu: Result<NormalizedSeries, CoreError>,
}

#[derive(Debug, Clone)]
pub struct Console {
    client: NmsClient,
    config: ConsoleConfig,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Result<Self, CoreError> {
        let client = NmsClient::new(config.server.as_str(), &config.transport())?;
        Ok(Self { client, config })
    }

    /// Wrap an already-built client (tests, custom transports).
    pub fn with_client(client: NmsClient, config: ConsoleConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    // ── Devices ──────────────────────────────────────────────────

    /// All devices, sorted by address. Rows whose address cannot be
    /// decoded are skipped with a warning.
    pub async fn list_devices(&self) -> Result<Vec<Device>, CoreError> {
        let raw = self.client.list_devices().await?;
        let total = raw.len();

        let mut devices: Vec<Device> = raw
            .into_iter()
            .filter_map(|d| match Device::try_from(d) {
                Ok(device) => Some(device),
                Err(e) => {
                    warn!(error = %e, "skipping device with undecodable address");
                    None
                }
            })
            .collect();
        sort_by_address(&mut devices);

        info!(count = devices.len(), skipped = total - devices.len(), "listed devices");
        Ok(devices)
    }

    /// Submit a bulk provisioning update for the current selection.
    ///
    /// On success the selection is cleared and the number of devices sent
    /// is returned. On failure the selection is left untouched.
    pub async fn submit_provisioning(
        &self,
        selection: &mut ProvisioningSelection,
    ) -> Result<usize, CoreError> {
        let addresses = selection.request()?;
        self.client
            .update_provisioning(&provision_request(&addresses))
            .await?;

        selection.clear();
        info!(count = addresses.len(), "provisioning updated");
        Ok(addresses.len())
    }

    /// Bring each address to the `provisioned` state.
    ///
    /// The backend flips the state of every address it is sent, so only
    /// devices currently in the other state go out. Returns how many were
    /// sent; zero means nothing needed changing and no request was made.
    pub async fn set_provisioned(
        &self,
        addresses: &[DeviceAddress],
        provisioned: bool,
    ) -> Result<usize, CoreError> {
        let devices = self.list_devices().await?;

        let mut selection = ProvisioningSelection::new();
        for &address in addresses {
            let device = devices
                .iter()
                .find(|d| d.address == address)
                .ok_or_else(|| CoreError::NotFound {
                    identifier: address.to_string(),
                })?;
            if device.provisioned != provisioned && !selection.contains(address) {
                selection.toggle(address);
            }
        }

        if selection.is_empty() {
            debug!(provisioned, "devices already in requested state");
            return Ok(0);
        }
        self.submit_provisioning(&mut selection).await
    }

    /// Single-device provisioning update, sent as a one-element bulk update.
    pub async fn provision_device(&self, address: DeviceAddress) -> Result<(), CoreError> {
        self.client
            .update_provisioning(&provision_request(&[address]))
            .await?;
        info!(%address, "provisioning updated");
        Ok(())
    }

    // ── Credential profiles ──────────────────────────────────────

    pub async fn list_credential_profiles(&self) -> Result<Vec<CredentialProfileRef>, CoreError> {
        let profiles: Vec<CredentialProfileRef> = self
            .client
            .list_credential_profiles()
            .await?
            .into_iter()
            .map(CredentialProfileRef::from)
            .collect();
        info!(count = profiles.len(), "listed credential profiles");
        Ok(profiles)
    }

    pub async fn create_credential_profile(
        &self,
        draft: &CredentialProfileDraft,
    ) -> Result<(), CoreError> {
        self.client
            .create_credential_profile(&draft.hostname, &draft.password, draft.port)
            .await?;
        info!(hostname = %draft.hostname, port = draft.port, "credential profile created");
        Ok(())
    }

    pub async fn update_credential_profile(
        &self,
        id: i64,
        draft: &CredentialProfileDraft,
    ) -> Result<(), CoreError> {
        self.client
            .update_credential_profile(id, &draft.hostname, &draft.password, draft.port)
            .await?;
        info!(id, "credential profile updated");
        Ok(())
    }

    pub async fn delete_credential_profile(&self, id: i64) -> Result<(), CoreError> {
        self.client.delete_credential_profile(id).await?;
        info!(id, "credential profile deleted");
        Ok(())
    }

    // ── Discovery profiles ───────────────────────────────────────

    /// All discovery profiles. Profiles with undecodable addresses are
    /// skipped with a warning.
    pub async fn list_discovery_profiles(&self) -> Result<Vec<DiscoveryProfile>, CoreError> {
        let profiles: Vec<DiscoveryProfile> = self
            .client
            .list_discovery_profiles()
            .await?
            .into_iter()
            .filter_map(|p| {
                let id = p.id;
                match DiscoveryProfile::try_from(p) {
                    Ok(profile) => Some(profile),
                    Err(e) => {
                        warn!(id, error = %e, "skipping discovery profile");
                        None
                    }
                }
            })
            .collect();
        info!(count = profiles.len(), "listed discovery profiles");
        Ok(profiles)
    }

    /// Validate a draft and create or update the profile it describes.
    pub async fn submit_discovery(
        &self,
        draft: &DiscoveryDraft,
    ) -> Result<DiscoverySubmission, CoreError> {
        let submission = draft.submit()?;
        let body = DiscoveryProfileRequest::from(&submission);

        match submission.id {
            Some(id) => {
                self.client.update_discovery_profile(id, &body).await?;
                info!(id, targets = submission.targets.size(), "discovery profile updated");
            }
            None => {
                self.client.create_discovery_profile(&body).await?;
                info!(targets = submission.targets.size(), "discovery profile created");
            }
        }
        Ok(submission)
    }

    pub async fn delete_discovery_profile(&self, id: i64) -> Result<(), CoreError> {
        self.client.delete_discovery_profile(id).await?;
        info!(id, "discovery profile deleted");
        Ok(())
    }

    pub async fn run_discovery(&self, id: i64) -> Result<(), CoreError> {
        self.client.run_discovery(id).await?;
        info!(id, "discovery started");
        Ok(())
    }

    // ── Targets ──────────────────────────────────────────────────

    /// Materialize targets under the configured expansion ceiling.
    pub fn expand_targets(&self, targets: &ResolvedTargets) -> Result<ResolvedTargetSet, CoreError> {
        targets.expand(self.config.expansion_ceiling)
    }

    // ── Telemetry ────────────────────────────────────────────────

    /// Disk and CPU series for `device` over the `duration_secs` window
    /// ending now.
    pub async fn device_telemetry(
        &self,
        device: DeviceAddress,
        duration_secs: i64,
        aggregation: AggregationMode,
    ) -> Result<DeviceTelemetry, CoreError> {
        self.device_telemetry_at(device, duration_secs, aggregation, Utc::now().timestamp())
            .await
    }

    /// Like [`device_telemetry`](Self::device_telemetry) with an explicit
    /// clock (unix seconds).
    ///
    /// Errors only when the query itself is invalid; per-counter failures
    /// land in the returned struct.
    pub async fn device_telemetry_at(
        &self,
        device: DeviceAddress,
        duration_secs: i64,
        aggregation: AggregationMode,
        now: i64,
    ) -> Result<DeviceTelemetry, CoreError> {
        let queries = TelemetryQueryBuilder::new(device)
            .duration_secs(duration_secs)
            .aggregation(aggregation)
            .counters([self.config.disk_counter, self.config.cpu_counter])
            .build(now)?;

        let [disk_query, cpu_query] = queries.as_slice() else {
            return Err(CoreError::Internal(format!(
                "expected two telemetry queries, built {}",
                queries.len()
            )));
        };

        debug!(%device, from = disk_query.window.from(), to = disk_query.window.to(), "fetching telemetry");

        let (disk, cpu) = tokio::join!(
            self.fetch_series(disk_query, device),
            self.fetch_series(cpu_query, device),
        );

        for (name, result) in [("disk", &disk), ("cpu", &cpu)] {
            if let Err(e) = result {
                warn!(counter = name, error = %e, "telemetry query failed");
            }
        }
        info!(%device, "telemetry fetched");

        Ok(DeviceTelemetry {
            device,
            window: disk_query.window,
            aggregation,
            interval: disk_query.interval,
            disk,
            cpu,
        })
    }

    async fn fetch_series(
        &self,
        query: &TelemetryQuery,
        device: DeviceAddress,
    ) -> Result<NormalizedSeries, CoreError> {
        let series = match self
            .client
            .query_telemetry(&TelemetryQueryRequest::from(query))
            .await
        {
            Ok(raw) => normalize(raw, device),
            // A 2xx body that is not JSON is a malformed payload, not a failure.
            Err(nmsops_api::Error::Deserialization { message, .. }) => NormalizedSeries {
                samples: Vec::new(),
                diagnostic: Some(CoreError::MalformedTelemetryResponse { reason: message }),
            },
            Err(e) => return Err(e.into()),
        };
        if let Some(diagnostic) = &series.diagnostic {
            warn!(counter = %query.counter_id, error = %diagnostic, "malformed telemetry response");
        }
        Ok(series)
    }
}
