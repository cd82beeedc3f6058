// Telemetry endpoint
//
// The counter store returns loosely-typed JSON because its response shape
// differs between backend versions. The body is handed back untouched;
// nmsops-core resolves the shape.

use tracing::debug;

use crate::client::NmsClient;
use crate::error::Error;
use crate::types::TelemetryQueryRequest;

impl NmsClient {
    /// Run one counter query.
    ///
    /// `POST /api/query`. An empty success body yields `Value::Null`.
    pub async fn query_telemetry(
        &self,
        query: &TelemetryQueryRequest,
    ) -> Result<serde_json::Value, Error> {
        debug!(
            counter_id = query.counter_id,
            from = query.from,
            to = query.to,
            interval = query.interval,
            "querying telemetry"
        );
        self.post("query", query).await
    }
}
