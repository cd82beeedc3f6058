// Hand-crafted async HTTP client for the nmsops backend.
//
// Base path: {server}/api/
// Endpoint groups (devices, credential profiles, discovery profiles,
// telemetry) are implemented as inherent methods in sibling modules to
// keep this file focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the backend REST API.
///
/// Stateless apart from the pooled `reqwest::Client`; safe to share
/// behind an `Arc` and call concurrently.
#[derive(Debug, Clone)]
pub struct NmsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NmsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a server URL and transport config.
    ///
    /// `server` may be given with or without the trailing `/api`.
    pub fn new(server: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(server, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(server: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(server)?;
        Ok(Self { http, base_url })
    }

    /// The normalized base URL (always ends with `/api/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }

        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn get_no_response(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn put_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            // An empty 2xx body decodes as JSON null.
            let text = if body.trim().is_empty() { "null" } else { body.as_str() };
            serde_json::from_str(text).map_err(|e| {
                let head = preview(&body);
                Error::Deserialization {
                    message: format!("{e} (body preview: {head:?})"),
                    body: body.clone(),
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|err| err.error.or(err.message))
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    preview(&raw).to_owned()
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// At most the first 200 characters of a response body.
fn preview(body: &str) -> &str {
    body.char_indices().nth(200).map_or(body, |(i, _)| &body[..i])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_api_suffix() {
        let url = NmsClient::normalize_base_url("http://localhost:8080").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/");
    }

    #[test]
    fn base_url_keeps_existing_api_suffix() {
        let url = NmsClient::normalize_base_url("http://localhost:8080/api/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/");
    }

    #[test]
    fn base_url_rejects_garbage() {
        assert!(matches!(
            NmsClient::normalize_base_url("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
