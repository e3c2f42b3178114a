// Tracking API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, status mapping and
// empty-body detection. The API is unauthenticated and read-only, so the
// whole surface is two GETs returning bare JSON arrays.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::DailyEntry;
use crate::transport::TransportConfig;

/// Public v1 API root. Must end with `/` so endpoint paths join beneath it.
pub const DEFAULT_BASE_URL: &str = "https://api.covidtracking.com/v1/";

/// The daily-series endpoints served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `us/daily.json`: national aggregate, newest first.
    NationalDaily,
    /// `states/daily.json`: every state's rows interleaved, newest first.
    StatesDaily,
}

impl Endpoint {
    /// Path relative to the API root.
    pub fn path(self) -> &'static str {
        match self {
            Self::NationalDaily => "us/daily.json",
            Self::StatesDaily => "states/daily.json",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// HTTP client for the COVID Tracking Project API.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct TrackingClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TrackingClient {
    /// Create a client from a base URL and transport settings.
    ///
    /// A missing trailing slash on `base_url` is added so relative endpoint
    /// paths are appended instead of replacing the last path segment.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base(base_url),
        }
    }

    /// The API root every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for an endpoint.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, Error> {
        Ok(self.base_url.join(endpoint.path())?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch the national daily series, in API order (newest first).
    ///
    /// `GET {base}/us/daily.json`
    pub async fn national_daily(&self) -> Result<Vec<DailyEntry>, Error> {
        self.get_list(Endpoint::NationalDaily).await
    }

    /// Fetch every state's daily rows, in API order (newest first).
    ///
    /// `GET {base}/states/daily.json`
    pub async fn states_daily(&self) -> Result<Vec<DailyEntry>, Error> {
        self.get_list(Endpoint::StatesDaily).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode a JSON array body.
    ///
    /// An empty body or a literal `null` is reported as [`Error::EmptyBody`]
    /// rather than a decode failure.
    async fn get_list<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<Vec<T>, Error> {
        let url = self.endpoint_url(endpoint)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: preview(&body).to_owned(),
            });
        }

        let body = resp.text().await?;
        trace!(endpoint = %endpoint, bytes = body.len(), "response body received");

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(Error::EmptyBody {
                endpoint: endpoint.to_string(),
            });
        }

        serde_json::from_str(trimmed).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })
    }
}

fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// First 200 bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
