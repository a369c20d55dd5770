use crate::config::LookupConfig;
use crate::error::{HuntError, Result};
use reqwest::Url;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Lookup seam
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Vec<String>),
    NotFound,
}

/// Resolves an entry name to its category tags.
///
/// Implementations never fail: transport errors, timeouts and non-success
/// statuses all surface as [`LookupOutcome::NotFound`].
pub trait Lookup {
    fn lookup(&self, name: &str) -> impl Future<Output = LookupOutcome> + Send;
}

/// Lowercased, trimmed form used as the service key.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// PokeApiClient
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PokemonBody {
    types: Vec<TypeSlot>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

/// HTTP client for the `/pokemon/{name}` endpoint of a PokeAPI-compatible service.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PokeApiClient {
    pub fn new(config: &LookupConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| HuntError::Config(format!("lookup.base_url '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(HuntError::Config(format!(
                "lookup.base_url '{}' cannot carry a path",
                config.base_url
            )));
        }
        Ok(Self { http, base_url })
    }

    /// `{base}/pokemon/{key}` with `key` percent-encoded as a single path
    /// segment, so `?`, `#` and `/` in a name never leave that segment.
    pub fn endpoint(&self, key: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("pokemon").push(key);
        }
        url
    }

    /// One GET round trip. `Ok(None)` for any non-200 status.
    async fn fetch(&self, key: &str) -> Result<Option<Vec<String>>> {
        let resp = self.http.get(self.endpoint(key)).send().await?;
        if resp.status() != reqwest::StatusCode::OK {
            tracing::debug!(key, status = %resp.status(), "lookup returned non-success status");
            return Ok(None);
        }
        let body: PokemonBody = resp.json().await?;
        Ok(Some(body.types.into_iter().map(|t| t.kind.name).collect()))
    }
}

impl Lookup for PokeApiClient {
    async fn lookup(&self, name: &str) -> LookupOutcome {
        let key = normalize_name(name);
        // `.` and `..` would be dropped or resolved as a path step.
        if key.is_empty() || key == "." || key == ".." {
            return LookupOutcome::NotFound;
        }
        match self.fetch(&key).await {
            Ok(Some(categories)) => LookupOutcome::Found(categories),
            Ok(None) => LookupOutcome::NotFound,
            Err(e) => {
                tracing::warn!(key, error = %e, "lookup failed");
                LookupOutcome::NotFound
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
