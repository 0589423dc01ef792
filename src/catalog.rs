//! Remote catalog metadata and the default HTTP lookup source.
//!
//! The catalog is the remote registry of published app versions. The core
//! only needs one [`CatalogEntry`] per evaluation cycle; how it is obtained
//! is behind the [`CatalogSource`] trait. [`HttpCatalogSource`] is the
//! built-in implementation: a single blocking GET of the store's JSON lookup
//! document, no retries.

use crate::error::{LookoutError, Result};
use crate::version::VersionIdentifier;
use serde::Deserialize;
use std::time::Duration;

/// One published release as described by the remote catalog.
///
/// Immutable once obtained; produced fresh each fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// The published version.
    pub version: VersionIdentifier,
    /// Minimum device OS the release supports.
    pub minimum_os_version: VersionIdentifier,
    /// Store page the Update action navigates to, when the catalog reports one.
    pub download_url: Option<String>,
    /// Release notes text, when the catalog reports any.
    pub release_notes: Option<String>,
}

/// Source of catalog metadata.
///
/// A fetch failure means "cannot evaluate this cycle": the caller aborts with
/// no state change and the next cycle starts fresh. The core never retries.
pub trait CatalogSource {
    /// Fetch the current catalog entry for the app.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Fetch`] on transport or decode failure, or
    /// when the catalog has no entry for the app.
    fn fetch(&self) -> Result<CatalogEntry>;
}

/// Lookup document returned by the catalog endpoint.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResult {
    version: String,
    minimum_os_version: String,
    track_view_url: Option<String>,
    release_notes: Option<String>,
}

impl TryFrom<LookupResult> for CatalogEntry {
    type Error = LookoutError;

    fn try_from(raw: LookupResult) -> Result<Self> {
        // A malformed version in the lookup document is a decode failure of
        // this cycle, not a construction error inside the core.
        let version = VersionIdentifier::parse(&raw.version)
            .map_err(|e| LookoutError::Fetch(format!("catalog version: {e}")))?;
        let minimum_os_version = VersionIdentifier::parse(&raw.minimum_os_version)
            .map_err(|e| LookoutError::Fetch(format!("catalog minimum OS version: {e}")))?;

        Ok(Self {
            version,
            minimum_os_version,
            download_url: raw.track_view_url,
            release_notes: raw.release_notes,
        })
    }
}

/// Blocking HTTP catalog source.
///
/// One attempt per call with explicit connect/read timeouts. Retry and
/// backoff policy belongs to the embedder, not here.
pub struct HttpCatalogSource {
    agent: ureq::Agent,
    lookup_url: String,
}

impl HttpCatalogSource {
    /// Create a source that queries the given lookup URL.
    pub fn new(lookup_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(30))
            .build();

        Self {
            agent,
            lookup_url: lookup_url.into(),
        }
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch(&self) -> Result<CatalogEntry> {
        tracing::debug!("catalog lookup: {}", self.lookup_url);

        let response = self
            .agent
            .get(&self.lookup_url)
            .set("User-Agent", concat!("lookout/", env!("CARGO_PKG_VERSION")))
            .call()
            .map_err(|e| LookoutError::Fetch(format!("lookup request failed: {e}")))?;

        let document: LookupResponse = response
            .into_json()
            .map_err(|e| LookoutError::Fetch(format!("cannot decode lookup document: {e}")))?;

        let first = document
            .results
            .into_iter()
            .next()
            .ok_or_else(|| LookoutError::Fetch("lookup returned no results".to_owned()))?;

        let entry = CatalogEntry::try_from(first)?;
        tracing::debug!("catalog reports version {}", entry.version);
        Ok(entry)
    }
}
