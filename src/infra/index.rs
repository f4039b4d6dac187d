//! Release index, manifest, and build profile fetching
//!
//! The release index is the entry document of a deployment: it lists the
//! known distributions and, per distribution, the locations of the
//! manifest and the build profiles. Locations are HTTP(S) URLs or local
//! filesystem paths; relative locations resolve against the index
//! location.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::defaults;
use crate::core::manifest::DistManifest;
use crate::core::profile::BuildProfile;
use crate::error::IndexError;

/// The release index document
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseIndex {
    /// Location the index was fetched from; base for relative locations
    #[serde(skip)]
    location: String,

    /// Distribution name -> entry
    #[serde(default)]
    distributions: HashMap<String, DistributionEntry>,
}

/// One distribution's entry in the release index
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionEntry {
    /// Manifest location
    pub manifest: String,

    /// Build profile name -> location
    #[serde(default)]
    pub build_profiles: HashMap<String, String>,
}

impl ReleaseIndex {
    /// Entry for a distribution
    pub fn distribution(&self, name: &str) -> Result<&DistributionEntry, IndexError> {
        self.distributions
            .get(name)
            .ok_or_else(|| IndexError::DistributionNotFound {
                name: name.to_string(),
            })
    }

}

/// Fetches release index documents over HTTP(S) or from local paths
#[derive(Debug)]
pub struct IndexLoader {
    /// HTTP client
    client: reqwest::Client,
}

impl IndexLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(defaults::HTTP_TIMEOUT))
                .connect_timeout(Duration::from_secs(defaults::HTTP_CONNECT_TIMEOUT))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Fetch and parse the release index
    pub async fn fetch_index(&self, location: &str) -> Result<ReleaseIndex, IndexError> {
        let content = self.fetch_document(location).await?;
        let mut index: ReleaseIndex =
            toml::from_str(&content).map_err(|e| IndexError::ParseError {
                location: location.to_string(),
                error: e.to_string(),
            })?;
        index.location = location.to_string();
        Ok(index)
    }

    /// Fetch and parse the manifest of a distribution
    pub async fn fetch_manifest(
        &self,
        index: &ReleaseIndex,
        distro_name: &str,
    ) -> Result<DistManifest, IndexError> {
        let entry = index.distribution(distro_name)?;
        let location = resolve_location(&index.location, &entry.manifest);
        let content = self.fetch_document(&location).await?;
        DistManifest::from_toml(&content).map_err(|e| IndexError::ParseError {
            location,
            error: e.to_string(),
        })
    }

    /// Fetch and parse a build profile of a distribution
    pub async fn fetch_profile(
        &self,
        index: &ReleaseIndex,
        distro_name: &str,
        profile_name: &str,
    ) -> Result<BuildProfile, IndexError> {
        let entry = index.distribution(distro_name)?;
        let profile_location =
            entry
                .build_profiles
                .get(profile_name)
                .ok_or_else(|| IndexError::ProfileNotFound {
                    name: profile_name.to_string(),
                    distro: distro_name.to_string(),
                })?;
        let location = resolve_location(&index.location, profile_location);
        let content = self.fetch_document(&location).await?;
        BuildProfile::from_toml(&content).map_err(|e| IndexError::ParseError {
            location,
            error: e.to_string(),
        })
    }

    /// Read a document from a URL or a local path
    async fn fetch_document(&self, location: &str) -> Result<String, IndexError> {
        if is_url(location) {
            let response =
                self.client
                    .get(location)
                    .send()
                    .await
                    .map_err(|e| IndexError::NetworkError {
                        location: location.to_string(),
                        error: e.to_string(),
                    })?;
            if !response.status().is_success() {
                return Err(IndexError::NetworkError {
                    location: location.to_string(),
                    error: format!("HTTP {}", response.status()),
                });
            }
            response.text().await.map_err(|e| IndexError::NetworkError {
                location: location.to_string(),
                error: e.to_string(),
            })
        } else {
            tokio::fs::read_to_string(location)
                .await
                .map_err(|e| IndexError::IoError {
                    path: PathBuf::from(location),
                    error: e.to_string(),
                })
        }
    }
}

impl Default for IndexLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Resolve a possibly-relative location against the index location
fn resolve_location(base: &str, location: &str) -> String {
    if is_url(location) || location.starts_with('/') {
        return location.to_string();
    }
    match base.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/{location}"),
        None => location.to_string(),
    }
}
