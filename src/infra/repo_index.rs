//! Debian repository index access
//!
//! Builds the staleness index for a trigger run: per target, the versions
//! currently published in the target Debian repository. Index files are
//! fetched over HTTP and cached on disk so repeated runs against the same
//! repository stay cheap.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::defaults;
use crate::core::target::Target;
use crate::error::RepoIndexError;

/// Snapshot of the published package versions per target.
///
/// Absence of an entry means the artifact was never published and the
/// corresponding job must run.
#[derive(Debug, Default)]
pub struct RepoIndex {
    /// Target -> published artifact name -> published version
    data: HashMap<Target, HashMap<String, String>>,
}

impl RepoIndex {
    /// Published version of an artifact for a target, if any
    pub fn lookup(&self, target: &Target, artifact_name: &str) -> Option<&str> {
        self.data
            .get(target)
            .and_then(|artifacts| artifacts.get(artifact_name))
            .map(String::as_str)
    }

    /// Record a published version for a target
    pub fn insert(&mut self, target: Target, artifact_name: &str, version: &str) {
        self.data
            .entry(target)
            .or_default()
            .insert(artifact_name.to_string(), version.to_string());
    }

    /// Number of targets with index data
    pub fn target_count(&self) -> usize {
        self.data.len()
    }
}

/// Default location for cached repository index files
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("farmgate")
}

/// Fetches and caches Debian repository index files
#[derive(Debug)]
pub struct RepoIndexLoader {
    /// HTTP client
    client: reqwest::Client,
    /// Cache directory for fetched index files
    cache_dir: PathBuf,
    /// Cache freshness window
    cache_ttl: Duration,
}

impl RepoIndexLoader {
    /// Create a loader caching under the given directory
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(defaults::HTTP_TIMEOUT))
                .connect_timeout(Duration::from_secs(defaults::HTTP_CONNECT_TIMEOUT))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            cache_dir,
            cache_ttl: Duration::from_secs(defaults::REPO_INDEX_CACHE_TTL),
        }
    }

    /// Override the cache freshness window
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Build the staleness index for a repository over the target matrix.
    ///
    /// A repository that cannot be read is an error: without its index no
    /// staleness decision can be made.
    pub async fn load(
        &self,
        repo_base_url: &str,
        targets: &[Target],
    ) -> Result<RepoIndex, RepoIndexError> {
        let mut index = RepoIndex::default();
        for target in targets {
            let url = index_url(repo_base_url, target);
            let content = self.fetch_cached(&url).await?;
            for (artifact_name, version) in parse_package_index(&content) {
                index.insert(target.clone(), &artifact_name, &version);
            }
        }
        Ok(index)
    }

    /// Fetch a document, reusing a fresh cache file when available
    async fn fetch_cached(&self, url: &str) -> Result<String, RepoIndexError> {
        let cache_path = self.cache_path(url);

        if is_fresh(&cache_path, self.cache_ttl) {
            tracing::debug!("Using cached index file for {url}");
            return std::fs::read_to_string(&cache_path).map_err(|e| RepoIndexError::CacheError {
                path: cache_path,
                error: e.to_string(),
            });
        }

        tracing::debug!("Fetching {url}");
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| RepoIndexError::NetworkError {
                    url: url.to_string(),
                    error: e.to_string(),
                })?;
        if !response.status().is_success() {
            return Err(RepoIndexError::NetworkError {
                url: url.to_string(),
                error: format!("HTTP {}", response.status()),
            });
        }
        let content = response
            .text()
            .await
            .map_err(|e| RepoIndexError::NetworkError {
                url: url.to_string(),
                error: e.to_string(),
            })?;

        std::fs::create_dir_all(&self.cache_dir).map_err(|e| RepoIndexError::CacheError {
            path: self.cache_dir.clone(),
            error: e.to_string(),
        })?;
        std::fs::write(&cache_path, &content).map_err(|e| RepoIndexError::CacheError {
            path: cache_path,
            error: e.to_string(),
        })?;

        Ok(content)
    }

    /// Cache file path for a URL, keyed by the URL's SHA-256
    fn cache_path(&self, url: &str) -> PathBuf {
        let digest = hex::encode(Sha256::digest(url.as_bytes()));
        self.cache_dir.join(format!("{digest}.index"))
    }
}

/// Whether a cache file exists and is younger than the TTL
fn is_fresh(path: &Path, ttl: Duration) -> bool {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|mtime| mtime.elapsed().ok())
        .is_some_and(|age| age < ttl)
}

/// Index file URL for a target: `Sources` for the source pseudo-target,
/// the per-architecture `Packages` file otherwise
fn index_url(repo_base_url: &str, target: &Target) -> String {
    let base = repo_base_url.trim_end_matches('/');
    if target.is_source() {
        format!("{base}/dists/{}/main/source/Sources", target.os_code_name)
    } else {
        format!(
            "{base}/dists/{}/main/binary-{}/Packages",
            target.os_code_name, target.arch
        )
    }
}

/// Parse a Debian `Packages`/`Sources` control file into artifact name ->
/// version. Stanzas are separated by blank lines; only the `Package:` and
/// `Version:` fields matter here.
fn parse_package_index(content: &str) -> HashMap<String, String> {
    let mut versions = HashMap::new();
    let mut current_package: Option<&str> = None;
    for line in content.lines() {
        if line.trim().is_empty() {
            current_package = None;
        } else if let Some(name) = line.strip_prefix("Package:") {
            current_package = Some(name.trim());
        } else if let Some(version) = line.strip_prefix("Version:") {
            if let Some(package) = current_package {
                versions.insert(package.to_string(), version.trim().to_string());
            }
        }
    }
    versions
}
