//! Distribution manifest model
//!
//! The manifest is the authoritative list of a distribution's packages,
//! the repositories they come from, and the released version per
//! repository. Packages whose repository has no release section or no
//! release version are not releasable and are skipped by the trigger
//! engine rather than treated as errors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A distribution manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistManifest {
    /// Distribution name
    pub name: String,

    /// Package name -> package entry
    #[serde(default)]
    pub packages: HashMap<String, PackageEntry>,

    /// Repository name -> repository
    #[serde(default)]
    pub repositories: HashMap<String, Repository>,
}

/// A package entry pointing at its source repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageEntry {
    /// Name of the repository this package is released from
    pub repository: String,
}

/// A source repository
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    /// Release section; absent for repositories that are not released
    #[serde(default)]
    pub release: Option<ReleaseSection>,
}

/// The release section of a repository
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReleaseSection {
    /// Release repository URL
    #[serde(default)]
    pub url: Option<String>,

    /// Released version, including the packaging revision (e.g. "1.2.3-1");
    /// absent while a release is being prepared
    #[serde(default)]
    pub version: Option<String>,
}

impl DistManifest {
    /// Parse a manifest from TOML
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// All package names, sorted lexicographically
    pub fn package_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.packages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The repository a package is released from, with its name
    pub fn package_repository(&self, pkg_name: &str) -> Option<(&str, &Repository)> {
        let entry = self.packages.get(pkg_name)?;
        let repo = self.repositories.get(&entry.repository)?;
        Some((entry.repository.as_str(), repo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
        name = "dusk"

        [packages.libfoo]
        repository = "foo"

        [packages.foo-tools]
        repository = "foo"

        [packages.bare]
        repository = "bare"

        [repositories.foo.release]
        url = "https://github.com/dusk-release/foo.git"
        version = "1.2.3-1"

        [repositories.bare]
    "#;

    #[test]
    fn test_parse_manifest() {
        let manifest = DistManifest::from_toml(MANIFEST).expect("valid manifest");
        assert_eq!(manifest.name, "dusk");
        assert_eq!(manifest.packages.len(), 3);
        assert_eq!(manifest.packages["libfoo"].repository, "foo");
    }

    #[test]
    fn test_package_names_sorted() {
        let manifest = DistManifest::from_toml(MANIFEST).expect("valid manifest");
        assert_eq!(manifest.package_names(), vec!["bare", "foo-tools", "libfoo"]);
    }

    #[test]
    fn test_package_repository_lookup() {
        let manifest = DistManifest::from_toml(MANIFEST).expect("valid manifest");
        let (repo_name, repo) = manifest.package_repository("libfoo").expect("known package");
        assert_eq!(repo_name, "foo");
        let release = repo.release.as_ref().expect("release section");
        assert_eq!(release.version.as_deref(), Some("1.2.3-1"));
    }

    #[test]
    fn test_repository_without_release_section() {
        let manifest = DistManifest::from_toml(MANIFEST).expect("valid manifest");
        let (_, repo) = manifest.package_repository("bare").expect("known package");
        assert!(repo.release.is_none());
    }

    #[test]
    fn test_unknown_package() {
        let manifest = DistManifest::from_toml(MANIFEST).expect("valid manifest");
        assert!(manifest.package_repository("nope").is_none());
    }

    #[test]
    fn test_release_section_without_version() {
        let manifest = DistManifest::from_toml(
            r#"
            name = "dusk"

            [packages.wip]
            repository = "wip"

            [repositories.wip.release]
            url = "https://github.com/dusk-release/wip.git"
            "#,
        )
        .expect("valid manifest");
        let (_, repo) = manifest.package_repository("wip").expect("known package");
        assert!(repo.release.as_ref().expect("release section").version.is_none());
    }
}
