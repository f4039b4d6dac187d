//! Build profile model
//!
//! A build profile declares which OS code names and architectures a
//! release is built for, where the build backend lives, which Debian
//! repository receives the artifacts, and which packages are in scope.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ProfileError;

/// A build profile for one distribution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildProfile {
    /// Build backend URL (Jenkins-style)
    pub jenkins_url: String,

    /// Debian repository the built artifacts are published to. Optional
    /// in the profile document; trigger runs require it
    #[serde(default)]
    pub target_repository: Option<String>,

    /// OS name -> OS code name -> architectures
    #[serde(default)]
    pub targets: HashMap<String, HashMap<String, Vec<String>>>,

    /// When present, only these packages are considered
    #[serde(default)]
    pub package_whitelist: Option<Vec<String>>,

    /// Packages excluded from this profile
    #[serde(default)]
    pub package_blacklist: Vec<String>,
}

impl BuildProfile {
    /// Parse a build profile from TOML
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// OS names declared by the profile
    pub fn os_names(&self) -> Vec<&str> {
        self.targets.keys().map(String::as_str).collect()
    }

    /// Code names declared for an OS name
    pub fn os_code_names(&self, os_name: &str) -> Vec<&str> {
        self.targets
            .get(os_name)
            .map(|code_names| code_names.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Architectures declared for an (OS name, code name) pair
    pub fn arches(&self, os_name: &str, os_code_name: &str) -> Vec<&str> {
        self.targets
            .get(os_name)
            .and_then(|code_names| code_names.get(os_code_name))
            .map(|arches| arches.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Apply the profile's whitelist and blacklist to a package list,
    /// preserving input order
    pub fn filter_packages<'a>(&self, pkg_names: &[&'a str]) -> Vec<&'a str> {
        pkg_names
            .iter()
            .copied()
            .filter(|name| {
                self.package_whitelist
                    .as_ref()
                    .is_none_or(|whitelist| whitelist.iter().any(|w| w == name))
            })
            .filter(|name| !self.package_blacklist.iter().any(|b| b == name))
            .collect()
    }

    /// The target repository URL, a required build-target setting
    pub fn target_repository(&self) -> Result<&str, ProfileError> {
        self.target_repository
            .as_deref()
            .ok_or(ProfileError::MissingSetting {
                setting: "target_repository".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"
        jenkins_url = "http://build.example.org"
        target_repository = "http://repo.example.org/ubuntu"
        package_blacklist = ["experimental-pkg"]

        [targets.ubuntu]
        noble = ["amd64", "arm64"]
        jammy = ["amd64"]
    "#;

    #[test]
    fn test_parse_profile() {
        let profile = BuildProfile::from_toml(PROFILE).expect("valid profile");
        assert_eq!(profile.jenkins_url, "http://build.example.org");
        assert_eq!(
            profile.target_repository().expect("configured"),
            "http://repo.example.org/ubuntu"
        );
        assert_eq!(profile.arches("ubuntu", "noble"), vec!["amd64", "arm64"]);
    }

    #[test]
    fn test_missing_jenkins_url_fails_to_parse() {
        assert!(BuildProfile::from_toml("[targets.ubuntu]\nnoble = []").is_err());
    }

    #[test]
    fn test_unknown_os_yields_empty_lists() {
        let profile = BuildProfile::from_toml(PROFILE).expect("valid profile");
        assert!(profile.os_code_names("debian").is_empty());
        assert!(profile.arches("debian", "trixie").is_empty());
    }

    #[test]
    fn test_filter_packages_blacklist() {
        let profile = BuildProfile::from_toml(PROFILE).expect("valid profile");
        let filtered = profile.filter_packages(&["libfoo", "experimental-pkg", "foo-tools"]);
        assert_eq!(filtered, vec!["libfoo", "foo-tools"]);
    }

    #[test]
    fn test_filter_packages_whitelist() {
        let profile = BuildProfile::from_toml(
            r#"
            jenkins_url = "http://build.example.org"
            package_whitelist = ["libfoo"]

            [targets.ubuntu]
            noble = ["amd64"]
            "#,
        )
        .expect("valid profile");
        let filtered = profile.filter_packages(&["libfoo", "foo-tools"]);
        assert_eq!(filtered, vec!["libfoo"]);
    }

    #[test]
    fn test_missing_target_repository() {
        let profile = BuildProfile::from_toml(
            r#"
            jenkins_url = "http://build.example.org"

            [targets.ubuntu]
            noble = ["amd64"]
            "#,
        )
        .expect("valid profile");
        assert!(profile.target_repository().is_err());
    }
}
