//! Common test utilities and helpers
//!
//! This module provides shared fixtures for integration tests: a
//! temporary release index tree (index, manifest, build profile) and
//! canonical job names for the fixture distribution.

use std::path::PathBuf;
use tempfile::TempDir;

/// Source job name for the fixture package on noble
#[allow(dead_code)]
pub const FOO_SOURCE: &str = "dusk_default__foo__ubuntu_noble__source";

/// Binary job name for the fixture package on noble/amd64
#[allow(dead_code)]
pub const FOO_BINARY: &str = "dusk_default__foo__ubuntu_noble_amd64__binary";

/// A release index tree in a temporary directory
pub struct TestIndex {
    /// Temporary directory holding the index documents
    pub dir: TempDir,
}

impl TestIndex {
    /// Create an empty index tree
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Location of the index document
    pub fn location(&self) -> String {
        self.dir.path().join("index.toml").display().to_string()
    }

    /// Create a file in the index tree
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Path to a fresh cache directory inside the tree
    #[allow(dead_code)]
    pub fn cache_dir(&self) -> PathBuf {
        self.dir.path().join("cache")
    }

    /// Write the standard fixture: distribution "dusk" with package `foo`
    /// released at 1.2.3-1, one code name `noble`, arches amd64 + arm64
    /// (arm64 is not allow-listed), and a `default` build profile. With
    /// `None` the profile omits the `target_repository` setting.
    pub fn write_standard(&self, jenkins_url: &str, target_repository: Option<&str>) {
        self.create_file(
            "index.toml",
            r#"
            [distributions.dusk]
            manifest = "dusk/manifest.toml"

            [distributions.dusk.build_profiles]
            default = "dusk/profiles/default.toml"
            "#,
        );
        self.create_file(
            "dusk/manifest.toml",
            r#"
            name = "dusk"

            [packages.foo]
            repository = "foo"

            [repositories.foo.release]
            url = "https://github.com/dusk-release/foo.git"
            version = "1.2.3-1"
            "#,
        );
        let target_repository_line = match target_repository {
            Some(url) => format!("target_repository = \"{url}\"\n"),
            None => String::new(),
        };
        self.create_file(
            "dusk/profiles/default.toml",
            &format!(
                r#"
                jenkins_url = "{jenkins_url}"
                {target_repository_line}
                [targets.ubuntu]
                noble = ["amd64", "arm64"]
                "#
            ),
        );
    }
}

impl Default for TestIndex {
    fn default() -> Self {
        Self::new()
    }
}
