//! Build target type and target matrix expansion
//!
//! A target identifies one build job's platform: OS name, distribution
//! code name, and an architecture. The pseudo-architecture `source` marks
//! the job that builds the source package rather than a binary.

use std::fmt;

use crate::config::defaults::{ALLOWED_ARCHES, SOURCE_ARCH, SUPPORTED_OS_NAME};
use crate::core::profile::BuildProfile;

/// A (os name, os code name, architecture) triple identifying one build
/// job's platform. Targets are generated once per run and never mutated;
/// they serve as lookup keys into the repository index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Target {
    /// OS name (e.g. "ubuntu")
    pub os_name: String,

    /// OS code name (e.g. "noble")
    pub os_code_name: String,

    /// Architecture, or [`SOURCE_ARCH`] for the source package build
    pub arch: String,
}

impl Target {
    /// Create a binary target for a concrete architecture
    pub fn new(os_name: &str, os_code_name: &str, arch: &str) -> Self {
        Self {
            os_name: os_name.to_string(),
            os_code_name: os_code_name.to_string(),
            arch: arch.to_string(),
        }
    }

    /// Create the source target for a code name
    pub fn source(os_name: &str, os_code_name: &str) -> Self {
        Self::new(os_name, os_code_name, SOURCE_ARCH)
    }

    /// Whether this is the source pseudo-target
    pub fn is_source(&self) -> bool {
        self.arch == SOURCE_ARCH
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.os_name, self.os_code_name, self.arch)
    }
}

/// Expand the OS/code-name/architecture combinations declared by a build
/// profile into the ordered target matrix.
///
/// Per code name the source target always comes first, followed by one
/// binary target per allow-listed architecture (none when `source_only`
/// is set). OS names outside the supported family and architectures the
/// buildfarm has no agents for are dropped. OS names, code names, and
/// architectures are each processed in lexicographic order so the matrix
/// is deterministic regardless of profile file order.
pub fn expand_targets(profile: &BuildProfile, source_only: bool) -> Vec<Target> {
    let mut targets = Vec::new();

    let mut os_names = profile.os_names();
    os_names.sort();
    for os_name in os_names {
        if os_name != SUPPORTED_OS_NAME {
            tracing::debug!("Ignoring unsupported OS name: {os_name}");
            continue;
        }
        let mut code_names = profile.os_code_names(os_name);
        code_names.sort();
        for os_code_name in code_names {
            targets.push(Target::source(os_name, os_code_name));
            if source_only {
                continue;
            }
            let mut arches = profile.arches(os_name, os_code_name);
            arches.sort();
            for arch in arches {
                if !ALLOWED_ARCHES.contains(&arch) {
                    tracing::warn!("Skipping arch: {arch}");
                    continue;
                }
                targets.push(Target::new(os_name, os_code_name, arch));
            }
        }
    }

    targets
}
