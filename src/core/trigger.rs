//! Trigger engine
//!
//! Walks packages x targets, applies the skip rules, and asks the build
//! backend to start every job that is stale or missing. Decisions are
//! returned as data in a [`TriggerReport`]; progress lines go through
//! `tracing` so callers choose the sink.

use serde::Serialize;
use std::fmt;

use crate::core::job_name::{binary_job_name, debian_package_name, source_job_name};
use crate::core::manifest::DistManifest;
use crate::core::target::Target;
use crate::core::version::is_up_to_date;
use crate::error::DispatchError;
use crate::infra::repo_index::RepoIndex;

/// One-shot trigger call against the build backend.
///
/// `Ok(true)` means the backend accepted the job, `Ok(false)` that it
/// rejected it. The engine issues at most one call per decided job and
/// never retries.
#[allow(async_fn_in_trait)]
pub trait JobDispatcher {
    async fn invoke(&mut self, job_name: &str) -> Result<bool, DispatchError>;
}

/// Why a job was put in the skipped bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The source job for the same package and platform was already
    /// triggered in this run; it covers the binary builds
    SourceAlreadyTriggered,

    /// The published artifact already matches the release version
    UpToDate,

    /// The build backend rejected or failed the trigger call
    DispatchRejected,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::SourceAlreadyTriggered => "source job already triggered",
            Self::UpToDate => "already up-to-date",
            Self::DispatchRejected => "rejected by the build backend",
        };
        f.write_str(text)
    }
}

/// A job that was considered but not triggered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedJob {
    /// Job identifier
    pub job_name: String,
    /// Skip reason
    pub reason: SkipReason,
}

/// Outcome of a trigger run, in processing order
#[derive(Debug, Default, Serialize)]
pub struct TriggerReport {
    /// Jobs the backend accepted
    pub triggered: Vec<String>,
    /// Jobs considered but not triggered
    pub skipped: Vec<SkippedJob>,
}

impl TriggerReport {
    /// Names of the skipped jobs, in processing order
    pub fn skipped_names(&self) -> Vec<&str> {
        self.skipped.iter().map(|s| s.job_name.as_str()).collect()
    }

    /// The final summary line
    pub fn summary(&self) -> String {
        format!(
            "Triggered {} jobs, skipped {} jobs.",
            self.triggered.len(),
            self.skipped.len()
        )
    }
}

/// Decide and trigger the build jobs for a set of packages over the
/// target matrix.
///
/// Per package: packages without a release section or release version are
/// skipped outright (logged, nothing recorded - there is no job to name).
/// Per target, in matrix order: a binary job is dropped when the source
/// job for its platform was already triggered in this run, an otherwise
/// runnable job is dropped when the repository index already holds its
/// release version, and everything else is dispatched. Dispatch rejections
/// and transport errors are recorded, never raised, so one bad package
/// cannot stop the rest of the run.
///
/// Targets must be in matrix order (source target first per code name,
/// see [`crate::core::target::expand_targets`]); the redundancy rule
/// tests the source job's name against the triggered set, which only
/// works when the source target was evaluated first.
pub async fn trigger_jobs<D: JobDispatcher>(
    manifest: &DistManifest,
    profile_name: &str,
    pkg_names: &[&str],
    targets: &[Target],
    repo_index: Option<&RepoIndex>,
    dispatcher: &mut D,
) -> TriggerReport {
    let mut report = TriggerReport::default();

    let mut pkg_names = pkg_names.to_vec();
    pkg_names.sort_unstable();

    for pkg_name in pkg_names {
        let (repo_name, repo) = match manifest.package_repository(pkg_name) {
            Some(found) => found,
            None => {
                tracing::warn!("Skipping package '{pkg_name}': not in the manifest");
                continue;
            }
        };
        let release = match repo.release.as_ref() {
            Some(release) => release,
            None => {
                tracing::info!(
                    "Skipping package '{pkg_name}' in repository '{repo_name}': \
                     no release section"
                );
                continue;
            }
        };
        let pkg_version = match release.version.as_deref() {
            Some(version) => version,
            None => {
                tracing::info!(
                    "Skipping package '{pkg_name}' in repository '{repo_name}': \
                     no release version"
                );
                continue;
            }
        };

        let deb_pkg_name = debian_package_name(&manifest.name, pkg_name);

        for target in targets {
            let source_name = source_job_name(
                &manifest.name,
                profile_name,
                pkg_name,
                &target.os_name,
                &target.os_code_name,
            );
            let job_name = if target.is_source() {
                source_name
            } else {
                let binary_name = binary_job_name(
                    &manifest.name,
                    profile_name,
                    pkg_name,
                    &target.os_name,
                    &target.os_code_name,
                    &target.arch,
                );
                // The membership test uses the SOURCE job's name: one
                // triggered source job suppresses every binary job for
                // the same package and platform.
                if report.triggered.contains(&source_name) {
                    tracing::info!(
                        "Skipping binary job '{binary_name}' since the source job was triggered"
                    );
                    report.skipped.push(SkippedJob {
                        job_name: binary_name,
                        reason: SkipReason::SourceAlreadyTriggered,
                    });
                    continue;
                }
                binary_name
            };

            if let Some(index) = repo_index {
                if let Some(published) = index.lookup(target, &deb_pkg_name) {
                    if is_up_to_date(published, pkg_version) {
                        tracing::info!(
                            "Skipping job '{job_name}': artifact is already up-to-date"
                        );
                        report.skipped.push(SkippedJob {
                            job_name,
                            reason: SkipReason::UpToDate,
                        });
                        continue;
                    }
                }
            }

            match dispatcher.invoke(&job_name).await {
                Ok(true) => {
                    tracing::info!("Triggered job '{job_name}'");
                    report.triggered.push(job_name);
                }
                Ok(false) => {
                    tracing::warn!("Build backend rejected job '{job_name}'");
                    report.skipped.push(SkippedJob {
                        job_name,
                        reason: SkipReason::DispatchRejected,
                    });
                }
                Err(e) => {
                    tracing::warn!("Trigger call for job '{job_name}' failed: {e}");
                    report.skipped.push(SkippedJob {
                        job_name,
                        reason: SkipReason::DispatchRejected,
                    });
                }
            }
        }
    }

    report
}
