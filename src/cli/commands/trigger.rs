//! CLI implementation for `farmgate trigger`
//!
//! Fetches the release index, manifest, and build profile, expands the
//! target matrix, optionally builds the repository staleness index, and
//! runs the trigger engine against the build backend.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::output::{create_spinner, status};
use crate::core::target::expand_targets;
use crate::core::trigger::trigger_jobs;
use crate::infra::dispatch::HttpDispatcher;
use crate::infra::index::IndexLoader;
use crate::infra::repo_index::{default_cache_dir, RepoIndexLoader};

/// Options for the trigger command
#[derive(Debug, Clone)]
pub struct TriggerOptions {
    /// Release index URL or file path
    pub index: String,
    /// Distribution name
    pub distro: String,
    /// Build profile name
    pub profile: String,
    /// Only trigger jobs whose artifacts are missing or outdated
    pub missing_only: bool,
    /// Only trigger source jobs
    pub source_only: bool,
    /// Cache directory for repository index files
    pub cache_dir: Option<PathBuf>,
    /// Print the report as JSON
    pub json: bool,
}

/// Execute the trigger command
pub async fn execute(options: TriggerOptions) -> Result<()> {
    let loader = IndexLoader::new();

    let spinner = create_spinner("Fetching release index");
    let release_index = loader.fetch_index(&options.index).await?;
    let manifest = loader.fetch_manifest(&release_index, &options.distro).await?;
    let profile = loader
        .fetch_profile(&release_index, &options.distro, &options.profile)
        .await?;
    spinner.finish_and_clear();

    let targets = expand_targets(&profile, options.source_only);
    if !options.json {
        println!("The build profile contains the following targets:");
        for target in &targets {
            println!("  - {target}");
        }
    }

    // Required build-target setting even when the staleness index is not
    // consulted; checked before anything is dispatched.
    let repo_url = profile
        .target_repository()
        .context("Invalid build profile")?;

    let repo_index = if options.missing_only {
        let cache_dir = options.cache_dir.clone().unwrap_or_else(default_cache_dir);
        let spinner = create_spinner("Fetching repository index");
        let index = RepoIndexLoader::new(cache_dir)
            .load(repo_url, &targets)
            .await?;
        spinner.finish_and_clear();
        tracing::info!("Repository index covers {} targets", index.target_count());
        Some(index)
    } else {
        None
    };

    let mut dispatcher = HttpDispatcher::connect(&profile.jenkins_url)
        .await
        .context("Failed to connect to the build backend")?;

    let pkg_names = manifest.package_names();
    let pkg_names = profile.filter_packages(&pkg_names);

    let report = trigger_jobs(
        &manifest,
        &options.profile,
        &pkg_names,
        &targets,
        repo_index.as_ref(),
        &mut dispatcher,
    )
    .await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if !report.triggered.is_empty() {
            println!(
                "{} Triggered {} job(s):",
                status::SUCCESS,
                report.triggered.len()
            );
            for job in &report.triggered {
                println!("    {job}");
            }
        }
        if !report.skipped.is_empty() {
            println!("  Skipped {} job(s):", report.skipped.len());
            for job in &report.skipped {
                println!("    {} ({})", job.job_name, job.reason);
            }
        }
        println!("{}", report.summary());
    }

    Ok(())
}
