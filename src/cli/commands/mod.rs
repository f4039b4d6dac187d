//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod targets;
pub mod trigger;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::config::urls;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trigger the stale or missing release build jobs of a distribution
    Trigger {
        /// Release index URL or file path
        #[arg(long, env = "FARMGATE_INDEX", default_value = urls::RELEASE_INDEX)]
        index: String,

        /// Distribution name
        #[arg(long)]
        distro: String,

        /// Build profile name
        #[arg(long, default_value = "default")]
        profile: String,

        /// Only trigger jobs whose artifacts are missing or outdated
        #[arg(long)]
        missing_only: bool,

        /// Only trigger source jobs, no binary jobs
        #[arg(long)]
        source_only: bool,

        /// Cache directory for repository index files
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the target matrix a build profile expands to
    Targets {
        /// Release index URL or file path
        #[arg(long, env = "FARMGATE_INDEX", default_value = urls::RELEASE_INDEX)]
        index: String,

        /// Distribution name
        #[arg(long)]
        distro: String,

        /// Build profile name
        #[arg(long, default_value = "default")]
        profile: String,

        /// Only list source targets
        #[arg(long)]
        source_only: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self) -> Result<()> {
        match self {
            Self::Trigger {
                index,
                distro,
                profile,
                missing_only,
                source_only,
                cache_dir,
                json,
            } => {
                let options = trigger::TriggerOptions {
                    index,
                    distro,
                    profile,
                    missing_only,
                    source_only,
                    cache_dir,
                    json,
                };
                trigger::execute(options).await
            }
            Self::Targets {
                index,
                distro,
                profile,
                source_only,
            } => targets::execute(&index, &distro, &profile, source_only).await,
        }
    }
}
