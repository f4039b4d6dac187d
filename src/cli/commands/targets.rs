//! CLI implementation for `farmgate targets`
//!
//! Shows the target matrix a build profile expands to, without touching
//! the build backend.

use anyhow::Result;

use crate::core::target::expand_targets;
use crate::infra::index::IndexLoader;

/// Execute the targets command
pub async fn execute(
    index: &str,
    distro_name: &str,
    profile_name: &str,
    source_only: bool,
) -> Result<()> {
    let loader = IndexLoader::new();
    let release_index = loader.fetch_index(index).await?;
    let profile = loader
        .fetch_profile(&release_index, distro_name, profile_name)
        .await?;

    let targets = expand_targets(&profile, source_only);
    println!("The build profile contains the following targets:");
    for target in &targets {
        println!("  - {target}");
    }

    Ok(())
}
