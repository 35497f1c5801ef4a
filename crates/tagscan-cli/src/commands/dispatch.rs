use tagscan_config::TagscanConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: TagscanConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Scan(args) => commands::scan::handle(&args, config, flags).await,
        Commands::Merge(args) => commands::merge::handle(&args, &config, flags),
        Commands::Config => commands::config::handle(&config, flags),
    }
}
