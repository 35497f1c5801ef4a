use anyhow::Context;
use tagscan_config::TagscanConfig;

use crate::cli::ScanArgs;

/// Load `.env`, then the layered configuration.
pub fn load_config() -> anyhow::Result<TagscanConfig> {
    TagscanConfig::load_with_dotenv().context("failed to load tagscan configuration")
}

/// Apply `scan` flags on top of the loaded configuration and re-validate.
pub fn apply_scan_overrides(
    mut config: TagscanConfig,
    args: &ScanArgs,
) -> anyhow::Result<TagscanConfig> {
    if let Some(policy) = args.policy {
        config.grammar.tag_policy = policy;
    }
    if let Some(invalid_nodes) = args.invalid_nodes {
        config.grammar.invalid_nodes = invalid_nodes;
    }
    if let Some(policy) = args.collation {
        config.collation.policy = policy;
    }
    if let Some(threads) = args.threads {
        config.workers.threads = threads;
    }
    if let Some(output) = &args.output {
        config.output.path = Some(output.display().to_string());
    }

    config
        .validate()
        .context("invalid configuration after applying command-line flags")?;
    Ok(config)
}
