use tagscan_config::TagscanConfig;

use crate::cli::GlobalFlags;
use crate::output::{emit, render};

/// Handle `tagscan config`: print the effective configuration.
pub fn handle(config: &TagscanConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let format = flags.resolve_format(config.output.format);
    emit(&render(config, format)?, None)
}
