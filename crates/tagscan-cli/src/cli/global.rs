use clap::ValueEnum;

/// Output mode shared by all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

impl From<OutputFormat> for tagscan_config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Table => Self::Table,
            OutputFormat::Raw => Self::Raw,
        }
    }
}

/// When to draw the progress bar.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ProgressMode {
    /// Only on a terminal, and never for JSON output.
    #[default]
    Auto,
    /// Whenever stderr is a terminal.
    On,
    Off,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    /// Explicit `--format`; the configured format applies when absent.
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub progress: ProgressMode,
}

impl GlobalFlags {
    /// The output format after applying `--format` over the configured one.
    #[must_use]
    pub fn resolve_format(
        &self,
        configured: tagscan_config::OutputFormat,
    ) -> tagscan_config::OutputFormat {
        self.format.map_or(configured, Into::into)
    }
}
