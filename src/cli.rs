use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "elixir2txt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert Elixir source files into annotated plain-text files")]
#[command(
    long_about = "elixir2txt walks an Elixir project, skips every `deps` directory, and \
                  writes each .ex/.exs file as a flat .txt file with a metadata header, \
                  together with a _conversion_log.txt describing the run."
)]
#[command(before_help = "📜 elixir2txt - Elixir to text converter")]
#[command(after_help = "EXAMPLES:\n  \
    elixir2txt\n  \
    elixir2txt path/to/my_app --output my_app_txt\n  \
    elixir2txt path/to/my_app --dry-run\n  \
    elixir2txt --output-format json --quiet")]
pub struct Cli {
    /// Directory to convert (defaults to the current directory)
    pub source: Option<PathBuf>,

    /// Output directory (defaults to elixir_txt_<YYYYMMDD_HHMMSS>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "List the files that would be converted without writing anything")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_source_dir(self.source.clone())
            .with_output_dir(self.output.clone())
    }

    pub fn output_mode(&self) -> OutputMode {
        match self.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
