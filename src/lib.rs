pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod logging;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, SourceConfig, LOG_FILE_NAME};
pub use error::{Elixir2TxtError, Result, UserFriendlyError};

// Core functionality re-exports
pub use converter::{
    ConversionProgress, ConversionReport, ConvertedFile, Converter, FailedFile, PlannedConversion,
};
pub use scanner::{FileFilter, SourceFile, SourceScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use chrono::Local;
use std::path::Path;

/// Main library interface for elixir2txt
pub struct Elixir2Txt {
    config: Config,
    converter: Converter,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl Elixir2Txt {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);
        let converter = Converter::new(&config.source);

        Self {
            config,
            converter,
            output_formatter,
            progress_manager,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Ok(Self::new(
            config,
            cli_args.output_mode(),
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Convert the configured source directory into the configured (or
    /// timestamped) output directory.
    pub fn run(&self) -> Result<ConversionReport> {
        let started_at = Local::now();
        let output_dir = self.config.output_directory_for(&started_at);
        self.convert_at(&self.config.source.directory, &output_dir, started_at)
    }

    /// Convert `source_dir` into `output_dir`.
    pub fn convert(&self, source_dir: &Path, output_dir: &Path) -> Result<ConversionReport> {
        self.convert_at(source_dir, output_dir, Local::now())
    }

    fn convert_at(
        &self,
        source_dir: &Path,
        output_dir: &Path,
        started_at: chrono::DateTime<Local>,
    ) -> Result<ConversionReport> {
        self.output_formatter.start_operation(&format!(
            "Converting Elixir files from {}",
            source_dir.display()
        ));

        let spinner = self.progress_manager.create_conversion_spinner();
        let progress_callback = {
            let pb = spinner.clone();
            move |progress: &ConversionProgress| {
                ui::progress::update_conversion_progress(&pb, progress);
            }
        };

        let result =
            self.converter
                .convert(source_dir, output_dir, started_at, Some(&progress_callback));

        match result {
            Ok(report) => {
                ui::progress::finish_progress_with_summary(
                    &spinner,
                    &format!("Converted {} files", report.converted.len()),
                    report.duration,
                );
                self.progress_manager.clear();
                Ok(report)
            }
            Err(e) => {
                spinner.abandon();
                self.progress_manager.clear();
                Err(e)
            }
        }
    }

    /// What a run of the configured source directory would produce, without
    /// writing anything.
    pub fn plan(&self) -> Vec<PlannedConversion> {
        self.converter.plan(&self.config.source.directory)
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &Elixir2TxtError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convert every `.ex`/`.exs` file under `source_dir` into `output_dir` with
/// default settings and no terminal output.
pub fn convert_elixir_to_txt<S, O>(source_dir: S, output_dir: O) -> Result<ConversionReport>
where
    S: AsRef<Path>,
    O: AsRef<Path>,
{
    Converter::default().convert(
        source_dir.as_ref(),
        output_dir.as_ref(),
        Local::now(),
        None,
    )
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
