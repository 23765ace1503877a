pub mod conversion_log;
pub mod file_converter;
pub mod naming;
pub mod report;
pub mod run_context;

pub use conversion_log::ConversionLog;
pub use file_converter::{ConversionProgress, FileConverter};
pub use naming::OutputNamer;
pub use report::{ConversionReport, ConvertedFile, FailedFile, PlannedConversion};
pub use run_context::RunContext;

use crate::config::{SourceConfig, LOG_FILE_NAME};
use crate::error::{Elixir2TxtError, Result};
use crate::scanner::SourceScanner;
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Walks a source tree and writes the flat, annotated copy of it.
pub struct Converter {
    scanner: SourceScanner,
    file_converter: FileConverter,
}

impl Converter {
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            scanner: SourceScanner::new(config),
            file_converter: FileConverter::new(),
        }
    }

    /// Convert every matching file under `source_dir` into `output_dir`.
    ///
    /// Only failing to create the output directory or to write the log aborts
    /// the run. A file that cannot be read or written gets an `ERROR` line in
    /// the log and the walk moves on.
    pub fn convert(
        &self,
        source_dir: &Path,
        output_dir: &Path,
        started_at: DateTime<Local>,
        progress_callback: Option<&dyn Fn(&ConversionProgress)>,
    ) -> Result<ConversionReport> {
        let context = RunContext::new(source_dir, output_dir, started_at);

        fs::create_dir_all(output_dir).map_err(|source| Elixir2TxtError::OutputDirectory {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut log = ConversionLog::create(output_dir.join(LOG_FILE_NAME), &context)?;
        let mut namer = OutputNamer::new();
        let mut progress = ConversionProgress::new();
        let mut converted = Vec::new();
        let mut failed = Vec::new();

        info!(
            "Converting {} into {}",
            source_dir.display(),
            output_dir.display()
        );

        for file in self.scanner.scan(source_dir) {
            let output_name = namer.assign(&file);
            let dest = output_dir.join(&output_name);

            match self.file_converter.convert(&file, &dest) {
                Ok(bytes_written) => {
                    debug!("{} -> {}", file.display_path(), output_name);
                    log.record_success(&file.source_path, &output_name)?;
                    progress.record_success(file.filename.clone(), bytes_written);
                    converted.push(ConvertedFile {
                        source_path: file.source_path,
                        output_name,
                        bytes_written,
                    });
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!("Failed to convert {}: {}", file.display_path(), e);
                    log.record_error(&file.source_path, &e)?;
                    progress.record_failure(file.filename.clone());
                    failed.push(FailedFile {
                        source_path: file.source_path,
                        message: e.to_string(),
                    });
                }
            }

            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        let log_path = log.finish()?;

        info!(
            "Converted {} file(s), {} failed",
            converted.len(),
            failed.len()
        );

        Ok(ConversionReport {
            source_directory: context.source_dir,
            output_directory: context.output_dir,
            log_path,
            started_at,
            duration: progress.elapsed(),
            converted,
            failed,
        })
    }

    /// Name every matching file exactly as `convert` would, without creating
    /// or writing anything.
    pub fn plan(&self, source_dir: &Path) -> Vec<PlannedConversion> {
        let mut namer = OutputNamer::new();

        self.scanner
            .scan(source_dir)
            .map(|file| {
                let output_name = namer.assign(&file);
                PlannedConversion {
                    source_path: file.source_path,
                    output_name,
                }
            })
            .collect()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(&SourceConfig::default())
    }
}
