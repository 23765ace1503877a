use crate::converter::run_context::RunContext;
use crate::error::{Elixir2TxtError, Result};
use std::fmt::Display;
use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};

pub const LOG_TITLE: &str = "Elixir Files Conversion Log";

/// The `_conversion_log.txt` of one run.
///
/// The file stays open for the whole run and every line is pushed to disk as
/// soon as it is complete, so an interrupted run still leaves a usable log.
pub struct ConversionLog {
    writer: LineWriter<File>,
    path: PathBuf,
}

impl ConversionLog {
    /// Create (or truncate) the log and write its header.
    pub fn create<P: Into<PathBuf>>(path: P, context: &RunContext) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path).map_err(|source| Elixir2TxtError::LogFile {
            path: path.clone(),
            source,
        })?;

        let mut log = Self {
            writer: LineWriter::new(file),
            path,
        };

        let header = log.write_header(context);
        log.check(header)?;
        Ok(log)
    }

    fn write_header(&mut self, context: &RunContext) -> io::Result<()> {
        writeln!(self.writer, "{}", LOG_TITLE)?;
        writeln!(self.writer, "Generated on: {}", context.started_at_display())?;
        writeln!(
            self.writer,
            "Source directory: {}",
            context.absolute_source_dir().display()
        )?;
        writeln!(
            self.writer,
            "Output directory: {}",
            context.absolute_output_dir().display()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn record_success(&mut self, source: &Path, output_name: &str) -> Result<()> {
        let written = writeln!(
            self.writer,
            "SUCCESS: {} -> {}",
            source.display(),
            output_name
        );
        self.check(written)
    }

    pub fn record_error(&mut self, source: &Path, error: &dyn Display) -> Result<()> {
        let written = writeln!(
            self.writer,
            "ERROR converting {}: {}",
            source.display(),
            error
        );
        self.check(written)
    }

    /// Flush and close the log, returning its path.
    pub fn finish(mut self) -> Result<PathBuf> {
        let flushed = self.writer.flush();
        self.check(flushed)?;
        Ok(self.path)
    }

    fn check(&self, result: io::Result<()>) -> Result<()> {
        result.map_err(|source| Elixir2TxtError::LogFile {
            path: self.path.clone(),
            source,
        })
    }
}
