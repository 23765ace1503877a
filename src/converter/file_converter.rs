use crate::converter::run_context::HUMAN_TIMESTAMP_FORMAT;
use crate::error::{Elixir2TxtError, Result};
use crate::scanner::SourceFile;
use chrono::{DateTime, Local};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

pub const SEPARATOR_WIDTH: usize = 80;

#[derive(Debug, Clone)]
pub struct ConversionProgress {
    pub files_converted: usize,
    pub files_failed: usize,
    pub bytes_written: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
}

impl ConversionProgress {
    pub fn new() -> Self {
        Self {
            files_converted: 0,
            files_failed: 0,
            bytes_written: 0,
            current_file: None,
            start_time: Instant::now(),
        }
    }

    pub fn record_success(&mut self, filename: String, bytes: u64) {
        self.files_converted += 1;
        self.bytes_written += bytes;
        self.current_file = Some(filename);
    }

    pub fn record_failure(&mut self, filename: String) {
        self.files_failed += 1;
        self.current_file = Some(filename);
    }

    pub fn files_attempted(&self) -> usize {
        self.files_converted + self.files_failed
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for ConversionProgress {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FileConverter {
    buffer_size: usize,
}

impl FileConverter {
    pub fn new() -> Self {
        Self {
            buffer_size: 64 * 1024, // 64KB buffer
        }
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(4096); // Minimum 4KB buffer
        self
    }

    /// Copy `file` to `dest` behind a metadata header, returning the number of
    /// bytes written.
    ///
    /// The source is read fully before `dest` is created, so a source that
    /// cannot be read never leaves an output file behind.
    pub fn convert(&self, file: &SourceFile, dest: &Path) -> Result<u64> {
        let bytes = fs::read(&file.source_path).map_err(|source| Elixir2TxtError::SourceRead {
            path: file.source_path.clone(),
            source,
        })?;
        let content = normalize_newlines(&String::from_utf8_lossy(&bytes));

        let header = metadata_header(file, &Local::now());
        self.write_output(dest, &header, &content)
            .map_err(|source| Elixir2TxtError::OutputWrite {
                path: dest.to_path_buf(),
                source,
            })?;

        Ok((header.len() + content.len()) as u64)
    }

    fn write_output(&self, dest: &Path, header: &str, content: &str) -> std::io::Result<()> {
        let dest_file = fs::File::create(dest)?;
        let mut writer = BufWriter::with_capacity(self.buffer_size, dest_file);

        writer.write_all(header.as_bytes())?;
        writer.write_all(content.as_bytes())?;
        writer.flush()?;

        Ok(())
    }
}

impl Default for FileConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Text-mode reading: `\r\n` and lone `\r` both become `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// The block placed in front of every converted file, ending with the blank
/// line that separates it from the original content.
pub fn metadata_header(file: &SourceFile, converted_at: &DateTime<Local>) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);

    let mut header = String::new();
    header.push_str(&separator);
    header.push('\n');
    header.push_str("FILE METADATA\n");
    header.push_str(&separator);
    header.push('\n');
    header.push_str(&format!("Original filename: {}\n", file.filename));
    header.push_str(&format!(
        "Original path: {}\n",
        file.relative_path.display()
    ));
    header.push_str(&format!("Original extension: {}\n", file.extension));
    header.push_str(&format!(
        "Conversion date: {}\n",
        converted_at.format(HUMAN_TIMESTAMP_FORMAT)
    ));
    header.push_str(&separator);
    header.push_str("\n\n");
    header
}
