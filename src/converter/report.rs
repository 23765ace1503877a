use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub source_directory: PathBuf,
    pub output_directory: PathBuf,
    pub log_path: PathBuf,
    pub started_at: DateTime<Local>,
    pub duration: Duration,
    pub converted: Vec<ConvertedFile>,
    pub failed: Vec<FailedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedFile {
    pub source_path: PathBuf,
    pub output_name: String,
    pub bytes_written: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedFile {
    pub source_path: PathBuf,
    pub message: String,
}

/// What a real run would do with one file, without touching the disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedConversion {
    pub source_path: PathBuf,
    pub output_name: String,
}

impl ConversionReport {
    pub fn files_attempted(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    pub fn total_bytes_written(&self) -> u64 {
        self.converted.iter().map(|f| f.bytes_written).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn output_name_for(&self, source_path: &std::path::Path) -> Option<&str> {
        self.converted
            .iter()
            .find(|f| f.source_path == source_path)
            .map(|f| f.output_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn sample_report() -> ConversionReport {
        ConversionReport {
            source_directory: PathBuf::from("."),
            output_directory: PathBuf::from("elixir_txt_20240101_000000"),
            log_path: PathBuf::from("elixir_txt_20240101_000000/_conversion_log.txt"),
            started_at: Local::now(),
            duration: Duration::from_millis(12),
            converted: vec![
                ConvertedFile {
                    source_path: PathBuf::from("./lib/foo.ex"),
                    output_name: "foo.ex.txt".to_string(),
                    bytes_written: 120,
                },
                ConvertedFile {
                    source_path: PathBuf::from("./mix.exs"),
                    output_name: "mix.exs.txt".to_string(),
                    bytes_written: 80,
                },
            ],
            failed: vec![FailedFile {
                source_path: PathBuf::from("./lib/locked.ex"),
                message: "Permission denied (os error 13)".to_string(),
            }],
        }
    }

    #[test]
    fn test_report_totals() {
        let report = sample_report();

        assert_eq!(report.files_attempted(), 3);
        assert_eq!(report.total_bytes_written(), 200);
        assert!(report.has_failures());
        assert_eq!(report.output_name_for(Path::new("./mix.exs")), Some("mix.exs.txt"));
        assert_eq!(report.output_name_for(Path::new("./lib/locked.ex")), None);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let json = serde_json::to_value(sample_report()).unwrap();

        assert_eq!(json["converted"][0]["output_name"], "foo.ex.txt");
        assert_eq!(json["failed"][0]["source_path"], "./lib/locked.ex");
        assert!(json["started_at"].is_string());
    }
}
