use crate::error::{Elixir2TxtError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-run log written inside the output directory.
pub const LOG_FILE_NAME: &str = "_conversion_log.txt";

/// Directories with this exact name are never descended into.
pub const SKIPPED_DIR_NAME: &str = "deps";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub directory: PathBuf,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub base_directory: PathBuf,
    pub directory_prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            extensions: vec![".ex".to_string(), ".exs".to_string()],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from("."),
            directory_prefix: "elixir_txt_".to_string(),
            directory: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Elixir2TxtError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| Elixir2TxtError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| Elixir2TxtError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["elixir2txt.toml", ".elixir2txt.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref source_dir) = cli_args.source_dir {
            self.source.directory = source_dir.clone();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = Some(output_dir.clone());
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| Elixir2TxtError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| Elixir2TxtError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.extensions.is_empty() {
            return Err(Elixir2TxtError::Config {
                message: "At least one file extension must be specified".to_string(),
            });
        }

        if let Some(bad) = self
            .source
            .extensions
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2)
        {
            return Err(Elixir2TxtError::Config {
                message: format!("Extension must start with a dot: {:?}", bad),
            });
        }

        if self.output.directory.is_none() && self.output.directory_prefix.is_empty() {
            return Err(Elixir2TxtError::Config {
                message: "Output directory prefix cannot be empty".to_string(),
            });
        }

        let source = &self.source.directory;
        if !source.exists() {
            return Err(Elixir2TxtError::InvalidPath {
                path: format!("{} does not exist", source.display()),
            });
        }

        if !source.is_dir() {
            return Err(Elixir2TxtError::InvalidPath {
                path: format!("{} is not a directory", source.display()),
            });
        }

        Ok(())
    }

    /// Output directory for a run started at `timestamp`: the explicit
    /// override if one was given, otherwise `<base>/<prefix><YYYYMMDD_HHMMSS>`.
    pub fn output_directory_for<Tz>(&self, timestamp: &chrono::DateTime<Tz>) -> PathBuf
    where
        Tz: chrono::TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        match self.output.directory {
            Some(ref dir) => dir.clone(),
            None => {
                let name = format!(
                    "{}{}",
                    self.output.directory_prefix,
                    timestamp.format("%Y%m%d_%H%M%S")
                );
                if self.output.base_directory == Path::new(".") {
                    PathBuf::from(name)
                } else {
                    self.output.base_directory.join(name)
                }
            }
        }
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_dir(mut self, source_dir: Option<PathBuf>) -> Self {
        self.source_dir = source_dir;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }
}
