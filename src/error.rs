use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Elixir2TxtError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write conversion log {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },
}

impl Elixir2TxtError {
    /// Fatal errors abort the run; everything else is recorded per file.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Elixir2TxtError::SourceRead { .. } | Elixir2TxtError::OutputWrite { .. }
        )
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Elixir2TxtError {
    fn user_message(&self) -> String {
        match self {
            Elixir2TxtError::OutputDirectory { path, source } => {
                format!("Could not create output directory {}: {}", path.display(), source)
            }
            Elixir2TxtError::LogFile { path, source } => {
                format!("Could not write conversion log {}: {}", path.display(), source)
            }
            Elixir2TxtError::SourceRead { path, source } => {
                format!("Could not read {}: {}", path.display(), source)
            }
            Elixir2TxtError::OutputWrite { path, source } => {
                format!("Could not write {}: {}", path.display(), source)
            }
            Elixir2TxtError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            Elixir2TxtError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Elixir2TxtError::OutputDirectory { .. } => Some(
                "Check that the parent directory exists and is writable, or choose another location with --output.".to_string()
            ),
            Elixir2TxtError::LogFile { .. } => Some(
                "Ensure the output directory is writable and the disk is not full.".to_string()
            ),
            Elixir2TxtError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            Elixir2TxtError::InvalidPath { .. } => Some(
                "Pass an existing, readable directory as the source.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for Elixir2TxtError {
    fn from(error: toml::de::Error) -> Self {
        Elixir2TxtError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Elixir2TxtError>;
