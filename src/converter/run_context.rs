use chrono::{DateTime, Local};
use std::path::{Component, Path, PathBuf};

/// Timestamp layout used in the log header and the per-file metadata.
pub const HUMAN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Immutable facts about one conversion run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub started_at: DateTime<Local>,
}

impl RunContext {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        source_dir: P,
        output_dir: Q,
        started_at: DateTime<Local>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            started_at,
        }
    }

    pub fn absolute_source_dir(&self) -> PathBuf {
        absolute_path(&self.source_dir)
    }

    pub fn absolute_output_dir(&self) -> PathBuf {
        absolute_path(&self.output_dir)
    }

    pub fn started_at_display(&self) -> String {
        self.started_at.format(HUMAN_TIMESTAMP_FORMAT).to_string()
    }
}

/// Absolute, lexically normalized form of `path`. Symlinks are not resolved
/// and the path does not need to exist.
pub fn absolute_path(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("/"))
            .join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_absolute_path_normalizes_dots() {
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(absolute_path(Path::new(".")), cwd);
        assert_eq!(absolute_path(Path::new("./out/../out2")), cwd.join("out2"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_path_keeps_absolute_input() {
        assert_eq!(
            absolute_path(Path::new("/tmp/./a/../b")),
            PathBuf::from("/tmp/b")
        );
    }

    #[test]
    fn test_started_at_display() {
        let started_at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let context = RunContext::new(".", "out", started_at);

        assert_eq!(context.started_at_display(), "2024-03-09 14:05:07.000000");
        assert!(context.absolute_output_dir().ends_with("out"));
    }
}
