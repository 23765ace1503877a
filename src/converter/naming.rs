use crate::config::LOG_FILE_NAME;
use crate::scanner::SourceFile;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

const OUTPUT_SUFFIX: &str = ".txt";
const PATH_HASH_LEN: usize = 8;

/// Map every character outside alphanumerics, `-` and `_` to `_`.
pub fn safe_base_name(base_name: &str) -> String {
    base_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Safe name of a source file: sanitized base name plus the original extension.
pub fn safe_name(file: &SourceFile) -> String {
    format!("{}{}", safe_base_name(&file.base_name), file.extension)
}

/// First eight hex digits of SHA-256 over the path string. Depends only on the
/// path, never on file contents.
pub fn path_hash(path: &Path) -> String {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    let hex = format!("{:x}", digest);
    hex[..PATH_HASH_LEN].to_string()
}

/// The seen-names set of a single run.
#[derive(Debug)]
pub struct OutputNamer {
    seen: HashSet<String>,
}

impl OutputNamer {
    pub fn new() -> Self {
        let mut seen = HashSet::new();
        seen.insert(LOG_FILE_NAME.to_string());
        Self { seen }
    }

    /// Assign the output filename for `file` and record it as taken.
    ///
    /// The plain `<safe name>.txt` is used when free. Otherwise the path hash
    /// is appended, and in the unlikely event that is taken too, a counter.
    pub fn assign(&mut self, file: &SourceFile) -> String {
        let safe = safe_name(file);
        let candidate = format!("{}{}", safe, OUTPUT_SUFFIX);

        let assigned = if self.seen.contains(&candidate) {
            let hashed = format!("{}_{}", safe, path_hash(&file.source_path));
            let mut name = format!("{}{}", hashed, OUTPUT_SUFFIX);
            let mut counter = 2;
            while self.seen.contains(&name) {
                name = format!("{}_{}{}", hashed, counter, OUTPUT_SUFFIX);
                counter += 1;
            }
            name
        } else {
            candidate
        };

        self.seen.insert(assigned.clone());
        assigned
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Number of names handed out, not counting the reserved log name.
    pub fn assigned_count(&self) -> usize {
        self.seen.len() - 1
    }
}

impl Default for OutputNamer {
    fn default() -> Self {
        Self::new()
    }
}
