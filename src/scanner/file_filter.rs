use crate::config::{SourceConfig, SKIPPED_DIR_NAME};
use std::path::Path;

pub struct FileFilter {
    extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
        }
    }

    /// Exact, case-sensitive suffix match on the file name, dot included.
    pub fn is_source_file(&self, path: &Path) -> bool {
        match path.file_name() {
            Some(name) => {
                let name = name.to_string_lossy();
                self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
            }
            None => false,
        }
    }

    /// Name-based pruning: a directory called `deps` is skipped wherever it
    /// appears in the tree.
    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        path.file_name()
            .map_or(true, |name| name != SKIPPED_DIR_NAME)
    }

    pub fn get_extensions(&self) -> &Vec<String> {
        &self.extensions
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(&SourceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_detection() {
        let filter = FileFilter::default();

        assert!(filter.is_source_file(Path::new("lib/foo.ex")));
        assert!(filter.is_source_file(Path::new("test/foo_test.exs")));
        assert!(filter.is_source_file(Path::new("mix.exs")));
        assert!(filter.is_source_file(Path::new("weird name!@#.exs")));

        assert!(!filter.is_source_file(Path::new("README.md")));
        assert!(!filter.is_source_file(Path::new("foo.eex")));
        assert!(!filter.is_source_file(Path::new("foo.heex")));
        assert!(!filter.is_source_file(Path::new("foo.ex.bak")));
        assert!(!filter.is_source_file(Path::new("foo.exs~")));
    }

    #[test]
    fn test_suffix_match_is_case_sensitive() {
        let filter = FileFilter::default();

        assert!(!filter.is_source_file(Path::new("Foo.EX")));
        assert!(!filter.is_source_file(Path::new("foo.Exs")));
    }

    #[test]
    fn test_deps_pruned_at_any_depth() {
        let filter = FileFilter::default();

        assert!(!filter.should_traverse_directory(Path::new("deps")));
        assert!(!filter.should_traverse_directory(Path::new("apps/web/deps")));
        assert!(!filter.should_traverse_directory(Path::new("./a/b/c/deps")));

        assert!(filter.should_traverse_directory(Path::new("lib")));
        assert!(filter.should_traverse_directory(Path::new("Deps")));
        assert!(filter.should_traverse_directory(Path::new("deps_old")));
        assert!(filter.should_traverse_directory(Path::new("deps/lib")));
        assert!(filter.should_traverse_directory(Path::new("_build")));
    }

    #[test]
    fn test_custom_extensions() {
        let config = SourceConfig {
            extensions: vec![".exs".to_string()],
            ..SourceConfig::default()
        };
        let filter = FileFilter::new(&config);

        assert!(filter.is_source_file(Path::new("mix.exs")));
        assert!(!filter.is_source_file(Path::new("lib/foo.ex")));
        assert_eq!(filter.get_extensions(), &vec![".exs".to_string()]);
    }
}
