//! Ignore policy and extension allowlist shared by both traversals.
//!
//! The policy is data, not logic: the default sets below can be replaced
//! wholesale by a filters file (see `load_config`). Matching is exact-name
//! equality, never substring containment, so a directory named
//! `tests-helper` survives an ignore entry `tests`.

use std::collections::HashSet;
use std::path::Path;

/// Directory names excluded from both the tree diagram and content
/// collection. Compared case-insensitively against the entry name.
pub const DEFAULT_IGNORED_DIRECTORIES: &[&str] = &[
    "__pycache__",
    ".git",
    ".idea",
    "venv",
    ".github",
    "node_modules",
    ".ds_store",
    ".vscode",
    ".pytest_cache",
    "build",
    "dist",
    "docs",
    "tests",
    "gradle",
];

/// File names excluded from both views: manifests, locks, licenses,
/// readmes and CI configuration.
pub const DEFAULT_IGNORED_FILES: &[&str] = &[
    ".gitignore",
    "readme.md",
    "license",
    "requirements.txt",
    "setup.py",
    "pyproject.toml",
    "pipfile",
    "pipfile.lock",
    "package.json",
    "yarn.lock",
    ".dockerignore",
    ".pre-commit-config.yaml",
    "makefile",
    "settings.gradle",
    "build.gradle",
    "pom.xml",
    "build.sbt",
    "cargo.toml",
    "cargo.lock",
    "gradlew",
    "gradlew.bat",
    ".gitattributes",
    "changelog.md",
    ".java-version",
    "openapi.yml",
    "openapi.yaml",
    "openapi.json",
    "swagger.yml",
    "swagger.yaml",
    "swagger.json",
];

/// Immutable inclusion policy answering yes/no queries for directory names,
/// file names and file extensions.
///
/// Ignore sets are stored lowercase; extensions keep their case and carry a
/// leading dot (`.py`). An empty extension set means no restriction.
#[derive(Debug, Clone)]
pub struct FilterPolicy {
    ignored_directories: HashSet<String>,
    ignored_files: HashSet<String>,
    allowed_extensions: HashSet<String>,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_IGNORED_DIRECTORIES.iter().map(|s| s.to_string()),
            DEFAULT_IGNORED_FILES.iter().map(|s| s.to_string()),
        )
    }
}

impl FilterPolicy {
    pub fn new<D, F>(ignored_directories: D, ignored_files: F) -> Self
    where
        D: IntoIterator<Item = String>,
        F: IntoIterator<Item = String>,
    {
        Self {
            ignored_directories: ignored_directories
                .into_iter()
                .map(|n| n.to_lowercase())
                .collect(),
            ignored_files: ignored_files.into_iter().map(|n| n.to_lowercase()).collect(),
            allowed_extensions: HashSet::new(),
        }
    }

    /// Returns the same ignore sets with an extension allowlist layered on.
    /// Entries without a leading dot get one.
    pub fn with_extensions<E>(mut self, extensions: E) -> Self
    where
        E: IntoIterator<Item = String>,
    {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|e| {
                if e.starts_with('.') {
                    e
                } else {
                    format!(".{e}")
                }
            })
            .collect();
        self
    }

    /// True iff the lowercased name equals an ignored-directory entry.
    pub fn is_directory_ignored(&self, name: &str) -> bool {
        self.ignored_directories.contains(&name.to_lowercase())
    }

    /// True iff the lowercased name equals an ignored-file entry.
    pub fn is_file_ignored(&self, name: &str) -> bool {
        self.ignored_files.contains(&name.to_lowercase())
    }

    /// True when no allowlist is set, or when the file's suffix is a member.
    /// The suffix comparison is case-sensitive, as produced by path
    /// splitting; a file without an extension fails a non-empty allowlist.
    pub fn is_extension_allowed(&self, name: &str) -> bool {
        if self.allowed_extensions.is_empty() {
            return true;
        }
        match Path::new(name).extension() {
            Some(ext) => self
                .allowed_extensions
                .contains(&format!(".{}", ext.to_string_lossy())),
            None => false,
        }
    }

    pub fn has_extension_filter(&self) -> bool {
        !self.allowed_extensions.is_empty()
    }
}
