//! Loads an optional YAML filters file into a `FilterPolicy`.
//!
//! The policy is data: callers can replace the default ignore sets and fix
//! an extension allowlist without touching code.
//!
//! ```yaml
//! ignore:
//!   directories: [".git", "target"]
//!   files: ["README.md"]
//! extensions: [".rs"]
//! ```
//!
//! Omitted sections keep the built-in defaults.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

use crate::filter::{FilterPolicy, DEFAULT_IGNORED_DIRECTORIES, DEFAULT_IGNORED_FILES};

#[derive(Deserialize, Default)]
struct FiltersFile {
    #[serde(default)]
    ignore: IgnoreSection,
    #[serde(default)]
    extensions: Vec<String>,
}

#[derive(Deserialize, Default)]
struct IgnoreSection {
    #[serde(default)]
    directories: Option<Vec<String>>,
    #[serde(default)]
    files: Option<Vec<String>>,
}

/// Reads and parses a filters file, producing the policy it describes.
pub fn load_filters<P: AsRef<Path>>(path: P) -> Result<FilterPolicy> {
    let path_ref = path.as_ref();
    info!(filters_path = ?path_ref, "Loading filters file");

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, filters_path = ?path_ref, "Failed to read filters file");
            return Err(anyhow::anyhow!(
                "Failed to read filters file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let parsed: FiltersFile = match serde_yaml::from_str(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!(error = ?e, filters_path = ?path_ref, "Failed to parse filters YAML");
            return Err(anyhow::anyhow!("Failed to parse filters YAML: {e}"));
        }
    };

    let directories = parsed
        .ignore
        .directories
        .unwrap_or_else(|| DEFAULT_IGNORED_DIRECTORIES.iter().map(|s| s.to_string()).collect());
    let files = parsed
        .ignore
        .files
        .unwrap_or_else(|| DEFAULT_IGNORED_FILES.iter().map(|s| s.to_string()).collect());

    info!(
        directories = directories.len(),
        files = files.len(),
        extensions = parsed.extensions.len(),
        "Filters loaded"
    );

    let mut policy = FilterPolicy::new(directories, files);
    if !parsed.extensions.is_empty() {
        policy = policy.with_extensions(parsed.extensions);
    }
    Ok(policy)
}
