//! Walks the repository a second time, independently of the tree renderer,
//! and gathers the contents of every included file.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::filter::FilterPolicy;
use crate::tree::display_name;

/// Placeholder recorded when a file's bytes are not valid UTF-8. The file
/// still occupies one well-formed section in the final document.
pub const DECODE_PLACEHOLDER: &str = "No unicode data available";

/// One included file: its path relative to the caller-supplied base, with
/// `/` separators, and its normalized content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub relative_path: String,
    pub content: String,
}

/// Collects records for every non-ignored, extension-allowed file under
/// `root`, in a stable pre-order walk: each directory's files first, in the
/// listing's natural order, then its subdirectories depth-first.
///
/// Directory pruning happens at every level, starting with `root` itself,
/// so an ignored directory anywhere in the ancestry chain excludes its
/// whole subtree. A root named like an ignored directory yields no
/// records, which keeps the collector in agreement with the tree renderer
/// (it drops such a root entirely).
pub fn collect(root: &Path, base: &Path, policy: &FilterPolicy) -> Vec<FileRecord> {
    debug!(root = %root.display(), base = %base.display(), "Collecting file contents");
    if policy.is_directory_ignored(&display_name(root)) {
        debug!(root = %root.display(), "Root directory name is ignored, collecting nothing");
        return Vec::new();
    }
    let mut records = Vec::new();
    visit_dir(root, base, policy, &mut records);
    records
}

fn visit_dir(dir: &Path, base: &Path, policy: &FilterPolicy, records: &mut Vec<FileRecord>) {
    let entries: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(error) => {
                    warn!(error = ?error, dir = %dir.display(), "Skipping unreadable directory entry");
                    None
                }
            })
            .collect(),
        Err(error) => {
            warn!(error = ?error, dir = %dir.display(), "Cannot list directory, treating it as empty");
            return;
        }
    };

    // Files first, preserving enumeration order, then subdirectories.
    for path in entries.iter().filter(|p| !p.is_dir()) {
        let name = display_name(path);
        if policy.is_file_ignored(&name) {
            debug!(file = %path.display(), "Ignoring file");
            continue;
        }
        if !policy.is_extension_allowed(&name) {
            continue;
        }
        if let Some(content) = read_content(path) {
            records.push(FileRecord {
                relative_path: relative_display(path, base),
                content,
            });
        }
    }

    for path in entries.iter().filter(|p| p.is_dir() && !p.is_symlink()) {
        let name = display_name(path);
        if policy.is_directory_ignored(&name) {
            debug!(dir = %path.display(), "Ignoring directory");
            continue;
        }
        visit_dir(path, base, policy, records);
    }
}

/// Reads a file fully and normalizes it: line terminators are stripped from
/// each line and the lines rejoined with `\n`, collapsing `\r\n`. Bytes
/// that are not valid UTF-8 yield the placeholder instead of an error; an
/// I/O failure skips the file with a warning.
fn read_content(path: &Path) -> Option<String> {
    debug!(file = %path.display(), "Reading file");
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(error = ?error, file = %path.display(), "Cannot read file, skipping");
            return None;
        }
    };
    match String::from_utf8(bytes) {
        Ok(text) => Some(text.lines().collect::<Vec<_>>().join("\n")),
        Err(error) => {
            warn!(error = %error, file = %path.display(), "File is not valid UTF-8, recording placeholder");
            Some(DECODE_PLACEHOLDER.to_string())
        }
    }
}

fn relative_display(path: &Path, base: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
