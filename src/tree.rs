//! Box-drawing tree diagram of a directory, honouring the ignore policy.
//!
//! The walk is a pure pre-order recursion: every call returns its own lines
//! and the caller concatenates, so the renderer holds no state and repeated
//! calls against an unchanged directory are byte-identical.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::filter::FilterPolicy;

const ELBOW: &str = "└──";
const TEE: &str = "├──";
const PIPE: &str = "│  ";
const BLANK: &str = "   ";

/// Renders the tree diagram for `root`. Lines are joined with a single
/// newline and there is no trailing newline.
///
/// The extension allowlist does not apply here: the diagram shows every
/// non-ignored entry, while language filtering restricts content collection
/// only.
pub fn render(root: &Path, policy: &FilterPolicy) -> String {
    debug!(root = %root.display(), "Rendering tree diagram");
    walk(root, true, "", policy).join("\n")
}

fn walk(path: &Path, is_last: bool, prefix: &str, policy: &FilterPolicy) -> Vec<String> {
    let name = display_name(path);
    let is_dir = is_traversable_dir(path);

    // An ignored node drops its entire subtree: no line, no recursion.
    if is_dir && policy.is_directory_ignored(&name) {
        return Vec::new();
    }
    if !is_dir && policy.is_file_ignored(&name) {
        return Vec::new();
    }

    let connector = if is_last { ELBOW } else { TEE };
    let mut lines = vec![format!("{prefix}{connector}{name}")];

    if is_dir {
        // Filter before recursing: is-last must be computed against the
        // surviving siblings, not the raw listing.
        let children: Vec<PathBuf> = list_children(path)
            .into_iter()
            .filter(|child| !is_ignored(child, policy))
            .collect();
        let child_prefix = format!("{prefix}{}", if is_last { BLANK } else { PIPE });
        let count = children.len();
        for (index, child) in children.iter().enumerate() {
            lines.extend(walk(child, index == count - 1, &child_prefix, policy));
        }
    }

    lines
}

fn is_ignored(path: &Path, policy: &FilterPolicy) -> bool {
    let name = display_name(path);
    if is_traversable_dir(path) {
        policy.is_directory_ignored(&name)
    } else {
        policy.is_file_ignored(&name)
    }
}

/// Children in the filesystem's natural enumeration order, never sorted.
/// An un-listable directory is non-fatal and yields no children.
fn list_children(path: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(path) {
        Ok(entries) => entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(error) => {
                    warn!(error = ?error, dir = %path.display(), "Skipping unreadable directory entry");
                    None
                }
            })
            .collect(),
        Err(error) => {
            warn!(error = ?error, dir = %path.display(), "Cannot list directory, rendering it empty");
            Vec::new()
        }
    }
}

/// Symlinks are never recursed into, which keeps the walk cycle-safe; a
/// symlinked directory renders as a leaf entry.
fn is_traversable_dir(path: &Path) -> bool {
    path.is_dir() && !path.is_symlink()
}

/// The path's final component, falling back to the current working
/// directory's base name for paths like `.` that have none.
pub(crate) fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => std::env::current_dir()
            .ok()
            .and_then(|cwd| cwd.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| path.display().to_string()),
    }
}
