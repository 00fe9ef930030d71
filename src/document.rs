//! Assembles the tree diagram and the collected file records into the
//! final Markdown document.

use std::path::Path;

use tracing::info;

use crate::collect::{self, FileRecord};
use crate::filter::FilterPolicy;
use crate::tree;

/// Fixed layout: a `## Contents:` header with the tree diagram in a fenced
/// block, then one `######` section per file with its trimmed content
/// fenced. Sections are separated by one blank line and the document ends
/// with exactly one trailing newline.
pub fn assemble(tree_diagram: &str, records: &[FileRecord]) -> String {
    let mut document = format!("## Contents:\n\n```\n{tree_diagram}\n```\n\n");
    for record in records {
        document.push_str(&format!(
            "###### {}\n\n```\n{}\n```\n\n",
            record.relative_path,
            record.content.trim()
        ));
    }
    let mut trimmed = document.trim_end().to_string();
    trimmed.push('\n');
    trimmed
}

/// The assembled result of one conversion: built once, written once, never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub tree_diagram: String,
    pub records: Vec<FileRecord>,
}

impl RenderedDocument {
    pub fn to_markdown(&self) -> String {
        assemble(&self.tree_diagram, &self.records)
    }
}

/// Runs the tree renderer and the content collector over `root` with the
/// same policy. The two traversals are independent; each re-derives the
/// filtered file set. File paths are relative to the root's parent, so
/// they start with the repository name.
///
/// Infallible by design: fatal validation (missing root, unknown language)
/// happens upstream in the orchestrator; listing and decoding failures are
/// recovered locally by the traversals.
pub fn render(root: &Path, policy: &FilterPolicy) -> RenderedDocument {
    info!(root = %root.display(), "Generating tree diagram and collecting contents");
    let tree_diagram = tree::render(root, policy);
    let base = root.parent().unwrap_or(root);
    let records = collect::collect(root, base, policy);
    info!(files = records.len(), "Document rendered");
    RenderedDocument {
        tree_diagram,
        records,
    }
}

/// Sole core entry point: renders and assembles in one call.
pub fn render_document(root: &Path, policy: &FilterPolicy) -> String {
    render(root, policy).to_markdown()
}
