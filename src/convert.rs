//! Coordinating module for the resolve-render-write pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::config::{ConvertConfig, Source};
use crate::document;
use crate::filter::FilterPolicy;
use crate::github::{DownloadError, Downloader};
use crate::languages;

/// Fatal conversion failures. All of these abort before any output file is
/// written; per-file and per-directory problems are recovered inside the
/// traversals instead.
#[derive(Debug)]
pub enum ConvertError {
    /// The supplied root path does not exist or is not a directory.
    MissingPath(PathBuf),
    /// A caller-supplied language name has no entry in the language table.
    UnsupportedLanguage(String),
    Download(DownloadError),
    Io(std::io::Error),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::MissingPath(path) => {
                write!(f, "source path {:?} does not exist", path)
            }
            ConvertError::UnsupportedLanguage(name) => {
                write!(f, "language {name:?} is not supported for conversion")
            }
            ConvertError::Download(e) => write!(f, "download failed: {e}"),
            ConvertError::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<std::io::Error> for ConvertError {
    fn from(e: std::io::Error) -> Self {
        ConvertError::Io(e)
    }
}

/// Summary of one completed conversion.
#[derive(Debug)]
pub struct ConvertReport {
    pub repo_name: String,
    pub output_path: PathBuf,
    pub files_included: usize,
}

/// Entrypoint: convert the configured source to a Markdown file.
///
/// Resolves the root directory (downloading it first for GitHub sources),
/// layers the language extension filter onto the ignore policy, renders the
/// document and writes `<destination>/<repo>.md`. Downloaded repositories
/// are deleted afterwards unless the config keeps them.
pub async fn convert<D: Downloader>(
    config: &ConvertConfig,
    downloader: &D,
) -> Result<ConvertReport, ConvertError> {
    config.trace_loaded();

    let (root, repo_name, language, downloaded) = match &config.source {
        Source::Local { path, language } => {
            let root = std::fs::canonicalize(path)
                .map_err(|_| ConvertError::MissingPath(path.clone()))?;
            if !root.is_dir() {
                return Err(ConvertError::MissingPath(path.clone()));
            }
            // A caller-supplied language must resolve; failing late would
            // leave a partially configured run.
            if let Some(name) = language {
                if languages::extensions_for(name).is_none() {
                    error!(language = %name, "Unsupported language filter");
                    return Err(ConvertError::UnsupportedLanguage(name.clone()));
                }
            }
            let name = crate::tree::display_name(&root);
            (root, name, language.clone(), false)
        }
        Source::Github {
            repo,
            branch,
            use_detected_language,
        } => {
            let downloaded = downloader
                .download(repo, branch.clone())
                .await
                .map_err(ConvertError::Download)?;
            let language = if *use_detected_language {
                downloaded.language
            } else {
                None
            };
            (downloaded.path, repo.clone(), language, true)
        }
    };

    let policy = apply_language_filter(config.policy.clone(), language.as_deref(), downloaded);

    info!(repo = %repo_name, root = %root.display(), "Starting conversion");
    let rendered = document::render(&root, &policy);
    let markdown = rendered.to_markdown();

    std::fs::create_dir_all(&config.destination)?;
    let output_path = config.destination.join(format!("{repo_name}.md"));
    std::fs::write(&output_path, &markdown)?;
    info!(
        output = %output_path.display(),
        files = rendered.records.len(),
        "Conversion complete"
    );

    if downloaded && !config.keep_download {
        info!(path = %root.display(), "Deleting downloaded repository after conversion");
        if let Err(e) = std::fs::remove_dir_all(&root) {
            warn!(error = ?e, path = %root.display(), "Failed to delete downloaded repository");
        }
    }

    Ok(ConvertReport {
        repo_name,
        output_path,
        files_included: rendered.records.len(),
    })
}

/// Layers the language's extensions onto the policy. A language detected by
/// GitHub (rather than supplied by the caller) that has no table entry
/// degrades to no filter with a warning, since the caller never chose it.
fn apply_language_filter(
    policy: FilterPolicy,
    language: Option<&str>,
    detected: bool,
) -> FilterPolicy {
    match language {
        Some(name) => match languages::extensions_for(name) {
            Some(extensions) => {
                info!(language = name, ?extensions, "Applying language filter to content");
                policy.with_extensions(extensions.iter().map(|e| e.to_string()))
            }
            None => {
                debug_assert!(detected, "caller-supplied languages are validated upfront");
                warn!(
                    language = name,
                    "Detected language has no extension table entry, content is unfiltered"
                );
                policy
            }
        },
        None => policy,
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use tempfile::tempdir;

    use crate::github::{DownloadedRepo, MockDownloader};

    use super::*;

    fn local_config(path: &Path, destination: &Path, language: Option<&str>) -> ConvertConfig {
        ConvertConfig {
            source: Source::Local {
                path: path.to_path_buf(),
                language: language.map(|s| s.to_string()),
            },
            destination: destination.to_path_buf(),
            policy: FilterPolicy::default(),
            keep_download: false,
        }
    }

    #[tokio::test]
    async fn local_conversion_writes_markdown_named_after_repo() {
        let tmp = tempdir().unwrap();
        let repo = tmp.path().join("myproject");
        create_dir_all(&repo).unwrap();
        write(repo.join("main.py"), "print('hi')\n").unwrap();

        let out = tempdir().unwrap();
        let config = local_config(&repo, out.path(), None);
        let report = convert(&config, &MockDownloader::new()).await.unwrap();

        assert_eq!(report.repo_name, "myproject");
        assert_eq!(report.files_included, 1);
        let markdown = std::fs::read_to_string(&report.output_path).unwrap();
        assert!(report.output_path.ends_with("myproject.md"));
        assert!(markdown.starts_with("## Contents:"));
        assert!(markdown.contains("###### myproject/main.py"));
    }

    #[tokio::test]
    async fn missing_local_path_is_fatal_and_writes_nothing() {
        let out = tempdir().unwrap();
        let config = local_config(Path::new("/does/not/exist"), out.path(), None);
        let err = convert(&config, &MockDownloader::new()).await.unwrap_err();
        assert!(matches!(err, ConvertError::MissingPath(_)));
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn unsupported_language_is_fatal_and_writes_nothing() {
        let tmp = tempdir().unwrap();
        let repo = tmp.path().join("proj");
        create_dir_all(&repo).unwrap();
        write(repo.join("a.cob"), "x").unwrap();

        let out = tempdir().unwrap();
        let config = local_config(&repo, out.path(), Some("cobol"));
        let err = convert(&config, &MockDownloader::new()).await.unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedLanguage(_)));
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn github_conversion_uses_downloader_and_detected_language() {
        let tmp = tempdir().unwrap();
        let clone = tmp.path().join("cloned");
        create_dir_all(&clone).unwrap();
        write(clone.join("main.py"), "py").unwrap();
        write(clone.join("main.js"), "js").unwrap();

        let mut downloader = MockDownloader::new();
        let clone_for_mock = clone.clone();
        downloader
            .expect_download()
            .withf(|repo, branch| repo == "demo" && branch.as_deref() == Some("dev"))
            .times(1)
            .returning(move |_, _| {
                Ok(DownloadedRepo {
                    path: clone_for_mock.clone(),
                    language: Some("Python".to_string()),
                })
            });

        let out = tempdir().unwrap();
        let config = ConvertConfig {
            source: Source::Github {
                repo: "demo".to_string(),
                branch: Some("dev".to_string()),
                use_detected_language: true,
            },
            destination: out.path().to_path_buf(),
            policy: FilterPolicy::default(),
            keep_download: true,
        };

        let report = convert(&config, &downloader).await.unwrap();
        assert_eq!(report.repo_name, "demo");
        assert_eq!(report.files_included, 1);
        let markdown = std::fs::read_to_string(&report.output_path).unwrap();
        // Language filter applies to content sections only; the tree still
        // shows both files.
        assert!(markdown.contains("###### cloned/main.py"));
        assert!(!markdown.contains("###### cloned/main.js"));
        assert!(markdown.contains("main.js"));
    }

    #[tokio::test]
    async fn downloaded_repo_is_deleted_unless_kept() {
        let tmp = tempdir().unwrap();
        let clone = tmp.path().join("cloned");
        create_dir_all(&clone).unwrap();
        write(clone.join("main.py"), "py").unwrap();

        let mut downloader = MockDownloader::new();
        let clone_for_mock = clone.clone();
        downloader.expect_download().returning(move |_, _| {
            Ok(DownloadedRepo {
                path: clone_for_mock.clone(),
                language: None,
            })
        });

        let out = tempdir().unwrap();
        let config = ConvertConfig {
            source: Source::Github {
                repo: "demo".to_string(),
                branch: None,
                use_detected_language: false,
            },
            destination: out.path().to_path_buf(),
            policy: FilterPolicy::default(),
            keep_download: false,
        };

        convert(&config, &downloader).await.unwrap();
        assert!(!clone.exists());
        assert!(out.path().join("demo.md").exists());
    }
}
