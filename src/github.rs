//! Download collaborator: materializes a GitHub repository on the local
//! filesystem and reports its primary language.
//!
//! The core traversals never touch the network; everything here feeds them
//! a plain directory path. The API request retries a bounded number of
//! times and surfaces a single fatal error once exhausted.

use std::path::PathBuf;
use std::process::Command;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::config::GithubEnv;

pub type DownloadError = Box<dyn std::error::Error + Send + Sync>;

/// A repository materialized on disk, plus the language GitHub reports for
/// it (used for the optional content filter).
#[derive(Debug, Clone)]
pub struct DownloadedRepo {
    pub path: PathBuf,
    pub language: Option<String>,
}

/// Trait seam between the orchestrator and the network. Implemented by the
/// real client below and by generated mocks in tests.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Fetches `repo` at `branch` (default branch when unset) into the
    /// destination directory, returning the local path and the detected
    /// language.
    async fn download(
        &self,
        repo: &str,
        branch: Option<String>,
    ) -> Result<DownloadedRepo, DownloadError>;
}

const MAX_ATTEMPTS: usize = 5;

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
    language: Option<String>,
}

pub struct GithubClient {
    http: reqwest::Client,
    env: GithubEnv,
    dest_dir: PathBuf,
}

impl GithubClient {
    pub fn new(env: GithubEnv, dest_dir: PathBuf) -> Self {
        Self {
            http: reqwest::Client::new(),
            env,
            dest_dir,
        }
    }

    fn owner(&self) -> Result<&str, DownloadError> {
        self.env
            .owner
            .as_deref()
            .ok_or_else(|| "repository owner is not configured (set GIT_OWNER)".into())
    }

    /// Default branch and primary language, with a bounded retry loop
    /// around the API request.
    async fn repo_info(&self, repo: &str) -> Result<RepoInfo, DownloadError> {
        let owner = self.owner()?;
        let url = format!(
            "{}/repos/{}/{}",
            self.env.api_url.trim_end_matches('/'),
            owner,
            repo
        );
        info!(url = %url, "Fetching repository metadata");

        let mut last_error = String::new();
        for attempt in 1..=MAX_ATTEMPTS {
            debug!(attempt, url = %url, "Requesting repository metadata");
            let mut request = self
                .http
                .get(&url)
                .header("Accept", "application/vnd.github+json");
            if let Some(token) = &self.env.token {
                request = request.bearer_auth(token);
            }
            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    return Ok(response.json::<RepoInfo>().await?);
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    last_error = format!("GitHub API returned {status}: {body}");
                    warn!(attempt, status = %status, "Metadata request failed, retrying");
                }
                Err(e) => {
                    last_error = e.to_string();
                    warn!(attempt, error = %e, "Metadata request failed, retrying");
                }
            }
        }
        error!(url = %url, error = %last_error, "Metadata request failed after all attempts");
        Err(format!("request failed after {MAX_ATTEMPTS} attempts on {url}: {last_error}").into())
    }

    fn clone_repo(&self, repo: &str, reference: &str) -> Result<PathBuf, DownloadError> {
        let owner = self.owner()?;
        let clone_url = format!("https://github.com/{owner}/{repo}.git");
        let target = self.dest_dir.join(repo);

        // Stale copies from an earlier run would make the clone fail.
        if target.exists() {
            warn!(path = %target.display(), "Removing existing repository copy before cloning");
            std::fs::remove_dir_all(&target)?;
        }
        std::fs::create_dir_all(&self.dest_dir)?;

        info!(repo, reference, path = %target.display(), "Cloning repository");
        run_git(Command::new("git").arg("clone").arg(&clone_url).arg(&target))?;
        run_git(
            Command::new("git")
                .arg("-C")
                .arg(&target)
                .arg("checkout")
                .arg(reference),
        )?;
        Ok(target)
    }
}

fn run_git(command: &mut Command) -> Result<(), DownloadError> {
    match command.status() {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => {
            error!(?command, %status, "git exited with non-zero code");
            Err(format!("git exited with {status}").into())
        }
        Err(e) => {
            error!(?command, error = ?e, "Failed to launch git process");
            Err(Box::new(e))
        }
    }
}

#[async_trait]
impl Downloader for GithubClient {
    async fn download(
        &self,
        repo: &str,
        branch: Option<String>,
    ) -> Result<DownloadedRepo, DownloadError> {
        let info = self.repo_info(repo).await?;
        let reference = branch.as_deref().unwrap_or(&info.default_branch);
        let path = self.clone_repo(repo, reference)?;
        info!(
            repo,
            reference,
            language = info.language.as_deref().unwrap_or("<unknown>"),
            path = %path.display(),
            "Repository downloaded"
        );
        Ok(DownloadedRepo {
            path,
            language: info.language,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_info_deserializes_api_payload() {
        let info: RepoInfo = serde_json::from_str(
            r#"{"default_branch": "main", "language": "Python", "name": "repo2md"}"#,
        )
        .unwrap();
        assert_eq!(info.default_branch, "main");
        assert_eq!(info.language.as_deref(), Some("Python"));
    }

    #[test]
    fn repo_info_tolerates_missing_language() {
        let info: RepoInfo =
            serde_json::from_str(r#"{"default_branch": "master", "language": null}"#).unwrap();
        assert_eq!(info.language, None);
    }
}
