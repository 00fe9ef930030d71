// repo2md/src/config.rs

use std::path::PathBuf;

use tracing::{debug, info};

use crate::filter::FilterPolicy;

/// Top-level conversion configuration assembled by the CLI layer.
#[derive(Debug)]
pub struct ConvertConfig {
    pub source: Source,
    pub destination: PathBuf,
    pub policy: FilterPolicy,
    /// Keep a downloaded repository on disk after conversion.
    pub keep_download: bool,
}

impl ConvertConfig {
    pub fn trace_loaded(&self) {
        info!(
            destination = %self.destination.display(),
            keep_download = self.keep_download,
            "Loaded ConvertConfig"
        );
        debug!(?self, "ConvertConfig loaded (full debug)");
        self.source.trace_loaded();
    }
}

#[derive(Debug)]
pub enum Source {
    Github {
        repo: String,
        /// Branch, tag or commit; the repository's default branch when unset.
        branch: Option<String>,
        /// Filter content by the language GitHub reports for the repo.
        use_detected_language: bool,
    },
    Local {
        path: PathBuf,
        language: Option<String>,
    },
}

impl Source {
    pub fn trace_loaded(&self) {
        match self {
            Source::Github {
                repo,
                branch,
                use_detected_language,
            } => {
                info!(
                    repo = %repo,
                    branch = branch.as_deref().unwrap_or("<default>"),
                    use_detected_language,
                    "Loaded GitHub source"
                );
            }
            Source::Local { path, language } => {
                info!(
                    path = %path.display(),
                    language = language.as_deref().unwrap_or("<none>"),
                    "Loaded local source"
                );
            }
        }
    }
}

/// GitHub API access settings resolved from the environment. A `.env` file
/// is honoured when present (loaded at process start).
#[derive(Debug, Clone)]
pub struct GithubEnv {
    pub api_url: String,
    pub owner: Option<String>,
    pub token: Option<String>,
}

impl GithubEnv {
    pub fn from_env() -> Self {
        let env = Self {
            api_url: get_env(&["GIT_API_URL", "GITHUB_API_URL"])
                .unwrap_or_else(|| "https://api.github.com".to_string()),
            owner: get_env(&["OWNER", "GIT_OWNER", "GITHUB_OWNER"]),
            token: get_env(&["GIT_TOKEN", "GITHUB_TOKEN"]),
        };
        debug!(
            api_url = %env.api_url,
            owner = env.owner.as_deref().unwrap_or("<unset>"),
            token_set = env.token.is_some(),
            "Resolved GitHub environment"
        );
        env
    }
}

/// First match wins; each key is tried lowercase then uppercase.
fn get_env(keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Ok(value) = std::env::var(key.to_lowercase()) {
            if !value.is_empty() {
                return Some(value);
            }
        }
        if let Ok(value) = std::env::var(key.to_uppercase()) {
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn github_env_defaults_api_url_when_unset() {
        std::env::remove_var("GIT_API_URL");
        std::env::remove_var("GITHUB_API_URL");
        std::env::remove_var("git_api_url");
        std::env::remove_var("github_api_url");
        let env = GithubEnv::from_env();
        assert_eq!(env.api_url, "https://api.github.com");
    }

    #[test]
    #[serial]
    fn github_env_prefers_first_matching_key() {
        std::env::set_var("OWNER", "first-owner");
        std::env::set_var("GIT_OWNER", "second-owner");
        let env = GithubEnv::from_env();
        assert_eq!(env.owner.as_deref(), Some("first-owner"));
        std::env::remove_var("OWNER");
        std::env::remove_var("GIT_OWNER");
    }
}
