pub mod collect;
pub mod config;
pub mod convert;
pub mod document;
pub mod filter;
pub mod github;
pub mod languages;
pub mod load_config;
pub mod tree;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use config::{ConvertConfig, GithubEnv, Source};
use convert::convert;
use filter::FilterPolicy;
use github::GithubClient;
use load_config::load_filters;

/// CLI for repo2md: turn a repository into one Markdown document.
#[derive(Parser)]
#[clap(
    name = "repo2md",
    version,
    about = "Convert a local or GitHub repository into a single Markdown document with a directory tree and file contents"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a GitHub repository and convert it
    Github {
        /// Name of the repository to convert
        #[clap(long)]
        repo: String,
        /// Repository owner/organization (overrides the GIT_OWNER env var)
        #[clap(long)]
        owner: Option<String>,
        /// Branch, tag or commit to use (default branch when omitted)
        #[clap(long)]
        branch: Option<String>,
        /// Keep the downloaded repository instead of deleting it afterwards
        #[clap(long)]
        keep: bool,
        /// Filter file contents by the language GitHub detects for the repo
        #[clap(long)]
        language: bool,
        /// Directory for the generated Markdown file
        #[clap(long, default_value = "tmp")]
        destination: PathBuf,
        /// Optional YAML file replacing the default ignore filters
        #[clap(long)]
        filters: Option<PathBuf>,
    },
    /// Convert an already-downloaded local repository
    Local {
        /// Path to the local repository
        #[clap(long)]
        source: PathBuf,
        /// Language to filter file contents by (e.g. "python")
        #[clap(long)]
        language: Option<String>,
        /// Directory for the generated Markdown file
        #[clap(long, default_value = "tmp")]
        destination: PathBuf,
        /// Optional YAML file replacing the default ignore filters
        #[clap(long)]
        filters: Option<PathBuf>,
    },
}

/// Extracted CLI logic entrypoint for integration tests and main().
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("repo2md starting");

    let report = match cli.command {
        Commands::Github {
            repo,
            owner,
            branch,
            keep,
            language,
            destination,
            filters,
        } => {
            let policy = resolve_policy(filters)?;
            let mut env = GithubEnv::from_env();
            if let Some(owner) = owner {
                env.owner = Some(owner);
            }
            let downloader = GithubClient::new(env, destination.clone());
            let config = ConvertConfig {
                source: Source::Github {
                    repo,
                    branch,
                    use_detected_language: language,
                },
                destination,
                policy,
                keep_download: keep,
            };
            convert(&config, &downloader).await?
        }
        Commands::Local {
            source,
            language,
            destination,
            filters,
        } => {
            let policy = resolve_policy(filters)?;
            let config = ConvertConfig {
                source: Source::Local {
                    path: source,
                    language,
                },
                destination,
                policy,
                keep_download: true,
            };
            // The downloader is unused for local sources; the real client
            // with default env keeps the call site uniform.
            let downloader = GithubClient::new(GithubEnv::from_env(), PathBuf::from("tmp"));
            convert(&config, &downloader).await?
        }
    };

    println!(
        "Converted '{}' ({} files) -> {}",
        report.repo_name,
        report.files_included,
        report.output_path.display()
    );
    Ok(())
}

fn resolve_policy(filters: Option<PathBuf>) -> Result<FilterPolicy> {
    match filters {
        Some(path) => load_filters(path),
        None => Ok(FilterPolicy::default()),
    }
}
