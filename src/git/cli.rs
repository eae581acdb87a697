//! Git CLI wrapper for the repository setup and publish operations.
//!
//! Uses the git CLI directly (rather than libgit2) so hooks, credential
//! helpers and the user's SSH setup behave exactly as they do in a terminal.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::credentials::{self, Token};
use crate::git::remotes::{parse_remotes, RemoteBinding};

/// Name of the metadata directory git keeps inside a work tree
pub const METADATA_DIR: &str = ".git";

/// Errors from running the git binary
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git is not installed or not in PATH ({0})")]
    NotInstalled(String),

    #[error("failed to execute {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {subcommand} failed: {output}")]
    Failed {
        subcommand: String,
        status: Option<i32>,
        /// Unmasked stderr (or stdout when stderr was empty)
        output: String,
    },
}

impl GitError {
    /// Raw text suitable for classification
    pub fn raw_output(&self) -> String {
        match self {
            GitError::Failed { output, .. } => output.clone(),
            other => other.to_string(),
        }
    }
}

/// Low-level git command wrapper
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Resolve the configured binary on PATH
    pub fn locate(binary: &str) -> Result<Self, GitError> {
        which::which(binary)
            .map(Self::new)
            .map_err(|e| GitError::NotInstalled(e.to_string()))
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Execute a git command and return stdout
    async fn run_git(&self, args: &[&str], cwd: &Path) -> Result<String, GitError> {
        self.run_git_masked(args, cwd, None).await
    }

    /// Execute a git command, masking `token` in anything that gets logged
    async fn run_git_masked(
        &self,
        args: &[&str],
        cwd: &Path,
        token: Option<&Token>,
    ) -> Result<String, GitError> {
        let shown: Vec<_> = args.iter().map(|a| credentials::mask(a, token)).collect();
        debug!(args = ?shown, ?cwd, "Running git command");

        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(cwd)
            // No terminal to answer a credential prompt
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GitError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let output_text = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            debug!(
                status = ?output.status.code(),
                output = %credentials::mask(&output_text, token),
                "git command failed"
            );
            return Err(GitError::Failed {
                subcommand: subcommand_of(args).to_string(),
                status: output.status.code(),
                output: output_text,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Execute a git command, returning Ok(()) on success
    async fn run_git_silent(&self, args: &[&str], cwd: &Path) -> Result<(), GitError> {
        self.run_git(args, cwd).await?;
        Ok(())
    }

    /// Create an empty repository in `path`
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn init(&self, path: &Path) -> Result<(), GitError> {
        self.run_git_silent(&["init"], path).await
    }

    /// Stage everything under `path`, honoring ignore rules
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn add_all(&self, path: &Path) -> Result<(), GitError> {
        self.run_git_silent(&["add", "."], path).await
    }

    /// Entries reported by `git status --porcelain`
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn status_entries(&self, path: &Path) -> Result<Vec<String>, GitError> {
        let output = self.run_git(&["status", "--porcelain"], path).await?;
        Ok(output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Commit staged changes with a message
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn commit(&self, path: &Path, message: &str) -> Result<(), GitError> {
        self.run_git_silent(&["commit", "-m", message], path).await
    }

    /// All configured remotes with their fetch and push URLs
    #[instrument(skip_all, fields(path = %path.display()))]
    pub async fn remotes(&self, path: &Path) -> Result<Vec<RemoteBinding>, GitError> {
        let output = self.run_git(&["remote", "-v"], path).await?;
        Ok(parse_remotes(&output))
    }

    /// Add a remote
    #[instrument(skip_all, fields(path = %path.display(), name))]
    pub async fn add_remote(&self, path: &Path, name: &str, url: &str) -> Result<(), GitError> {
        self.run_git_silent(&["remote", "add", name, url], path).await
    }

    /// Remove a remote
    #[instrument(skip_all, fields(path = %path.display(), name))]
    pub async fn remove_remote(&self, path: &Path, name: &str) -> Result<(), GitError> {
        self.run_git_silent(&["remote", "remove", name], path).await
    }

    /// Force-rename the current branch (works on an unborn branch too)
    #[instrument(skip_all, fields(path = %path.display(), branch))]
    pub async fn force_rename_branch(&self, path: &Path, branch: &str) -> Result<(), GitError> {
        self.run_git_silent(&["branch", "-M", branch], path).await
    }

    /// Push `branch` to `remote` and set it as upstream.
    ///
    /// With `push_url` the branch is pushed to that URL directly and the
    /// tracking ref and upstream are then recorded against `remote` locally.
    /// The URL is never written to `.git/config`, and any `pushurl` already
    /// configured on `remote` is bypassed.
    #[instrument(skip_all, fields(path = %path.display(), remote, branch))]
    pub async fn push_upstream(
        &self,
        path: &Path,
        remote: &str,
        branch: &str,
        push_url: Option<&str>,
        token: Option<&Token>,
    ) -> Result<(), GitError> {
        let Some(url) = push_url else {
            return self
                .run_git_silent(&["push", "-u", remote, branch], path)
                .await;
        };

        let local_ref = format!("refs/heads/{branch}");
        let refspec = format!("{local_ref}:{local_ref}");
        self.run_git_masked(&["push", url, &refspec], path, token)
            .await?;

        let tracking_ref = format!("refs/remotes/{remote}/{branch}");
        self.run_git_silent(&["update-ref", &tracking_ref, &local_ref], path)
            .await?;
        let upstream = format!("--set-upstream-to={remote}/{branch}");
        self.run_git_silent(&["branch", &upstream, branch], path).await
    }
}

/// First argument that is the git subcommand, skipping `-c key=value` pairs
fn subcommand_of<'a>(args: &[&'a str]) -> &'a str {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg == "-c" || *arg == "-C" {
            iter.next();
            continue;
        }
        if !arg.starts_with('-') {
            return *arg;
        }
    }
    ""
}
