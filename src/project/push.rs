//! The one-click push workflow.
//!
//! Steps run strictly in order and the first failure aborts the rest. Effects
//! of completed steps (a new commit, a rewritten remote) are left in place.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::GitConfig;
use crate::credentials::{self, authenticated_url, Token};
use crate::diagnosis::{self, Diagnosis};
use crate::git::{GitCli, GitError};
use crate::project::ignore_file::{ensure_ignore_file, IgnoreFileAction, IGNORE_FILE};
use crate::project::ProjectFolder;

/// Message returned when every step succeeded
pub const SUCCESS_MESSAGE: &str = "Project pushed successfully!";

/// Input of the push workflow
#[derive(Debug, Clone)]
pub struct PushRequest {
    pub folder: String,
    pub repo_url: String,
    pub token: Option<Token>,
}

/// Workflow steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PushStep {
    IgnoreFile,
    Init,
    Stage,
    Commit,
    Remote,
    Branch,
    Publish,
}

impl PushStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            PushStep::IgnoreFile => "ignore_file",
            PushStep::Init => "init",
            PushStep::Stage => "stage",
            PushStep::Commit => "commit",
            PushStep::Remote => "remote",
            PushStep::Branch => "branch",
            PushStep::Publish => "publish",
        }
    }
}

impl fmt::Display for PushStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a completed step did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: PushStep,
    pub detail: String,
}

impl StepRecord {
    fn new(step: PushStep, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        info!(%step, %detail, "Push step complete");
        Self { step, detail }
    }
}

/// Result of a fully successful push
#[derive(Debug, Clone, Serialize)]
pub struct PushOutcome {
    pub success: bool,
    pub message: String,
    pub steps: Vec<StepRecord>,
}

/// A failed step, holding tool output in raw and masked form.
///
/// The raw text is only used for classification; everything shown to a
/// person uses [`StepFailure::output`].
#[derive(Debug, Clone)]
pub struct StepFailure {
    pub step: PushStep,
    raw: String,
    masked: String,
}

impl StepFailure {
    fn new(step: PushStep, raw: String, token: Option<&Token>) -> Self {
        let masked = credentials::mask(&raw, token).into_owned();
        Self { step, raw, masked }
    }

    /// Masked tool output
    pub fn output(&self) -> &str {
        &self.masked
    }

    /// Unmasked tool output
    pub fn raw_output(&self) -> &str {
        &self.raw
    }

    /// Classification of the unmasked output
    pub fn diagnosis(&self) -> Diagnosis {
        diagnosis::classify(&self.raw)
    }
}

/// Errors from the push workflow
#[derive(Error, Debug)]
pub enum PushError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{} step failed: {}", .0.step, .0.output())]
    Step(StepFailure),
}

fn git_failure(step: PushStep, token: Option<&Token>) -> impl Fn(GitError) -> PushError + '_ {
    move |e| PushError::Step(StepFailure::new(step, e.raw_output(), token))
}

/// Run the full workflow: ignore file, init, stage, commit, remote, branch, publish.
#[instrument(skip_all, fields(folder = %request.folder))]
pub async fn push(
    git: &GitCli,
    settings: &GitConfig,
    request: &PushRequest,
) -> Result<PushOutcome, PushError> {
    let repo_url = request.repo_url.trim();
    if request.folder.trim().is_empty() || repo_url.is_empty() {
        return Err(PushError::InvalidInput(
            "Missing folder or repo URL".to_string(),
        ));
    }
    let folder = ProjectFolder::open(&request.folder)
        .map_err(|e| PushError::InvalidInput(e.to_string()))?;
    let path = folder.path();
    let token = request.token.as_ref();

    // Silently falls back to the plain URL for SSH-style or unparsable remotes
    let push_url = authenticated_url(repo_url, token);

    let mut steps = Vec::with_capacity(7);

    // 1. Ignore file
    let action = ensure_ignore_file(path).await.map_err(|e| {
        PushError::Step(StepFailure::new(PushStep::IgnoreFile, e.to_string(), token))
    })?;
    steps.push(StepRecord::new(
        PushStep::IgnoreFile,
        match action {
            IgnoreFileAction::Created => format!("Created default {IGNORE_FILE}"),
            IgnoreFileAction::KeptExisting => format!("Kept existing {IGNORE_FILE}"),
        },
    ));

    // 2. Init, using the direct-child check rather than git's upward discovery
    if folder.has_metadata_dir() {
        steps.push(StepRecord::new(PushStep::Init, "Repository already initialized"));
    } else {
        git.init(path)
            .await
            .map_err(git_failure(PushStep::Init, token))?;
        steps.push(StepRecord::new(PushStep::Init, "Initialized git repository"));
    }

    // 3. Stage
    git.add_all(path)
        .await
        .map_err(git_failure(PushStep::Stage, token))?;
    steps.push(StepRecord::new(PushStep::Stage, "Staged all files"));

    // 4. Commit only when something changed
    let changed = git
        .status_entries(path)
        .await
        .map_err(git_failure(PushStep::Commit, token))?;
    if changed.is_empty() {
        steps.push(StepRecord::new(PushStep::Commit, "No changes to commit"));
    } else {
        git.commit(path, &settings.commit_message)
            .await
            .map_err(git_failure(PushStep::Commit, token))?;
        steps.push(StepRecord::new(
            PushStep::Commit,
            format!("Committed {} file(s)", changed.len()),
        ));
    }

    // 5. Remote, compared on the push URL only
    let remote = settings.remote_name.as_str();
    let remotes = git
        .remotes(path)
        .await
        .map_err(git_failure(PushStep::Remote, token))?;
    match remotes.iter().find(|r| r.name == remote) {
        None => {
            git.add_remote(path, remote, repo_url)
                .await
                .map_err(git_failure(PushStep::Remote, token))?;
            steps.push(StepRecord::new(
                PushStep::Remote,
                format!("Added remote {remote}"),
            ));
        }
        Some(existing) if existing.refs.push != repo_url => {
            warn!(
                remote,
                previous = %credentials::mask(&existing.refs.push, token),
                "Remote points elsewhere, replacing it"
            );
            git.remove_remote(path, remote)
                .await
                .map_err(git_failure(PushStep::Remote, token))?;
            git.add_remote(path, remote, repo_url)
                .await
                .map_err(git_failure(PushStep::Remote, token))?;
            steps.push(StepRecord::new(
                PushStep::Remote,
                format!("Replaced remote {remote}"),
            ));
        }
        Some(_) => {
            steps.push(StepRecord::new(
                PushStep::Remote,
                format!("Remote {remote} already configured"),
            ));
        }
    }

    // 6. Branch
    let branch = settings.canonical_branch.as_str();
    git.force_rename_branch(path, branch)
        .await
        .map_err(git_failure(PushStep::Branch, token))?;
    steps.push(StepRecord::new(
        PushStep::Branch,
        format!("Current branch set to {branch}"),
    ));

    // 7. Publish
    git.push_upstream(path, remote, branch, push_url.as_deref(), token)
        .await
        .map_err(git_failure(PushStep::Publish, token))?;
    steps.push(StepRecord::new(
        PushStep::Publish,
        format!("Pushed {branch} to {remote}"),
    ));

    Ok(PushOutcome {
        success: true,
        message: SUCCESS_MESSAGE.to_string(),
        steps,
    })
}
