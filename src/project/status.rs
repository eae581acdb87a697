//! Read-only inspection of a project folder.

use serde::Serialize;
use tracing::instrument;

use crate::git::{GitCli, RemoteBinding};
use crate::project::{ProjectError, ProjectFolder};

/// Version-control state of a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatus {
    pub is_repo: bool,
    pub has_remote: bool,
    pub remotes: Vec<RemoteBinding>,
}

impl ProjectStatus {
    fn not_a_repo() -> Self {
        Self {
            is_repo: false,
            has_remote: false,
            remotes: Vec::new(),
        }
    }
}

/// Report whether `folder` is a repository and, if so, its remotes.
///
/// Git is only invoked when `.git` exists directly inside the folder.
#[instrument(skip(git))]
pub async fn inspect(git: &GitCli, folder: &str) -> Result<ProjectStatus, ProjectError> {
    let folder = ProjectFolder::open(folder)?;

    if !folder.has_metadata_dir() {
        return Ok(ProjectStatus::not_a_repo());
    }

    let remotes = git.remotes(folder.path()).await?;
    Ok(ProjectStatus {
        is_repo: true,
        has_remote: !remotes.is_empty(),
        remotes,
    })
}
