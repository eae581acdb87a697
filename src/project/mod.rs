//! Project folder inspection and the push workflow.
//!
//! Folder state is re-read from disk on every call; nothing is cached.

mod ignore_file;
mod push;
mod status;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::git::{GitError, METADATA_DIR};

pub use ignore_file::{ensure_ignore_file, IgnoreFileAction, DEFAULT_IGNORE_PATTERNS, IGNORE_FILE};
pub use push::{push, PushError, PushOutcome, PushRequest, PushStep, StepFailure, StepRecord};
pub use status::{inspect, ProjectStatus};

/// Errors from observational project operations
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Git(#[from] GitError),
}

/// A validated, existing project folder
#[derive(Debug, Clone)]
pub struct ProjectFolder {
    path: PathBuf,
}

impl ProjectFolder {
    /// Validate that `folder` is non-empty and names an existing directory
    pub fn open(folder: &str) -> Result<Self, ProjectError> {
        let trimmed = folder.trim();
        if trimmed.is_empty() {
            return Err(ProjectError::InvalidInput("Invalid folder path".to_string()));
        }
        let path = PathBuf::from(trimmed);
        if !path.is_dir() {
            return Err(ProjectError::InvalidInput("Invalid folder path".to_string()));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `.git` is a real directory directly inside this folder.
    ///
    /// Ancestors are never consulted: git's own discovery walks upward and
    /// would report a subfolder of an unrelated repository as initialized.
    pub fn has_metadata_dir(&self) -> bool {
        has_metadata_dir(&self.path)
    }
}

/// Direct-child check for the git metadata directory (symlinks do not count)
pub fn has_metadata_dir(folder: &Path) -> bool {
    std::fs::symlink_metadata(folder.join(METADATA_DIR))
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_rejects_empty_and_missing() {
        assert!(matches!(
            ProjectFolder::open("   "),
            Err(ProjectError::InvalidInput(_))
        ));
        assert!(matches!(
            ProjectFolder::open("/definitely/not/here/xyz"),
            Err(ProjectError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_open_rejects_regular_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notes.txt");
        std::fs::write(&file, "not a folder").unwrap();

        match ProjectFolder::open(&file.to_string_lossy()) {
            Err(ProjectError::InvalidInput(msg)) => assert_eq!(msg, "Invalid folder path"),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn test_open_accepts_directory() {
        let temp = TempDir::new().unwrap();
        let folder = ProjectFolder::open(&temp.path().to_string_lossy()).unwrap();
        assert_eq!(folder.path(), temp.path());
    }

    #[test]
    fn test_metadata_dir_must_be_direct_child() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(".git")).unwrap();
        let nested = temp.path().join("nested");
        std::fs::create_dir(&nested).unwrap();

        assert!(has_metadata_dir(temp.path()));
        assert!(!has_metadata_dir(&nested));
    }

    #[test]
    fn test_metadata_file_is_not_a_repo() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".git"), "gitdir: /elsewhere").unwrap();
        assert!(!has_metadata_dir(temp.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_metadata_symlink_is_not_a_repo() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real-git");
        std::fs::create_dir(&real).unwrap();
        let project = temp.path().join("project");
        std::fs::create_dir(&project).unwrap();
        std::os::unix::fs::symlink(&real, project.join(".git")).unwrap();

        assert!(!has_metadata_dir(&project));
    }
}
