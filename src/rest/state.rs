//! API state for the REST server.
//!
//! Holds only immutable collaborators; folder state is never cached here.

use std::sync::Arc;

use crate::config::Config;
use crate::git::GitCli;
use crate::picker::{FolderPicker, SystemFolderPicker};

/// Shared state for the REST API
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<Config>,
    pub git: Arc<GitCli>,
    pub picker: Arc<dyn FolderPicker>,
}

impl ApiState {
    /// Create state with explicit collaborators
    pub fn new(config: Config, git: GitCli, picker: Arc<dyn FolderPicker>) -> Self {
        Self {
            config: Arc::new(config),
            git: Arc::new(git),
            picker,
        }
    }

    /// Create state using the configured git binary and the native dialog
    pub fn from_config(config: Config) -> Self {
        let git = GitCli::new(&config.git.binary);
        let picker = Arc::new(SystemFolderPicker::new(config.picker.prompt.clone()));
        Self::new(config, git, picker)
    }
}
