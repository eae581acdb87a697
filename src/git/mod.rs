//! Git operations module - CLI wrapper and remote parsing.
//!
//! Every invocation is given an explicit working directory; nothing here
//! depends on the process-wide current directory.

mod cli;
mod remotes;

pub use cli::{GitCli, GitError, METADATA_DIR};
pub use remotes::{parse_remotes, RemoteBinding, RemoteRefs};
