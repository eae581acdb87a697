//! Default `.gitignore` bootstrap.

use std::path::Path;

use serde::Serialize;
use tokio::fs;

/// Name of the ignore-rules file
pub const IGNORE_FILE: &str = ".gitignore";

/// Patterns written when a folder has no ignore file. Large generated trees
/// make `git add` and `git push` crawl, so these are always excluded.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "# Dependencies",
    "node_modules/",
    "bower_components/",
    "vendor/",
    "",
    "# Virtual environments",
    "venv/",
    ".venv/",
    "env/",
    "",
    "# Bytecode caches",
    "__pycache__/",
    "*.py[cod]",
    "",
    "# OS metadata",
    ".DS_Store",
    "Thumbs.db",
    "",
    "# Editors",
    ".vscode/",
    ".idea/",
    "",
    "# Build output",
    "dist/",
    "build/",
    "target/",
    "",
    "# Local environment",
    ".env",
];

/// What the bootstrap did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreFileAction {
    Created,
    KeptExisting,
}

/// Write the default ignore file unless one already exists directly in `folder`
pub async fn ensure_ignore_file(folder: &Path) -> std::io::Result<IgnoreFileAction> {
    let path = folder.join(IGNORE_FILE);
    if fs::try_exists(&path).await? {
        return Ok(IgnoreFileAction::KeptExisting);
    }

    let mut contents = DEFAULT_IGNORE_PATTERNS.join("\n");
    contents.push('\n');
    fs::write(&path, contents).await?;
    tracing::info!(path = %path.display(), "Created default ignore file");

    Ok(IgnoreFileAction::Created)
}
