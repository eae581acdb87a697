//! Native folder selection dialog.
//!
//! Provides a trait-based abstraction so the HTTP layer can be tested
//! without popping up a real dialog.

use std::path::PathBuf;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tokio::process::Command;

/// Errors from the folder picker. Cancellation is not an error.
#[derive(Error, Debug)]
pub enum PickerError {
    #[error("no native folder dialog is available on this platform")]
    Unsupported,

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("folder dialog failed: {raw}")]
    Failed { raw: String },
}

/// Something that can ask the user for a folder
#[async_trait]
pub trait FolderPicker: Send + Sync {
    /// `Ok(None)` means the user cancelled
    async fn pick(&self) -> Result<Option<PathBuf>, PickerError>;
}

/// Cancellation text varies in casing and spelling between OS versions
static CANCELLED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)user\s+cancel+ed|cancel+ed\s+by\s+user").expect("valid cancellation regex")
});

/// Whether dialog diagnostic text reports a user cancellation
pub fn is_cancellation(text: &str) -> bool {
    CANCELLED.is_match(text)
}

/// A platform dialog invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Exit code this dialog uses for "closed without choosing"
    pub cancel_exit_code: Option<i32>,
}

impl DialogCommand {
    /// The dialog for the current platform, if there is one
    pub fn for_current_platform(prompt: &str) -> Option<Self> {
        if cfg!(target_os = "macos") {
            Some(Self::osascript(prompt))
        } else if cfg!(target_os = "windows") {
            Some(Self::powershell(prompt))
        } else if cfg!(unix) {
            Some(Self::zenity(prompt))
        } else {
            None
        }
    }

    pub fn osascript(prompt: &str) -> Self {
        let prompt = prompt.replace('"', "'");
        Self {
            program: "osascript".to_string(),
            args: vec![
                "-e".to_string(),
                format!("POSIX path of (choose folder with prompt \"{prompt}\")"),
            ],
            // osascript exits 1 for every failure; cancellation is told apart by text
            cancel_exit_code: None,
        }
    }

    pub fn zenity(prompt: &str) -> Self {
        Self {
            program: "zenity".to_string(),
            args: vec![
                "--file-selection".to_string(),
                "--directory".to_string(),
                format!("--title={prompt}"),
            ],
            cancel_exit_code: Some(1),
        }
    }

    pub fn powershell(prompt: &str) -> Self {
        let prompt = prompt.replace('\'', "''");
        let script = format!(
            "Add-Type -AssemblyName System.Windows.Forms; \
             $d = New-Object System.Windows.Forms.FolderBrowserDialog; \
             $d.Description = '{prompt}'; \
             if ($d.ShowDialog() -eq 'OK') {{ $d.SelectedPath }} else {{ exit 1 }}"
        );
        Self {
            program: "powershell".to_string(),
            args: vec![
                "-NoProfile".to_string(),
                "-STA".to_string(),
                "-Command".to_string(),
                script,
            ],
            cancel_exit_code: Some(1),
        }
    }

    /// Turn the dialog's exit status and output into a selection
    pub fn interpret(&self, output: &Output) -> Result<Option<PathBuf>, PickerError> {
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if output.status.success() {
            if stdout.is_empty() {
                return Ok(None);
            }
            return Ok(Some(PathBuf::from(stdout)));
        }

        if is_cancellation(&stderr) {
            return Ok(None);
        }
        if stderr.is_empty()
            && self.cancel_exit_code.is_some()
            && output.status.code() == self.cancel_exit_code
        {
            return Ok(None);
        }

        Err(PickerError::Failed {
            raw: if stderr.is_empty() {
                format!("{} exited with {}", self.program, output.status)
            } else {
                stderr
            },
        })
    }
}

/// Folder picker backed by the operating system's dialog
pub struct SystemFolderPicker {
    prompt: String,
}

impl SystemFolderPicker {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

#[async_trait]
impl FolderPicker for SystemFolderPicker {
    async fn pick(&self) -> Result<Option<PathBuf>, PickerError> {
        let dialog = DialogCommand::for_current_platform(&self.prompt)
            .ok_or(PickerError::Unsupported)?;
        tracing::debug!(program = %dialog.program, "Opening folder dialog");

        let output = Command::new(&dialog.program)
            .args(&dialog.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| PickerError::Launch {
                program: dialog.program.clone(),
                source,
            })?;

        dialog.interpret(&output)
    }
}
