//! Centralized environment variable registry.
//!
//! Single source of truth for the environment variables the agent reads,
//! printed by `repopilot config env`.
//!
//! All configuration variables use the `REPOPILOT_` prefix with `__` separator
//! for nested config paths (e.g., `REPOPILOT__SERVER__PORT`).

/// An environment variable definition
#[derive(Debug, Clone)]
pub struct EnvVar {
    /// Environment variable name (e.g., "REPOPILOT__SERVER__PORT")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Category for grouping in documentation
    pub category: EnvVarCategory,
    /// Default value if not set
    pub default: Option<&'static str>,
    /// Example value for documentation
    pub example: Option<&'static str>,
}

/// Categories for organizing environment variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvVarCategory {
    /// HTTP listener settings
    Server,
    /// Git binary and workflow names
    Git,
    /// Folder dialog
    Picker,
    /// File path configuration
    Paths,
    /// Logging configuration
    Logging,
}

impl EnvVarCategory {
    /// Display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            EnvVarCategory::Server => "Server",
            EnvVarCategory::Git => "Git",
            EnvVarCategory::Picker => "Folder Picker",
            EnvVarCategory::Paths => "Paths",
            EnvVarCategory::Logging => "Logging",
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [EnvVarCategory] {
        &[
            EnvVarCategory::Server,
            EnvVarCategory::Git,
            EnvVarCategory::Picker,
            EnvVarCategory::Paths,
            EnvVarCategory::Logging,
        ]
    }
}

/// Static registry of all documented environment variables
pub static ENV_VARS: &[EnvVar] = &[
    // === Server ===
    EnvVar {
        name: "REPOPILOT__SERVER__HOST",
        description: "Address the local agent binds to",
        category: EnvVarCategory::Server,
        default: Some("127.0.0.1"),
        example: Some("0.0.0.0"),
    },
    EnvVar {
        name: "REPOPILOT__SERVER__PORT",
        description: "Port the local agent listens on",
        category: EnvVarCategory::Server,
        default: Some("3001"),
        example: Some("4000"),
    },
    EnvVar {
        name: "REPOPILOT__SERVER__WEB_UI_URL",
        description: "URL of the browser UI, shown on the agent's root page",
        category: EnvVarCategory::Server,
        default: Some("http://localhost:5173"),
        example: Some("http://localhost:8080"),
    },
    // === Git ===
    EnvVar {
        name: "REPOPILOT__GIT__BINARY",
        description: "git executable to invoke",
        category: EnvVarCategory::Git,
        default: Some("git"),
        example: Some("/usr/local/bin/git"),
    },
    EnvVar {
        name: "REPOPILOT__GIT__REMOTE_NAME",
        description: "Remote the push workflow configures and pushes to",
        category: EnvVarCategory::Git,
        default: Some("origin"),
        example: Some("github"),
    },
    EnvVar {
        name: "REPOPILOT__GIT__CANONICAL_BRANCH",
        description: "Branch name every repository is normalized to before pushing",
        category: EnvVarCategory::Git,
        default: Some("main"),
        example: Some("trunk"),
    },
    EnvVar {
        name: "REPOPILOT__GIT__COMMIT_MESSAGE",
        description: "Message used for the commit the push workflow creates",
        category: EnvVarCategory::Git,
        default: Some("Initial repository setup by Repopilot"),
        example: Some("Publish project"),
    },
    // === Picker ===
    EnvVar {
        name: "REPOPILOT__PICKER__PROMPT",
        description: "Title shown in the native folder dialog",
        category: EnvVarCategory::Picker,
        default: Some("Select Project Folder"),
        example: Some("Choose a folder to publish"),
    },
    // === Paths ===
    EnvVar {
        name: "REPOPILOT__PATHS__STATE",
        description: "Directory for agent state such as log files",
        category: EnvVarCategory::Paths,
        default: Some(".repopilot"),
        example: Some("/var/lib/repopilot"),
    },
    // === Logging ===
    EnvVar {
        name: "REPOPILOT__LOGGING__LEVEL",
        description: "Log level filter (trace, debug, info, warn, error)",
        category: EnvVarCategory::Logging,
        default: Some("info"),
        example: Some("debug"),
    },
    EnvVar {
        name: "REPOPILOT__LOGGING__TO_FILE",
        description: "Write logs to a file under the state directory instead of stderr",
        category: EnvVarCategory::Logging,
        default: Some("false"),
        example: Some("true"),
    },
    EnvVar {
        name: "RUST_LOG",
        description: "Overrides the configured log filter",
        category: EnvVarCategory::Logging,
        default: None,
        example: Some("repopilot=debug,tower_http=info"),
    },
];

/// Get all environment variables for a given category
pub fn env_vars_for_category(category: EnvVarCategory) -> impl Iterator<Item = &'static EnvVar> {
    ENV_VARS.iter().filter(move |v| v.category == category)
}

/// Get environment variables grouped by category
pub fn env_vars_by_category() -> Vec<(EnvVarCategory, Vec<&'static EnvVar>)> {
    EnvVarCategory::all()
        .iter()
        .map(|cat| {
            let vars: Vec<&EnvVar> = env_vars_for_category(*cat).collect();
            (*cat, vars)
        })
        .filter(|(_, vars)| !vars.is_empty())
        .collect()
}
