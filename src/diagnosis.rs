//! Translation of raw git output into user-facing diagnoses.
//!
//! The table is ordered and the first matching pattern wins. Some patterns
//! (e.g. `conflict`) also occur inside the text matched by earlier entries,
//! so entries must never be reordered.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A user-facing explanation of a git failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub title: &'static str,
    pub description: &'static str,
    pub advice: &'static str,
    /// False when no table entry matched and the generic entry was used
    pub is_translated: bool,
}

/// Diagnosis used when no pattern matches
pub const UNKNOWN: Diagnosis = Diagnosis {
    title: "Unknown Git Error",
    description: "Something went wrong with the git command.",
    advice: "Check the raw logs for more details.",
    is_translated: false,
};

/// Ordered (pattern, diagnosis) table
const PATTERNS: &[(&str, Diagnosis)] = &[
    (
        r"fatal: non-fast-forward|\[rejected\].*\((?:fetch first|non-fast-forward)\)",
        Diagnosis {
            title: "Updates Rejected (Non-Fast-Forward)",
            description: "Your local code is behind the version on GitHub.",
            advice: "Someone else (or you) pushed changes to this branch. You need to 'pull' those changes first before you can push yours.",
            is_translated: true,
        },
    ),
    (
        r"Permission denied \(publickey\)",
        Diagnosis {
            title: "Authentication Failed (SSH Key)",
            description: "GitHub doesn't recognize your computer.",
            advice: "You need to add your SSH key to your GitHub account settings. Or simpler: try using HTTPS URL instead of SSH.",
            is_translated: true,
        },
    ),
    (
        r"Authentication failed",
        Diagnosis {
            title: "Authentication Failed",
            description: "Your username or password/token is incorrect.",
            advice: "Check your credentials. If you have 2FA enabled, you must use a Personal Access Token instead of a password.",
            is_translated: true,
        },
    ),
    (
        r"remote: Repository not found",
        Diagnosis {
            title: "Repository Not Found",
            description: "The URL you entered doesn't point to a valid repository.",
            advice: "Double check the URL. It might be a typo, or the repo might be private and you don't have access.",
            is_translated: true,
        },
    ),
    (
        r"conflict",
        Diagnosis {
            title: "Merge Conflict",
            description: "GitHub has changes that conflict with your local files.",
            advice: "You need to manually verify the files and decide which code to keep (yours or theirs).",
            is_translated: true,
        },
    ),
    (
        r"does not appear to be a git repository",
        Diagnosis {
            title: "Not a Git Repository",
            description: "This folder hasn't been set up as a git project yet.",
            advice: "Try initializing the repository first.",
            is_translated: true,
        },
    ),
];

static TABLE: Lazy<Vec<(Regex, Diagnosis)>> = Lazy::new(|| {
    PATTERNS
        .iter()
        .map(|(pattern, diagnosis)| {
            let re = Regex::new(pattern).expect("diagnosis patterns are valid regexes");
            (re, *diagnosis)
        })
        .collect()
});

/// Classify raw git output. Must be given the unmasked text.
pub fn classify(raw: &str) -> Diagnosis {
    TABLE
        .iter()
        .find(|(re, _)| re.is_match(raw))
        .map(|(_, diagnosis)| *diagnosis)
        .unwrap_or(UNKNOWN)
}
