//! Integration tests for the status inspector and push workflow
//!
//! These tests drive the real git binary against temporary folders and a
//! local bare repository standing in for the remote. Nothing touches the
//! network except the https failure test, which targets a closed local port.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test push_workflow_integration
//! ```
//!
//! Tests are skipped with a message when `git` is not on PATH.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Once;

use tempfile::TempDir;

use repopilot::config::GitConfig;
use repopilot::credentials::Token;
use repopilot::git::GitCli;
use repopilot::project::{self, PushError, PushRequest, PushStep, IGNORE_FILE};

// ─── Configuration Helpers ───────────────────────────────────────────────────

fn git_available() -> bool {
    which::which("git").is_ok()
}

/// Macro to skip test if git is not installed
macro_rules! skip_if_no_git {
    () => {
        if !git_available() {
            eprintln!("Skipping test: git not found in PATH");
            return;
        }
        isolate_git_env();
    };
}

/// Give commits an identity and keep the user's global config out of the way
fn isolate_git_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        env::set_var("GIT_AUTHOR_NAME", "Repopilot Test");
        env::set_var("GIT_AUTHOR_EMAIL", "test@example.com");
        env::set_var("GIT_COMMITTER_NAME", "Repopilot Test");
        env::set_var("GIT_COMMITTER_EMAIL", "test@example.com");
        env::set_var("GIT_CONFIG_NOSYSTEM", "1");
        let null_config = if cfg!(windows) { "NUL" } else { "/dev/null" };
        env::set_var("GIT_CONFIG_GLOBAL", null_config);
    });
}

/// Run git synchronously for fixture setup and assertions
fn git(args: &[&str], cwd: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Name of the checked-out branch
fn current_branch(repo: &Path) -> String {
    git(&["symbolic-ref", "--short", "HEAD"], repo)
}

/// Number of commits reachable from HEAD
fn commit_count(repo: &Path) -> usize {
    git(&["rev-list", "--count", "HEAD"], repo)
        .parse()
        .expect("rev-list --count prints a number")
}

// ─── Test Context ─────────────────────────────────────────────────────────────

/// A project folder plus bare "remote" repositories, all in one temp dir
struct PushTestContext {
    temp_dir: TempDir,
    project: PathBuf,
    git: GitCli,
    settings: GitConfig,
}

impl PushTestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let project = temp_dir.path().join("project");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join("README.md"), "# Demo\n").unwrap();
        std::fs::create_dir_all(project.join("src")).unwrap();
        std::fs::write(project.join("src/main.py"), "print('hi')\n").unwrap();

        Self {
            temp_dir,
            project,
            git: GitCli::default(),
            settings: GitConfig::default(),
        }
    }

    /// Create a bare repository to push into and return its path as a URL
    fn bare_remote(&self, name: &str) -> String {
        let path = self.temp_dir.path().join(format!("{name}.git"));
        std::fs::create_dir_all(&path).unwrap();
        git(&["init", "--bare"], &path);
        path.to_string_lossy().to_string()
    }

    fn folder(&self) -> String {
        self.project.to_string_lossy().to_string()
    }

    fn request(&self, url: &str) -> PushRequest {
        PushRequest {
            folder: self.folder(),
            repo_url: url.to_string(),
            token: None,
        }
    }

    async fn push(&self, url: &str) -> Result<project::PushOutcome, PushError> {
        project::push(&self.git, &self.settings, &self.request(url)).await
    }

    fn detail_of(outcome: &project::PushOutcome, step: PushStep) -> String {
        outcome
            .steps
            .iter()
            .find(|r| r.step == step)
            .map(|r| r.detail.clone())
            .unwrap_or_default()
    }
}

// ─── Push Workflow Tests ──────────────────────────────────────────────────────

mod push_workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_first_push_publishes_everything() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        let remote = ctx.bare_remote("origin");

        let outcome = ctx.push(&remote).await.expect("push should succeed");

        assert!(outcome.success);
        assert_eq!(outcome.message, "Project pushed successfully!");
        let steps: Vec<PushStep> = outcome.steps.iter().map(|r| r.step).collect();
        assert_eq!(
            steps,
            vec![
                PushStep::IgnoreFile,
                PushStep::Init,
                PushStep::Stage,
                PushStep::Commit,
                PushStep::Remote,
                PushStep::Branch,
                PushStep::Publish,
            ]
        );

        assert!(ctx.project.join(IGNORE_FILE).is_file());
        assert!(ctx.project.join(".git").is_dir());
        assert_eq!(current_branch(&ctx.project), "main");
        assert_eq!(commit_count(&ctx.project), 1);
        assert_eq!(
            git(&["log", "-1", "--format=%s"], &ctx.project),
            "Initial repository setup by Repopilot"
        );

        // Remote received the canonical branch and it is tracked upstream
        let remote_head = git(&["rev-parse", "main"], Path::new(&remote));
        let local_head = git(&["rev-parse", "HEAD"], &ctx.project);
        assert_eq!(remote_head, local_head);
        assert_eq!(
            git(&["rev-parse", "--abbrev-ref", "main@{upstream}"], &ctx.project),
            "origin/main"
        );
    }

    #[tokio::test]
    async fn test_second_push_does_not_create_empty_commit() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        let remote = ctx.bare_remote("origin");

        ctx.push(&remote).await.expect("first push should succeed");
        let outcome = ctx.push(&remote).await.expect("second push should succeed");

        assert_eq!(commit_count(&ctx.project), 1);
        assert_eq!(
            PushTestContext::detail_of(&outcome, PushStep::Commit),
            "No changes to commit"
        );
        assert_eq!(
            PushTestContext::detail_of(&outcome, PushStep::Init),
            "Repository already initialized"
        );
        assert_eq!(
            PushTestContext::detail_of(&outcome, PushStep::Remote),
            "Remote origin already configured"
        );
    }

    #[tokio::test]
    async fn test_new_changes_are_committed_on_repush() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        let remote = ctx.bare_remote("origin");

        ctx.push(&remote).await.unwrap();
        std::fs::write(ctx.project.join("CHANGELOG.md"), "v2\n").unwrap();
        let outcome = ctx.push(&remote).await.unwrap();

        assert_eq!(commit_count(&ctx.project), 2);
        assert_eq!(
            PushTestContext::detail_of(&outcome, PushStep::Commit),
            "Committed 1 file(s)"
        );
    }

    #[tokio::test]
    async fn test_existing_ignore_file_is_preserved() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        let remote = ctx.bare_remote("origin");
        std::fs::write(ctx.project.join(IGNORE_FILE), "secrets/\n").unwrap();

        let outcome = ctx.push(&remote).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(ctx.project.join(IGNORE_FILE)).unwrap(),
            "secrets/\n"
        );
        assert_eq!(
            PushTestContext::detail_of(&outcome, PushStep::IgnoreFile),
            "Kept existing .gitignore"
        );
    }

    #[tokio::test]
    async fn test_default_ignore_rules_exclude_generated_trees() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        let remote = ctx.bare_remote("origin");
        std::fs::create_dir_all(ctx.project.join("node_modules/left-pad")).unwrap();
        std::fs::write(ctx.project.join("node_modules/left-pad/index.js"), "x").unwrap();

        ctx.push(&remote).await.unwrap();

        let tracked = git(&["ls-files"], &ctx.project);
        assert!(tracked.contains("README.md"));
        assert!(!tracked.contains("node_modules"));
    }

    #[tokio::test]
    async fn test_changed_url_replaces_origin() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        let first = ctx.bare_remote("first");
        let second = ctx.bare_remote("second");

        ctx.push(&first).await.unwrap();
        let outcome = ctx.push(&second).await.expect("re-push should succeed");

        assert_eq!(
            PushTestContext::detail_of(&outcome, PushStep::Remote),
            "Replaced remote origin"
        );
        let remotes = ctx.git.remotes(&ctx.project).await.unwrap();
        assert_eq!(remotes.len(), 1);
        assert_eq!(remotes[0].name, "origin");
        assert_eq!(remotes[0].refs.push, second);
        assert_eq!(remotes[0].refs.fetch, second);

        // The new remote received the branch too
        git(&["rev-parse", "main"], Path::new(&second));
    }

    #[tokio::test]
    async fn test_legacy_branch_is_renamed() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        let remote = ctx.bare_remote("origin");
        git(&["init"], &ctx.project);
        git(&["symbolic-ref", "HEAD", "refs/heads/master"], &ctx.project);

        ctx.push(&remote).await.unwrap();

        assert_eq!(current_branch(&ctx.project), "main");
        let branches = git(&["branch", "--list"], &ctx.project);
        assert!(!branches.contains("master"));
    }

    #[tokio::test]
    async fn test_subfolder_of_outer_repo_gets_its_own_repo() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        let remote = ctx.bare_remote("origin");
        // Turn the temp root into an unrelated outer repository
        git(&["init"], ctx.temp_dir.path());

        let outcome = ctx.push(&remote).await.unwrap();

        assert_eq!(
            PushTestContext::detail_of(&outcome, PushStep::Init),
            "Initialized git repository"
        );
        assert!(ctx.project.join(".git").is_dir());
    }

    #[tokio::test]
    async fn test_token_is_never_persisted_or_shown() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        let token = "sekret-token-123";
        // Closed port: the push fails fast without leaving the machine
        let url = "https://127.0.0.1:9/u/r.git";
        let request = PushRequest {
            token: Token::new(token),
            ..ctx.request(url)
        };

        let err = project::push(&ctx.git, &ctx.settings, &request)
            .await
            .expect_err("push to a closed port must fail");

        let failure = match err {
            PushError::Step(failure) => failure,
            other => panic!("unexpected error: {other}"),
        };
        assert_eq!(failure.step, PushStep::Publish);
        assert!(!failure.output().contains(token));

        let git_config = std::fs::read_to_string(ctx.project.join(".git/config")).unwrap();
        assert!(!git_config.contains(token));
        let remotes = ctx.git.remotes(&ctx.project).await.unwrap();
        assert_eq!(remotes[0].refs.push, url);

        // Prior steps are not rolled back
        assert_eq!(commit_count(&ctx.project), 1);
    }

    #[tokio::test]
    async fn test_explicit_push_url_bypasses_configured_pushurl() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        let target = ctx.bare_remote("target");
        let unreachable = ctx.temp_dir.path().join("unreachable.git");
        let unreachable = unreachable.to_string_lossy().to_string();

        git(&["init"], &ctx.project);
        git(&["add", "."], &ctx.project);
        git(&["commit", "-m", "seed"], &ctx.project);
        git(&["branch", "-M", "main"], &ctx.project);
        git(&["remote", "add", "origin", unreachable.as_str()], &ctx.project);
        git(&["config", "remote.origin.pushurl", unreachable.as_str()], &ctx.project);

        ctx.git
            .push_upstream(&ctx.project, "origin", "main", Some(target.as_str()), None)
            .await
            .expect("push to the explicit URL should succeed");

        // Only the explicit URL received the branch
        assert_eq!(
            git(&["rev-parse", "main"], Path::new(&target)),
            git(&["rev-parse", "HEAD"], &ctx.project)
        );
        assert!(!Path::new(&unreachable).exists());

        // Upstream is recorded against the remote, not the URL
        assert_eq!(
            git(&["rev-parse", "--abbrev-ref", "main@{upstream}"], &ctx.project),
            "origin/main"
        );
        let git_config = std::fs::read_to_string(ctx.project.join(".git/config")).unwrap();
        assert!(!git_config.contains(&target));
    }

    #[tokio::test]
    async fn test_missing_remote_repository_fails_at_publish() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        let missing = ctx.temp_dir.path().join("missing.git");

        let err = ctx
            .push(&missing.to_string_lossy())
            .await
            .expect_err("push to a missing repository must fail");

        match err {
            PushError::Step(failure) => {
                assert_eq!(failure.step, PushStep::Publish);
                assert_eq!(failure.diagnosis().title, "Not a Git Repository");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

// ─── Status Inspector Tests ──────────────────────────────────────────────────

mod status_tests {
    use super::*;

    #[tokio::test]
    async fn test_status_after_push_lists_origin() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        let remote = ctx.bare_remote("origin");
        ctx.push(&remote).await.unwrap();

        let status = project::inspect(&ctx.git, &ctx.folder()).await.unwrap();

        assert!(status.is_repo);
        assert!(status.has_remote);
        assert_eq!(status.remotes.len(), 1);
        assert_eq!(status.remotes[0].name, "origin");
        assert_eq!(status.remotes[0].refs.fetch, remote);
        assert_eq!(status.remotes[0].refs.push, remote);
    }

    #[tokio::test]
    async fn test_status_of_repo_without_remotes() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        git(&["init"], &ctx.project);

        let status = project::inspect(&ctx.git, &ctx.folder()).await.unwrap();

        assert!(status.is_repo);
        assert!(!status.has_remote);
        assert!(status.remotes.is_empty());
    }

    #[tokio::test]
    async fn test_status_ignores_parent_repository() {
        skip_if_no_git!();
        let ctx = PushTestContext::new();
        git(&["init"], ctx.temp_dir.path());
        git(
            &["remote", "add", "origin", "https://example.com/outer.git"],
            ctx.temp_dir.path(),
        );

        let status = project::inspect(&ctx.git, &ctx.folder()).await.unwrap();

        assert!(!status.is_repo);
        assert!(!status.has_remote);
        assert!(status.remotes.is_empty());
    }
}
