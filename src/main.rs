use anyhow::Result;
use clap::{Parser, Subcommand};

use repopilot::config::Config;
use repopilot::credentials::Token;
use repopilot::git::{GitCli, GitError};
use repopilot::project::{self, PushError, PushRequest};
use repopilot::{env_vars, logging, rest};

/// Check that git is available before accepting work
fn check_git_available(config: &Config) -> Result<GitCli, GitError> {
    let git = GitCli::locate(&config.git.binary)?;
    tracing::debug!(binary = %git.binary().display(), "git available");
    Ok(git)
}

/// Print a helpful error message when git is missing
fn print_git_error(err: &GitError) {
    eprintln!("Error: {}", err);
    eprintln!();
    eprintln!("git is required to run repopilot.");
    eprintln!();
    eprintln!("Install git:");
    eprintln!("  macOS:         xcode-select --install  (or: brew install git)");
    eprintln!("  Ubuntu/Debian: sudo apt install git");
    eprintln!("  Fedora/RHEL:   sudo dnf install git");
    eprintln!("  Windows:       winget install Git.Git");
}

#[derive(Parser)]
#[command(name = "repopilot")]
#[command(about = "Local agent that initializes, commits and publishes project folders")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the local agent (default)
    Serve {
        /// Port to listen on (default: 3001)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show the git state of a folder
    Status {
        /// Folder to inspect
        folder: String,
    },

    /// Initialize, commit and push a folder
    Push {
        /// Folder to publish
        folder: String,

        /// Remote repository URL
        repo_url: String,

        /// Access token for https remotes
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Print the OpenAPI document
    Openapi {
        /// Emit YAML instead of JSON
        #[arg(long)]
        yaml: bool,
    },

    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the effective configuration to .repopilot/config.toml
    Init,
    /// List supported environment variables
    Env,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;

    let logging_handle = logging::init_logging(&config, cli.debug)?;

    match cli.command {
        None => cmd_serve(config).await?,
        Some(Commands::Serve { port }) => {
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_serve(config).await?;
        }
        Some(Commands::Status { folder }) => cmd_status(&config, &folder).await?,
        Some(Commands::Push {
            folder,
            repo_url,
            token,
        }) => cmd_push(&config, folder, repo_url, token).await?,
        Some(Commands::Openapi { yaml }) => {
            let spec = if yaml {
                rest::ApiDoc::yaml()?
            } else {
                rest::ApiDoc::json()?
            };
            println!("{}", spec);
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init => {
                let path = config.save()?;
                println!("Wrote {}", path.display());
            }
            ConfigAction::Env => cmd_env(),
        },
    }

    if let Some(log_path) = logging_handle.log_file_path {
        eprintln!("Session log: {}", log_path.display());
    }

    Ok(())
}

async fn cmd_serve(config: Config) -> Result<()> {
    let git = match check_git_available(&config) {
        Ok(git) => git,
        Err(err) => {
            print_git_error(&err);
            std::process::exit(1);
        }
    };

    println!("Repopilot Local Agent");
    println!("  Listening: http://{}", config.bind_address());
    println!("  Web UI:    {}", config.server.web_ui_url);
    println!("  Endpoints:");
    println!("    GET  /status                Health check");
    println!("    POST /api/folder/select     Open folder dialog");
    println!("    POST /api/project/status    Inspect a folder");
    println!("    POST /api/project/push      Init, commit and push");
    println!();

    let picker = std::sync::Arc::new(repopilot::picker::SystemFolderPicker::new(
        config.picker.prompt.clone(),
    ));
    let state = rest::ApiState::new(config, git, picker);

    rest::serve(state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutting down");
    })
    .await
}

async fn cmd_status(config: &Config, folder: &str) -> Result<()> {
    let git = GitCli::new(&config.git.binary);
    let status = project::inspect(&git, folder).await?;

    if !status.is_repo {
        println!("Not a git repository");
        return Ok(());
    }

    if status.remotes.is_empty() {
        println!("Git repository with no remotes");
        return Ok(());
    }

    println!("Git repository with {} remote(s):", status.remotes.len());
    for remote in &status.remotes {
        println!("  {}  fetch: {}", remote.name, remote.refs.fetch);
        println!("  {}  push:  {}", remote.name, remote.refs.push);
    }

    Ok(())
}

async fn cmd_push(
    config: &Config,
    folder: String,
    repo_url: String,
    token: Option<String>,
) -> Result<()> {
    let git = GitCli::new(&config.git.binary);
    let request = PushRequest {
        folder,
        repo_url,
        token: token.and_then(Token::new),
    };

    match project::push(&git, &config.git, &request).await {
        Ok(outcome) => {
            for record in &outcome.steps {
                println!("> [{}] {}", record.step, record.detail);
            }
            println!("{}", outcome.message);
            Ok(())
        }
        Err(PushError::Step(failure)) => {
            let diagnosis = failure.diagnosis();
            eprintln!("> [{}] failed", failure.step);
            eprintln!();
            eprintln!("{}", diagnosis.title);
            eprintln!("  {}", diagnosis.description);
            eprintln!("  {}", diagnosis.advice);
            eprintln!();
            eprintln!("git output:");
            eprintln!("{}", failure.output());
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_env() {
    for (category, vars) in env_vars::env_vars_by_category() {
        println!("{}", category.display_name());
        println!("{}", "─".repeat(60));
        for var in vars {
            println!("  {}", var.name);
            println!("      {}", var.description);
            if let Some(default) = var.default {
                println!("      default: {}", default);
            }
            if let Some(example) = var.example {
                println!("      example: {}", example);
            }
        }
        println!();
    }
}
