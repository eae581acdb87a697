//! Repopilot - local agent that initializes, commits and publishes project
//! folders to a git remote.
//!
//! The binary wraps this library in a small CLI and HTTP server.

pub mod config;
pub mod credentials;
pub mod diagnosis;
pub mod env_vars;
pub mod git;
pub mod logging;
pub mod picker;
pub mod project;
pub mod rest;
