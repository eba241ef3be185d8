//! # jobshell - Job Hunting Terminal
//!
//! `jobshell` is a command-driven terminal for browsing job listings. A small
//! line-command language fetches internships, new-grad and full-time roles,
//! narrows them with filters and searches, bookmarks the interesting ones and
//! exports them as JSON or CSV.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive terminal
//! jobshell
//!
//! # Serve sessions over TCP, one JSON object per line
//! jobshell serve --bind 127.0.0.1:5000
//!
//! # Use a remote job feed, falling back to built-in listings on failure
//! jobshell --source remote --endpoint https://jobs.example.com/api
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/jobshell/config.toml`:
//!
//! ```toml
//! [jobshell]
//! source = "remote"
//! endpoint = "https://jobs.example.com/api"
//! fetch_timeout_secs = 15
//! bind = "127.0.0.1:5000"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and CLI override resolution.
pub mod config;

/// JSON and CSV rendering of exported data.
pub mod export;

/// File system utilities.
pub mod fs;

/// Job records and job sources.
pub mod job;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration and saved sessions.
pub mod paths;

/// Interactive terminal front end.
pub mod repl;

/// TCP transport.
pub mod server;

/// Per-connection session state.
pub mod session;

/// The command interpreter.
pub mod shell;

/// Terminal UI components (spinner, colors).
pub mod ui;
