use clap::{Parser, Subcommand};

use crate::job::SourceMode;

#[derive(Parser, Debug)]
#[command(name = "jobshell")]
#[command(about = "Job hunting terminal: fetch, filter, bookmark and export job listings")]
#[command(version)]
pub struct Args {
    /// Job source to start in (mock or remote)
    #[arg(short = 's', long, global = true)]
    pub source: Option<SourceMode>,

    /// Base URL of the remote job feed
    #[arg(short = 'e', long, global = true)]
    pub endpoint: Option<String>,

    /// Seconds to wait for the remote feed before using mock data
    #[arg(short = 't', long = "timeout", value_name = "SECS", global = true)]
    pub fetch_timeout_secs: Option<u64>,

    /// Suppress non-essential output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve terminal sessions over TCP (JSON lines)
    Serve {
        /// Address to listen on
        #[arg(short = 'b', long)]
        bind: Option<String>,
    },
    /// Configure jobshell settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
