use anyhow::Result;
use clap::Parser;

use jobshell::cli::commands::{configure, repl, serve};
use jobshell::cli::{Args, Command, init_tracing};
use jobshell::config::ResolveOptions;
use jobshell::output::{self, OutputConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig::from_env(args.quiet));

    let mut options = ResolveOptions {
        source: args.source,
        endpoint: args.endpoint,
        fetch_timeout_secs: args.fetch_timeout_secs,
        bind: None,
    };

    match args.command {
        Some(Command::Serve { bind }) => {
            init_tracing("jobshell=info");
            options.bind = bind;
            serve::run_serve(&options).await?;
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        None => {
            init_tracing("jobshell=warn");
            repl::run_repl(&options).await?;
        }
    }

    Ok(())
}
