use anyhow::{Context, Result};

use super::{build_feed, load_config};
use crate::config::ResolveOptions;
use crate::paths;
use crate::repl::{Repl, ReplPaths};

pub async fn run_repl(options: &ResolveOptions) -> Result<()> {
    let config = load_config(options)?;
    let paths = ReplPaths {
        session_file: paths::session_file()?,
        export_dir: std::env::current_dir().context("Failed to read working directory")?,
    };

    let mut repl = Repl::new(build_feed(&config), paths);
    repl.run().await
}
