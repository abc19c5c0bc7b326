//! # Fitout CLI Application
//!
//! Line-oriented quoting shell. Each command stands in for one user action
//! (adding a row, picking a finish, typing a dimension) and prints the
//! resulting row and running totals.
//!
//! ## Configuration
//!
//! - `--catalog <PATH>` / `FITOUT_CATALOG` - JSON catalog (built-in if unset)
//! - `--out-dir <DIR>` / `FITOUT_EXPORT_DIR` - where `export` writes
//! - `--customer <NAME>` - recorded on the quote
//! - `--log-filter <FILTER>` / `RUST_LOG` - tracing filter (default `warn`)

mod commands;
mod shell;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quote_core::{Catalog, Quote};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::shell::{Outcome, Shell};

#[derive(Debug, Parser)]
#[command(name = "quote_cli", version, about = "Fitout quoting shell")]
struct Args {
    /// JSON catalog file
    #[arg(long, env = "FITOUT_CATALOG")]
    catalog: Option<PathBuf>,

    /// Directory for exported summaries
    #[arg(long, env = "FITOUT_EXPORT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Customer name for the quote
    #[arg(long, default_value = "")]
    customer: String,

    /// Log filter directive
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log_filter: String,
}

fn init_logging(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_filter);

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path).with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::builtin().clone(),
    };
    let quote = Quote::new(catalog, args.customer);
    info!(quote_id = %quote.meta.id, out_dir = %args.out_dir.display(), "session started");

    let mut shell = Shell::new(quote, args.out_dir);

    println!("Fitout - Wardrobe & Kitchen Quotes");
    println!("==================================");
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("Error: {}", e);
                continue;
            }
        };

        match shell.execute(command) {
            Ok(Outcome::Print(text)) => println!("{}", text),
            Ok(Outcome::Quit) => break,
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    info!(grand_total = shell.quote().grand_total(), "session ended");
    Ok(())
}
