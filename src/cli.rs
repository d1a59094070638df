//! Command-line interface for putty-reg.
//!
//! Parses arguments and runs the requested subcommand. Reports go to stdout;
//! diagnostics go through the log bridge.

use crate::analyzer::PuttyAnalyzer;
use crate::config::Config;
use crate::debug;
use crate::store::LocalArtifactStore;
use anyhow::Context;
use clap::{Parser, Subcommand};
use putty_reg_parser::{Session, parse, render_full_dump, render_summary};
use std::path::{Path, PathBuf};

/// putty-reg - extract saved sessions from PuTTY registry exports
#[derive(Parser)]
#[command(name = "putty-reg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/putty-reg/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_level_arg)]
    pub log_level: Option<log::LevelFilter>,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full enrichment on each file and print the result envelope as JSON
    Analyze {
        /// Registry export files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for report artifacts (overrides the config)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Skip the extension and marker checks
        #[arg(short, long)]
        force: bool,
    },
    /// Print the Markdown summary of host sessions
    Summary {
        /// Registry export file
        file: PathBuf,
    },
    /// Print the full plaintext report
    Dump {
        /// Registry export file
        file: PathBuf,
    },
    /// Print the parsed sessions as JSON
    Sessions {
        /// Registry export file
        file: PathBuf,
    },
}

/// Parse arguments, set up logging and run the subcommand.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let env_level = std::env::var("RUST_LOG").ok();
    let level = debug::resolve_level(cli.log_level, env_level.as_deref(), &config.log_level);
    debug::init_log_bridge(level, cli.verbose);

    match cli.command {
        Commands::Analyze {
            files,
            output_dir,
            force,
        } => {
            if output_dir.is_some() {
                config.output_dir = output_dir;
            }
            analyze(config, &files, force)
        }
        Commands::Summary { file } => {
            print!("{}", render_summary(&load_sessions(&file)?));
            Ok(())
        }
        Commands::Dump { file } => {
            print!("{}", render_full_dump(&load_sessions(&file)?));
            Ok(())
        }
        Commands::Sessions { file } => {
            println!("{}", serde_json::to_string_pretty(&load_sessions(&file)?)?);
            Ok(())
        }
    }
}

fn parse_level_arg(value: &str) -> Result<log::LevelFilter, String> {
    debug::parse_level(value).ok_or_else(|| format!("unknown log level '{}'", value))
}

fn analyze(config: Config, files: &[PathBuf], force: bool) -> anyhow::Result<()> {
    let store = LocalArtifactStore::new(config.artifact_dir());
    let analyzer = PuttyAnalyzer::new(config, store)?;
    log::info!("Writing artifacts to {:?}", analyzer.store().root());

    for path in files {
        let bytes = std::fs::read(path).with_context(|| format!("failed to read {:?}", path))?;
        let object_id = path.display().to_string();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| object_id.clone());

        if !force && !analyzer.should_process(&file_name, &bytes) {
            log::info!("{}: not a PuTTY registry export, skipping", file_name);
            continue;
        }

        match analyzer.run(&object_id, &file_name, &bytes) {
            Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            None => eprintln!("putty-reg: {}: no result (see log)", object_id),
        }
    }

    Ok(())
}

fn load_sessions(path: &Path) -> anyhow::Result<Vec<Session>> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {:?}", path))?;
    let text = crate::prefilter::decode_text(&bytes)
        .with_context(|| format!("{:?} is not a text file", path))?;
    Ok(parse(&text)?)
}
