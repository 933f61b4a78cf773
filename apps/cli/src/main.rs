//! hrecord command-line tool

mod commands;
mod config;
mod logging;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

use crate::commands::DirectoryChannel;
use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "hrecord")]
#[command(about = "Inspect, re-serialize and hash health record documents", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./hrecord.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for the hrecord crates
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Indent output XML by this many spaces
    #[arg(long, global = true)]
    indent: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported thing types
    Types,

    /// Parse a document and print its type and summary
    Inspect {
        file: PathBuf,

        /// Parse as this thing type instead of routing on the root element
        #[arg(long)]
        type_id: Option<Uuid>,
    },

    /// Parse a document and write it back out
    Roundtrip {
        file: PathBuf,

        #[arg(long)]
        type_id: Option<Uuid>,

        /// Fail unless writing the output again gives identical bytes
        #[arg(long)]
        check: bool,
    },

    /// Compute the block hash of a file, or verify it
    Hash {
        file: PathBuf,

        #[arg(long)]
        block_size: Option<u32>,

        /// hash-info document to verify against
        #[arg(long)]
        verify: Option<PathBuf>,
    },

    /// Wrap a file as a blob element
    Blob {
        file: PathBuf,

        #[arg(long)]
        content_type: String,

        #[arg(long, default_value = "")]
        name: String,

        /// Directory for content above the inline threshold
        #[arg(long, default_value = "blobs")]
        store: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    if cli.indent.is_some() {
        config.output.indent = cli.indent;
    }

    logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    let settings = config.output.write_settings();
    let mut policy = config.blob.policy();

    let output = match cli.command {
        Commands::Types => commands::types(),
        Commands::Inspect { file, type_id } => commands::inspect(&file, type_id)?,
        Commands::Roundtrip {
            file,
            type_id,
            check,
        } => commands::roundtrip(&file, type_id, &settings, check)?,
        Commands::Hash {
            file,
            block_size,
            verify,
        } => {
            if let Some(block_size) = block_size {
                policy.block_size = block_size;
            }
            commands::hash(&file, &policy, verify.as_deref(), &settings)?
        }
        Commands::Blob {
            file,
            content_type,
            name,
            store,
        } => {
            let mut channel = DirectoryChannel::new(store);
            commands::blob(&file, &name, &content_type, &mut channel, &policy, &settings)?
        }
    };

    println!("{output}");
    Ok(())
}
