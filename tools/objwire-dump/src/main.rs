// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! objwire-dump - Inspect objwire streams
//!
//! Usage:
//!   objwire-dump types
//!   objwire-dump decode capture.bin
//!   objwire-dump --max-depth 8 decode capture.bin
//!   objwire-dump sample capture.bin

mod dump;

use clap::{Parser, Subcommand};
use objwire::{DecodeLimits, Registry};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "objwire-dump")]
#[command(about = "List objwire types and dump binary object streams")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Maximum nesting depth accepted while decoding (default from OBJWIRE_MAX_DEPTH or 64)
    #[arg(long, global = true)]
    max_depth: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered types with fingerprints and fields
    Types,

    /// Decode a file of concatenated envelopes
    Decode {
        /// Input file
        input: PathBuf,
    },

    /// Write a sample stream (one identifier, one slice metadata record)
    Sample {
        /// Output file
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = args.log_level.parse().unwrap_or(tracing::Level::WARN);
    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    objwire_records::init()?;
    let registry = Registry::global();
    debug!("{} type(s) registered", registry.len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Types => dump::list_types(registry, &mut out)?,
        Command::Decode { input } => {
            if !input.exists() {
                anyhow::bail!("Input file not found: {}", input.display());
            }
            let mut limits = DecodeLimits::from_env();
            if let Some(depth) = args.max_depth {
                limits = limits.max_depth(depth);
            }
            dump::decode_file(&input, registry, limits, &mut out)?;
        }
        Command::Sample { output } => dump::write_sample(&output, registry)?,
    }

    out.flush()?;
    Ok(())
}
