use std::path::PathBuf;

use clap::Parser;

use super::styles;
use crate::config::Emit;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// loxfront - scan and parse Lox source, printing tokens or the syntax tree
#[derive(Debug, Parser)]
#[command(name = "loxfront", author, about, version, styles=styles::styles())]
pub struct LoxfrontArgs {
    /// Script to scan and parse. Starts an interactive prompt when omitted
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// What to print for each source
    #[arg(short, long, value_enum)]
    pub emit: Option<Emit>,

    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
