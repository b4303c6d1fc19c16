use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// evmscope - EVM bytecode disassembly and decompilation
#[derive(Debug, Parser)]
#[command(name = "evmscope", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Disassemble bytecode into a columnar listing grouped by procedure.
    Disasm {
        /// Path to the bytecode file (raw bytes or hex text).
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Omit the opcode description column.
        #[arg(long)]
        no_desc: bool,

        /// Disable static jump target resolution.
        #[arg(long)]
        no_opt: bool,

        /// Write the listing to a file instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Decompile bytecode into indented pseudocode.
    Decompile {
        /// Path to the bytecode file (raw bytes or hex text).
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Disable static jump target resolution.
        #[arg(long)]
        no_opt: bool,

        /// Write the pseudocode to a file instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}
