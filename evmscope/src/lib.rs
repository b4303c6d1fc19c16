#![doc(html_no_source)]
#![deny(missing_docs)]

//! # evmscope
//!
//! A cross-platform framework for disassembling and decompiling Ethereum Virtual Machine
//! bytecode. Built in pure Rust, `evmscope` decodes raw contract bytecode into an instruction
//! stream, partitions it into basic blocks with resolved control-flow edges, and reconstructs
//! readable pseudocode through symbolic stack evaluation.
//!
//! ## Features
//!
//! - **📦 Efficient input handling** - Memory-mapped file access with automatic hex-dump detection
//! - **🔍 Total decoding** - Every byte sequence decodes; unknown opcodes and truncated push
//!   operands become annotated instructions, never errors
//! - **⚡ Control flow recovery** - Basic block partitioning, static jump target resolution, and
//!   procedure grouping
//! - **🧮 Symbolic decompilation** - Per-block stack evaluation folding pure opcodes into
//!   expression trees
//! - **🛡️ Memory safe** - Built in Rust with structured error handling at the input boundary
//!
//! ## Quick Start
//!
//! Add `evmscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! evmscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust
//! use evmscope::prelude::*;
//!
//! let file = File::from_hex("0x6005600301600052")?;
//! let blocks = decode_blocks(file.data(), &BlockOptions::default());
//! println!("{}", render_disassembly(&blocks, &RenderOptions::default()));
//! # Ok::<(), evmscope::Error>(())
//! ```
//!
//! ### Decompilation
//!
//! ```rust
//! use evmscope::decompiler::decompile_blocks;
//! use evmscope::disassembler::{decode_blocks, BlockOptions};
//!
//! let code = [0x60, 0x05, 0x60, 0x03, 0x01, 0x60, 0x00, 0x52, 0x00];
//! let blocks = decode_blocks(&code, &BlockOptions::default());
//! let decompiled = decompile_blocks(&blocks);
//! assert_eq!(decompiled[0].lines[0].text, "MSTORE(0x0, 0x3 + 0x5)");
//! ```
//!
//! ## Architecture
//!
//! The pipeline has three stages, each usable on its own:
//!
//! 1. [`crate::file`] - Input normalization (disk files, memory buffers, hex dumps)
//! 2. [`crate::disassembler`] - Linear-sweep decoding, block partitioning, procedures
//! 3. [`crate::decompiler`] - Symbolic stack evaluation into pseudocode
//!
//! [`crate::render`] formats the output of the last two stages as text.

#[macro_use]
mod error;

pub mod decompiler;
pub mod disassembler;
pub mod file;
pub mod prelude;
pub mod render;

/// Represents the result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;
pub use file::{parser::Parser, File};
