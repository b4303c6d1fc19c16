//! Pseudocode reconstruction from basic blocks.
//!
//! The decompiler layers a symbolic stack evaluation over the disassembler's
//! block graph: each [`crate::disassembler::BasicBlock`] is replayed against a
//! symbolic stack, folding pure opcodes into expression trees and emitting a
//! statement line for every side effect. The result reads as structured
//! pseudocode rather than a flat instruction listing.
//!
//! # Key Components
//!
//! - [`decompile_blocks`] - Evaluate a block slice into pseudocode
//! - [`SymbolicValue`] - Symbolic stack value (literal, input, expression)
//! - [`DecompiledBlock`] / [`PseudoLine`] - The emitted pseudocode structure
//!
//! # Usage Examples
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

mod evaluator;
mod value;

pub use evaluator::{decompile_blocks, DecompiledBlock, PseudoLine};
pub use value::SymbolicValue;
