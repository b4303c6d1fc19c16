//! # evmscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and functions
//! from the evmscope library. Import this module to get quick access to the essential pieces
//! of the bytecode analysis pipeline.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all evmscope operations
pub use crate::Error;

/// The result type used throughout evmscope
pub use crate::Result;

// ================================================================================================
// Input Handling
// ================================================================================================

/// Bytecode input facade and low-level parsing cursor
pub use crate::{File, Parser};

// ================================================================================================
// Disassembly
// ================================================================================================

/// Decoding entry points
pub use crate::disassembler::{decode_blocks, decode_instruction, decode_stream};

/// Block graph and procedure view
pub use crate::disassembler::{procedures, BasicBlock, BlockOptions, Procedure};

/// Instruction representation
pub use crate::disassembler::{
    opcode_info, FlowType, Instruction, InstructionCategory, OpCode, Operator,
};

// ================================================================================================
// Decompilation
// ================================================================================================

/// Symbolic evaluation entry point and result types
pub use crate::decompiler::{decompile_blocks, DecompiledBlock, PseudoLine, SymbolicValue};

// ================================================================================================
// Output Formatting
// ================================================================================================

/// Text renderers for listings and pseudocode
pub use crate::render::{render_decompilation, render_disassembly, RenderOptions};
