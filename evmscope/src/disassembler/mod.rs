//! EVM bytecode disassembly.
//!
//! This module turns raw bytecode into structured form in two layers. The
//! decoder performs a total linear sweep: every byte of input is covered by
//! exactly one [`Instruction`], unknown opcodes included. On top of that, the
//! block builder partitions the instruction sequence into [`BasicBlock`]s,
//! resolves statically known jump targets, and groups blocks into
//! [`Procedure`]s for presentation.
//!
//! # Key Components
//!
//! - [`decode_stream`] - Linear sweep over a byte slice
//! - [`decode_blocks`] - Basic block partition with successor edges
//! - [`procedures`] - Procedure grouping over a block slice
//! - [`opcode_info`] - Catalog lookup for a raw opcode byte
//!
//! # Usage Examples
//!
//! ```rust
//! use evmscope::disassembler::{decode_blocks, procedures, BlockOptions};
//!
//! let code = [0x60, 0x05, 0x60, 0x03, 0x01, 0x00];
//! let blocks = decode_blocks(&code, &BlockOptions::default());
//! let procedures = procedures(&blocks);
//! assert_eq!(procedures.len(), 1);
//! assert_eq!(procedures[0].entry_address, 0);
//! ```

mod block;
mod decoder;
mod instruction;
mod instructions;

pub use block::{procedures, BasicBlock, BlockOptions, Procedure};
pub use decoder::{decode_blocks, decode_instruction, decode_stream};
pub use instruction::{
    FlowType, Instruction, InstructionCategory, OpCode, Operator, StackBehavior,
};
pub use instructions::{opcode_info, INSTRUCTIONS, UNASSIGNED};
