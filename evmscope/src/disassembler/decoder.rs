//! EVM bytecode decoding and basic block construction.
//!
//! This module provides the low-level functions that turn an opaque byte
//! sequence into structured data: [`decode_instruction`] for a single opcode,
//! [`decode_stream`] for a full linear sweep, and [`decode_blocks`] for the
//! partition into control-flow basic blocks with statically resolved successor
//! edges.
//!
//! Decoding is total: no byte sequence of any length, including adversarial or
//! corrupted input, fails to decode. Unknown opcode bytes map to the synthetic
//! unknown descriptor (a block terminator), and push operands that run past the
//! end of the stream are clamped to a shorter literal and flagged.
//!
//! # Example: Decoding a Stream of Instructions
//!
//! ```rust
//! use evmscope::disassembler::decode_stream;
//!
//! let code = [0x60, 0x05, 0x60, 0x03, 0x01, 0x00]; // push1 5, push1 3, add, stop
//! let instructions = decode_stream(&code);
//! assert_eq!(instructions.len(), 4);
//! assert_eq!(instructions[2].mnemonic(), "ADD");
//! ```
//!
//! # Example: Building Basic Blocks
//!
//! ```rust
//! use evmscope::disassembler::{decode_blocks, BlockOptions};
//!
//! let code = [0x5b, 0x60, 0x00, 0x57, 0x00]; // jumpdest, push1 0, jumpi, stop
//! let blocks = decode_blocks(&code, &BlockOptions::default());
//! assert_eq!(blocks.len(), 2);
//! assert!(blocks[0].jump_successors.contains(&0));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use primitive_types::U256;

use crate::{
    disassembler::{opcode_info, BasicBlock, BlockOptions, FlowType, Instruction},
    file::parser::Parser,
    Result,
};

/// Decode a single instruction at the parser's current position.
///
/// Looks up the descriptor for the opcode byte and, for push-class opcodes,
/// consumes the declared number of inline operand bytes as a big-endian
/// literal. Operand reads are clamped to the end of the stream; a clamped
/// instruction carries `truncated == true` and a correspondingly smaller
/// `size`. Within bounds, decoding cannot fail for any byte value.
///
/// # Arguments
///
/// * `parser` - A parser positioned at the start of an instruction
/// * `address` - The byte offset of the instruction within the stream
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] only if the parser is already
/// exhausted (there is no instruction to decode).
pub fn decode_instruction(parser: &mut Parser, address: u32) -> Result<Instruction> {
    let opcode = parser.read_u8()?;
    let info = opcode_info(opcode);

    let (operand, operand_size, truncated) = if info.operand_bytes > 0 {
        let (value, read) = parser.read_operand(info.operand_bytes);
        (Some(value), read, read < info.operand_bytes)
    } else {
        (None, 0, false)
    };

    Ok(Instruction {
        address,
        opcode,
        info,
        operand,
        size: 1 + operand_size,
        truncated,
    })
}

/// Decode a complete byte stream into its instruction sequence.
///
/// Performs a linear sweep from address 0: every address in `[0, len)` is
/// covered by exactly one instruction, with no gaps or overlaps. The sweep
/// never fails; unknown bytes and truncated push data decode to annotated
/// instructions.
///
/// # Examples
///
/// ```rust
/// use evmscope::disassembler::decode_stream;
///
/// let instructions = decode_stream(&[0x60, 0xff, 0x00]);
/// assert_eq!(instructions.len(), 2);
/// assert_eq!(instructions[0].next_address(), instructions[1].address);
/// ```
#[must_use]
pub fn decode_stream(data: &[u8]) -> Vec<Instruction> {
    let mut parser = Parser::new(data);
    let mut instructions = Vec::new();

    while parser.has_more_data() {
        #[allow(clippy::cast_possible_truncation)]
        let address = parser.pos() as u32;

        // read_u8 cannot fail while has_more_data holds
        match decode_instruction(&mut parser, address) {
            Ok(instruction) => instructions.push(instruction),
            Err(_) => break,
        }
    }

    instructions
}

/// Decode a byte stream and partition it into basic blocks.
///
/// A block starts at address 0, immediately after a block-ending instruction,
/// or at a `JUMPDEST`. A block ends at an instruction that terminates
/// execution, jumps, or conditionally jumps; only a conditional jump or a
/// plain fallthrough into a `JUMPDEST` produces a fallthrough edge.
///
/// Jump targets are resolved with a single heuristic: a `JUMP`/`JUMPI` whose
/// immediately preceding instruction is a push takes that literal as its
/// target. Anything fed from computed stack values stays unresolved - the
/// block reports an empty successor set, which is a documented limitation
/// rather than an error. The heuristic can be disabled entirely through
/// [`BlockOptions`].
///
/// Procedure entries are marked on the address-0 block and on every
/// jump-target block referenced by more than one distinct source block, so
/// shared blocks group under their own heading instead of being duplicated
/// under every caller.
///
/// # Examples
///
/// ```rust
/// use evmscope::disassembler::{decode_blocks, BlockOptions};
///
/// let blocks = decode_blocks(&[0x60, 0x05, 0x60, 0x03, 0x01, 0x00], &BlockOptions::default());
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].instructions.len(), 4);
/// ```
#[must_use]
pub fn decode_blocks(data: &[u8], options: &BlockOptions) -> Vec<BasicBlock> {
    let mut blocks = partition(decode_stream(data), data.len(), options);
    mark_procedure_entries(&mut blocks);
    blocks
}

/// Partition a decoded instruction sequence into basic blocks.
fn partition(
    instructions: Vec<Instruction>,
    stream_len: usize,
    options: &BlockOptions,
) -> Vec<BasicBlock> {
    let mut blocks: Vec<BasicBlock> = Vec::new();
    let mut current: Option<BasicBlock> = None;

    for instruction in instructions {
        if instruction.info.flow == FlowType::JumpTarget {
            // Fallthrough into a jump destination closes the open block.
            if let Some(mut block) = current.take() {
                block.fallthrough_successor = Some(instruction.address);
                blocks.push(block);
            }
        }

        let mut block = current
            .take()
            .unwrap_or_else(|| BasicBlock::new(instruction.address));

        if instruction.info.ends_block() {
            let flow = instruction.info.flow;
            let next_address = instruction.next_address();

            if options.resolve_push_targets
                && matches!(
                    flow,
                    FlowType::ConditionalJump | FlowType::UnconditionalJump
                )
            {
                if let Some(previous) = block.instructions.last() {
                    if let Some(target) = previous.operand {
                        if target <= U256::from(u32::MAX) {
                            block.jump_successors.insert(target.as_u32());
                        }
                    }
                }
            }

            block.instructions.push(instruction);

            if flow == FlowType::ConditionalJump && (next_address as usize) < stream_len {
                block.fallthrough_successor = Some(next_address);
            }

            blocks.push(block);
        } else {
            block.instructions.push(instruction);
            current = Some(block);
        }
    }

    // Stream ended without a terminator; the trailing run still forms a block.
    if let Some(block) = current.take() {
        blocks.push(block);
    }

    blocks
}

/// Mark procedure entry blocks: address 0, and jump-target blocks referenced
/// from more than one distinct source block.
fn mark_procedure_entries(blocks: &mut [BasicBlock]) {
    let mut jump_targets: BTreeSet<u32> = BTreeSet::new();
    let mut sources: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();

    for block in blocks.iter() {
        jump_targets.extend(&block.jump_successors);
        for successor in block.successors() {
            sources
                .entry(successor)
                .or_default()
                .insert(block.entry_address);
        }
    }

    for block in blocks.iter_mut() {
        let shared = jump_targets.contains(&block.entry_address)
            && sources
                .get(&block.entry_address)
                .is_some_and(|s| s.len() > 1);

        block.is_procedure_entry = block.entry_address == 0 || shared;
    }
}
