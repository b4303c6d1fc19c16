//! EVM instruction representation and decoding metadata.
//!
//! This module defines the type system for decoded EVM instructions: the static
//! [`OpCode`] descriptor looked up from the catalog, the per-occurrence
//! [`Instruction`] record produced by the decoder, and the supporting enums for
//! control flow behavior, functional grouping, and pure-operator equivalents.
//!
//! # Key Components
//!
//! - [`Instruction`] - A decoded instruction at a concrete byte address
//! - [`OpCode`] - Static descriptor: mnemonic, stack effect, operand width, tags
//! - [`FlowType`] - How an instruction affects control flow
//! - [`InstructionCategory`] - Functional instruction grouping
//! - [`Operator`] - Pure operator equivalent used for expression reconstruction
//! - [`StackBehavior`] - Net stack effect of an instruction
//!
//! # Usage Examples
//!
//! ```rust
//! use evmscope::disassembler::{opcode_info, FlowType};
//!
//! let jumpi = opcode_info(0x57);
//! assert_eq!(jumpi.mnemonic, "JUMPI");
//! assert_eq!(jumpi.flow, FlowType::ConditionalJump);
//! assert_eq!(jumpi.stack_pops, 2);
//! ```

use std::borrow::Cow;

use primitive_types::U256;

/// How an instruction affects control flow.
///
/// Exactly one classification applies to each opcode. Block partitioning keys
/// off this tag: `Terminate`, `UnconditionalJump` and `ConditionalJump` end the
/// current basic block, while `JumpTarget` (the `JUMPDEST` marker) starts a new
/// one. Unassigned opcode bytes classify as `Terminate` so that block
/// partitioning stays well-defined on data disguised as code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowType {
    /// Execution continues with the next instruction
    Sequential,
    /// Execution may transfer to a jump target or fall through (`JUMPI`)
    ConditionalJump,
    /// Execution always transfers to a jump target (`JUMP`)
    UnconditionalJump,
    /// Execution halts (`STOP`, `RETURN`, `REVERT`, `SUICIDE`, unknown opcodes)
    Terminate,
    /// Valid destination marker for jumps (`JUMPDEST`); otherwise sequential
    JumpTarget,
}

/// Functional grouping of instructions, following the section layout of the
/// EVM instruction set listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum InstructionCategory {
    /// Arithmetic operations (`ADD`, `MUL`, `EXP`, ...)
    Arithmetic,
    /// Comparison operations (`LT`, `EQ`, `ISZERO`, ...)
    Comparison,
    /// Bitwise logic (`AND`, `OR`, `XOR`, `NOT`, `BYTE`)
    Bitwise,
    /// Hashing (`SHA3`)
    Crypto,
    /// Execution environment queries (`CALLER`, `CALLDATALOAD`, ...)
    Environment,
    /// Block header queries (`TIMESTAMP`, `NUMBER`, ...)
    BlockInfo,
    /// Pure stack manipulation (`POP`)
    Stack,
    /// Memory access (`MLOAD`, `MSTORE`, `MSIZE`, ...)
    Memory,
    /// Persistent storage access (`SLOAD`, `SSTORE`)
    Storage,
    /// Control flow (`JUMP`, `JUMPI`, `PC`, `JUMPDEST`, `STOP`)
    Flow,
    /// Inline literal pushes (`PUSH1`..`PUSH32`)
    Push,
    /// Stack duplication (`DUP1`..`DUP16`)
    Dup,
    /// Stack exchange (`SWAP1`..`SWAP16`)
    Swap,
    /// Event logging (`LOG0`..`LOG4`)
    Log,
    /// Contract-level operations (`CREATE`, `CALL`, `RETURN`, ...)
    System,
    /// Unassigned opcode byte
    Unknown,
}

/// Pure operator equivalent of an opcode, used by the stack evaluator to build
/// expression trees instead of opaque call forms.
///
/// This is the closed-enum rendering of the catalog's optional per-opcode
/// equivalent function: each variant names a side-effect-free operation whose
/// result shape is a single stack value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Operator {
    /// Addition
    #[strum(serialize = "+")]
    Add,
    /// Multiplication
    #[strum(serialize = "*")]
    Mul,
    /// Subtraction
    #[strum(serialize = "-")]
    Sub,
    /// Integer division
    #[strum(serialize = "//")]
    Div,
    /// Signed integer division
    #[strum(serialize = "//")]
    SDiv,
    /// Modulo
    #[strum(serialize = "%")]
    Mod,
    /// Signed modulo
    #[strum(serialize = "%")]
    SMod,
    /// Modular addition, `(a + b) % c`
    #[strum(serialize = "ADDMOD")]
    AddMod,
    /// Modular multiplication, `(a * b) % c`
    #[strum(serialize = "MULMOD")]
    MulMod,
    /// Exponentiation
    #[strum(serialize = "**")]
    Exp,
    /// Less-than comparison
    #[strum(serialize = "<")]
    Lt,
    /// Greater-than comparison
    #[strum(serialize = ">")]
    Gt,
    /// Signed less-than comparison
    #[strum(serialize = "<")]
    SLt,
    /// Signed greater-than comparison
    #[strum(serialize = ">")]
    SGt,
    /// Equality comparison
    #[strum(serialize = "==")]
    Eq,
    /// Logical negation
    #[strum(serialize = "!")]
    IsZero,
    /// Bitwise AND
    #[strum(serialize = "&")]
    And,
    /// Bitwise OR
    #[strum(serialize = "|")]
    Or,
    /// Bitwise XOR
    #[strum(serialize = "^")]
    Xor,
    /// Bitwise NOT
    #[strum(serialize = "~")]
    Not,
}

impl Operator {
    /// Number of operands the operator consumes.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Operator::IsZero | Operator::Not => 1,
            Operator::AddMod | Operator::MulMod => 3,
            _ => 2,
        }
    }

    /// Returns `true` if the operator renders between its two operands.
    #[must_use]
    pub const fn is_infix(&self) -> bool {
        self.arity() == 2
    }
}

/// Stack effect of an instruction.
///
/// `pops` and `pushes` mirror the catalog's removed/added counts; `net_effect`
/// is the signed difference, useful for quick stack-depth bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackBehavior {
    /// Number of values consumed from the stack
    pub pops: u8,
    /// Number of values produced onto the stack
    pub pushes: u8,
    /// Net change to the stack depth
    pub net_effect: i8,
}

/// Static descriptor for one opcode byte.
///
/// Every byte value 0..=255 resolves to exactly one descriptor via
/// [`crate::disassembler::opcode_info`]. Unassigned bytes share the synthetic
/// unknown descriptor, whose empty mnemonic the [`Instruction`] renders as
/// `UNK_xx`; it participates in control flow as a terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpCode {
    /// Symbolic name; empty for unassigned bytes
    pub mnemonic: &'static str,
    /// Number of stack values consumed
    pub stack_pops: u8,
    /// Number of stack values produced
    pub stack_pushes: u8,
    /// Number of inline operand bytes (non-zero only for push-class opcodes)
    pub operand_bytes: u8,
    /// Pure operator equivalent, if the opcode has one
    pub operator: Option<Operator>,
    /// Control flow classification
    pub flow: FlowType,
    /// Functional grouping
    pub category: InstructionCategory,
    /// Human-readable description
    pub description: &'static str,
}

impl OpCode {
    /// Returns `true` if this is the descriptor of an unassigned byte.
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        self.mnemonic.is_empty()
    }

    /// Returns `true` for push-class opcodes (inline operand bytes follow).
    #[must_use]
    pub const fn is_push(&self) -> bool {
        self.operand_bytes > 0
    }

    /// Returns `true` if the opcode ends a basic block.
    #[must_use]
    pub const fn ends_block(&self) -> bool {
        matches!(
            self.flow,
            FlowType::Terminate | FlowType::UnconditionalJump | FlowType::ConditionalJump
        )
    }

    /// Stack effect of this opcode.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn stack_behavior(&self) -> StackBehavior {
        StackBehavior {
            pops: self.stack_pops,
            pushes: self.stack_pushes,
            net_effect: self.stack_pushes as i8 - self.stack_pops as i8,
        }
    }
}

/// A decoded instruction at a concrete byte address.
///
/// Instructions are immutable once decoded. The decoder produces them during its
/// linear sweep and hands ownership to the block builder, which reslices them
/// into [`crate::disassembler::BasicBlock`]s without copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Byte offset of the instruction within the bytecode stream
    pub address: u32,
    /// Raw opcode byte
    pub opcode: u8,
    /// Catalog descriptor for the opcode byte
    pub info: &'static OpCode,
    /// Decoded big-endian inline operand, present iff the opcode is push-class
    pub operand: Option<U256>,
    /// Total encoded size: one opcode byte plus the operand bytes actually present
    pub size: u8,
    /// Set when a push operand ran past the end of the stream and was clamped
    pub truncated: bool,
}

impl Instruction {
    /// Rendered mnemonic: the catalog name, or `UNK_xx` for unassigned bytes.
    #[must_use]
    pub fn mnemonic(&self) -> Cow<'static, str> {
        if self.info.is_unassigned() {
            Cow::Owned(format!("UNK_{:02x}", self.opcode))
        } else {
            Cow::Borrowed(self.info.mnemonic)
        }
    }

    /// Address of the instruction immediately following this one.
    #[must_use]
    pub fn next_address(&self) -> u32 {
        self.address + u32::from(self.size)
    }

    /// Returns `true` for push-class instructions.
    #[must_use]
    pub fn is_push(&self) -> bool {
        self.info.is_push()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::opcode_info;

    #[test]
    fn operator_arity() {
        assert_eq!(Operator::Add.arity(), 2);
        assert_eq!(Operator::IsZero.arity(), 1);
        assert_eq!(Operator::AddMod.arity(), 3);
        assert!(Operator::Lt.is_infix());
        assert!(!Operator::Not.is_infix());
    }

    #[test]
    fn operator_symbols() {
        assert_eq!(Operator::Add.to_string(), "+");
        assert_eq!(Operator::Exp.to_string(), "**");
        assert_eq!(Operator::Eq.to_string(), "==");
        assert_eq!(Operator::MulMod.to_string(), "MULMOD");
    }

    #[test]
    fn stack_behavior_net_effect() {
        let add = opcode_info(0x01);
        let behavior = add.stack_behavior();
        assert_eq!(behavior.pops, 2);
        assert_eq!(behavior.pushes, 1);
        assert_eq!(behavior.net_effect, -1);

        let dup1 = opcode_info(0x80);
        assert_eq!(dup1.stack_behavior().net_effect, 1);
    }

    #[test]
    fn unknown_mnemonic_rendering() {
        let instruction = Instruction {
            address: 0,
            opcode: 0x0c,
            info: opcode_info(0x0c),
            operand: None,
            size: 1,
            truncated: false,
        };

        assert!(instruction.info.is_unassigned());
        assert_eq!(instruction.mnemonic(), "UNK_0c");
    }
}
