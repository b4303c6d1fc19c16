//! Static EVM instruction catalog.
//!
//! A fixed table of 256 [`OpCode`] descriptors indexed directly by the opcode
//! byte, built once at compile time as immutable shared data. Every byte value
//! resolves to exactly one descriptor; bytes with no assigned instruction share
//! the synthetic unknown descriptor, which terminates basic blocks so that
//! partitioning stays well-defined over data disguised as code.
//!
//! The regular opcode families (`PUSH1`..`PUSH32`, `DUP1`..`DUP16`,
//! `SWAP1`..`SWAP16`, `LOG0`..`LOG4`) are generated from their byte ranges
//! instead of being written out entry by entry.

use crate::disassembler::instruction::{FlowType, InstructionCategory, OpCode, Operator};

/// Descriptor shared by all unassigned opcode bytes.
///
/// The empty mnemonic marks the entry as unassigned; [`crate::disassembler::Instruction`]
/// renders it as `UNK_xx`. Classified as [`FlowType::Terminate`] so an unknown
/// byte ends its basic block.
pub const UNASSIGNED: OpCode = op(
    "",
    0,
    0,
    None,
    FlowType::Terminate,
    InstructionCategory::Unknown,
    "Unknown opcode.",
);

/// The complete opcode catalog, indexed by opcode byte.
pub static INSTRUCTIONS: [OpCode; 256] = build_catalog();

/// Look up the descriptor for an opcode byte.
///
/// Total over the full byte range; unassigned bytes return the shared
/// [`UNASSIGNED`] descriptor.
///
/// # Examples
///
/// ```rust
/// use evmscope::disassembler::opcode_info;
///
/// assert_eq!(opcode_info(0x01).mnemonic, "ADD");
/// assert_eq!(opcode_info(0x60).mnemonic, "PUSH1");
/// assert!(opcode_info(0x0c).is_unassigned());
/// ```
#[must_use]
pub fn opcode_info(byte: u8) -> &'static OpCode {
    &INSTRUCTIONS[byte as usize]
}

const PUSH_MNEMONICS: [&str; 32] = [
    "PUSH1", "PUSH2", "PUSH3", "PUSH4", "PUSH5", "PUSH6", "PUSH7", "PUSH8", "PUSH9", "PUSH10",
    "PUSH11", "PUSH12", "PUSH13", "PUSH14", "PUSH15", "PUSH16", "PUSH17", "PUSH18", "PUSH19",
    "PUSH20", "PUSH21", "PUSH22", "PUSH23", "PUSH24", "PUSH25", "PUSH26", "PUSH27", "PUSH28",
    "PUSH29", "PUSH30", "PUSH31", "PUSH32",
];

const DUP_MNEMONICS: [&str; 16] = [
    "DUP1", "DUP2", "DUP3", "DUP4", "DUP5", "DUP6", "DUP7", "DUP8", "DUP9", "DUP10", "DUP11",
    "DUP12", "DUP13", "DUP14", "DUP15", "DUP16",
];

const SWAP_MNEMONICS: [&str; 16] = [
    "SWAP1", "SWAP2", "SWAP3", "SWAP4", "SWAP5", "SWAP6", "SWAP7", "SWAP8", "SWAP9", "SWAP10",
    "SWAP11", "SWAP12", "SWAP13", "SWAP14", "SWAP15", "SWAP16",
];

const LOG_MNEMONICS: [&str; 5] = ["LOG0", "LOG1", "LOG2", "LOG3", "LOG4"];

const fn op(
    mnemonic: &'static str,
    pops: u8,
    pushes: u8,
    operator: Option<Operator>,
    flow: FlowType,
    category: InstructionCategory,
    description: &'static str,
) -> OpCode {
    OpCode {
        mnemonic,
        stack_pops: pops,
        stack_pushes: pushes,
        operand_bytes: 0,
        operator,
        flow,
        category,
        description,
    }
}

#[allow(clippy::too_many_lines)]
const fn build_catalog() -> [OpCode; 256] {
    use FlowType::{ConditionalJump, JumpTarget, Sequential, Terminate, UnconditionalJump};
    use InstructionCategory::{
        Arithmetic, Bitwise, BlockInfo, Comparison, Crypto, Dup, Environment, Flow, Log, Memory,
        Push, Stack, Storage, Swap, System,
    };

    let mut t = [UNASSIGNED; 256];

    // Stop and arithmetic operations
    t[0x00] = op("STOP", 0, 0, None, Terminate, Flow, "Halts execution.");
    t[0x01] = op("ADD", 2, 1, Some(Operator::Add), Sequential, Arithmetic, "Addition operation.");
    t[0x02] = op("MUL", 2, 1, Some(Operator::Mul), Sequential, Arithmetic, "Multiplication operation.");
    t[0x03] = op("SUB", 2, 1, Some(Operator::Sub), Sequential, Arithmetic, "Subtraction operation.");
    t[0x04] = op("DIV", 2, 1, Some(Operator::Div), Sequential, Arithmetic, "Integer division operation.");
    t[0x05] = op("SDIV", 2, 1, Some(Operator::SDiv), Sequential, Arithmetic, "Signed integer division operation.");
    t[0x06] = op("MOD", 2, 1, Some(Operator::Mod), Sequential, Arithmetic, "Modulo remainder operation.");
    t[0x07] = op("SMOD", 2, 1, Some(Operator::SMod), Sequential, Arithmetic, "Signed modulo remainder operation.");
    t[0x08] = op("ADDMOD", 3, 1, Some(Operator::AddMod), Sequential, Arithmetic, "Modulo addition operation.");
    t[0x09] = op("MULMOD", 3, 1, Some(Operator::MulMod), Sequential, Arithmetic, "Modulo multiplication operation.");
    t[0x0a] = op("EXP", 2, 1, Some(Operator::Exp), Sequential, Arithmetic, "Exponential operation.");
    t[0x0b] = op("SIGNEXTEND", 2, 1, None, Sequential, Arithmetic, "Extend length of two's complement signed integer.");

    // Comparison and bitwise logic operations
    t[0x10] = op("LT", 2, 1, Some(Operator::Lt), Sequential, Comparison, "Less-than comparison.");
    t[0x11] = op("GT", 2, 1, Some(Operator::Gt), Sequential, Comparison, "Greater-than comparison.");
    t[0x12] = op("SLT", 2, 1, Some(Operator::SLt), Sequential, Comparison, "Signed less-than comparison.");
    t[0x13] = op("SGT", 2, 1, Some(Operator::SGt), Sequential, Comparison, "Signed greater-than comparison.");
    t[0x14] = op("EQ", 2, 1, Some(Operator::Eq), Sequential, Comparison, "Equality comparison.");
    t[0x15] = op("ISZERO", 1, 1, Some(Operator::IsZero), Sequential, Comparison, "Simple not operator.");
    t[0x16] = op("AND", 2, 1, Some(Operator::And), Sequential, Bitwise, "Bitwise AND operation.");
    t[0x17] = op("OR", 2, 1, Some(Operator::Or), Sequential, Bitwise, "Bitwise OR operation.");
    t[0x18] = op("XOR", 2, 1, Some(Operator::Xor), Sequential, Bitwise, "Bitwise XOR operation.");
    t[0x19] = op("NOT", 1, 1, Some(Operator::Not), Sequential, Bitwise, "Bitwise NOT operation.");
    t[0x1a] = op("BYTE", 2, 1, None, Sequential, Bitwise, "Retrieve single byte from word.");

    // SHA3
    t[0x20] = op("SHA3", 2, 1, None, Sequential, Crypto, "Compute Keccak-256 hash.");

    // Environmental information
    t[0x30] = op("ADDRESS", 0, 1, None, Sequential, Environment, "Get address of currently executing account.");
    t[0x31] = op("BALANCE", 1, 1, None, Sequential, Environment, "Get balance of the given account.");
    t[0x32] = op("ORIGIN", 0, 1, None, Sequential, Environment, "Get execution origination address.");
    t[0x33] = op("CALLER", 0, 1, None, Sequential, Environment, "Get caller address.");
    t[0x34] = op("CALLVALUE", 0, 1, None, Sequential, Environment, "Get deposited value by the instruction/transaction responsible for this execution.");
    t[0x35] = op("CALLDATALOAD", 1, 1, None, Sequential, Environment, "Get input data of current environment.");
    t[0x36] = op("CALLDATASIZE", 0, 1, None, Sequential, Environment, "Get size of input data in current environment.");
    t[0x37] = op("CALLDATACOPY", 3, 0, None, Sequential, Environment, "Copy input data in current environment to memory.");
    t[0x38] = op("CODESIZE", 0, 1, None, Sequential, Environment, "Get size of code running in current environment.");
    t[0x39] = op("CODECOPY", 3, 0, None, Sequential, Environment, "Copy code running in current environment to memory.");
    t[0x3a] = op("GASPRICE", 0, 1, None, Sequential, Environment, "Get price of gas in current environment.");
    t[0x3b] = op("EXTCODESIZE", 1, 1, None, Sequential, Environment, "Get size of an account's code.");
    t[0x3c] = op("EXTCODECOPY", 4, 0, None, Sequential, Environment, "Copy an account's code to memory.");
    t[0x3d] = op("RETURNDATASIZE", 0, 1, None, Sequential, Environment, "Get size of output data from the previous call.");
    t[0x3e] = op("RETURNDATACOPY", 3, 0, None, Sequential, Environment, "Copy output data from the previous call to memory.");

    // Block information
    t[0x40] = op("BLOCKHASH", 1, 1, None, Sequential, BlockInfo, "Get the hash of one of the 256 most recent complete blocks.");
    t[0x41] = op("COINBASE", 0, 1, None, Sequential, BlockInfo, "Get the block's beneficiary address.");
    t[0x42] = op("TIMESTAMP", 0, 1, None, Sequential, BlockInfo, "Get the block's timestamp.");
    t[0x43] = op("NUMBER", 0, 1, None, Sequential, BlockInfo, "Get the block's number.");
    t[0x44] = op("DIFFICULTY", 0, 1, None, Sequential, BlockInfo, "Get the block's difficulty.");
    t[0x45] = op("GASLIMIT", 0, 1, None, Sequential, BlockInfo, "Get the block's gas limit.");

    // Stack, memory, storage and flow operations
    t[0x50] = op("POP", 1, 0, None, Sequential, Stack, "Remove item from stack.");
    t[0x51] = op("MLOAD", 1, 1, None, Sequential, Memory, "Load word from memory.");
    t[0x52] = op("MSTORE", 2, 0, None, Sequential, Memory, "Save word to memory.");
    t[0x53] = op("MSTORE8", 2, 0, None, Sequential, Memory, "Save byte to memory.");
    t[0x54] = op("SLOAD", 1, 1, None, Sequential, Storage, "Load word from storage.");
    t[0x55] = op("SSTORE", 2, 0, None, Sequential, Storage, "Save word to storage.");
    t[0x56] = op("JUMP", 1, 0, None, UnconditionalJump, Flow, "Alter the program counter.");
    t[0x57] = op("JUMPI", 2, 0, None, ConditionalJump, Flow, "Alter the program counter if condition was met.");
    t[0x58] = op("PC", 0, 1, None, Sequential, Flow, "Get the value of the program counter prior to the increment.");
    t[0x59] = op("MSIZE", 0, 1, None, Sequential, Memory, "Get the size of active memory in bytes.");
    t[0x5a] = op("GAS", 0, 1, None, Sequential, Environment, "Get the amount of available gas.");
    t[0x5b] = op("JUMPDEST", 0, 0, None, JumpTarget, Flow, "Mark a valid destination for jumps.");

    // 0x60 - 0x7f: push operations
    let mut i = 0;
    while i < 32 {
        t[0x60 + i] = OpCode {
            mnemonic: PUSH_MNEMONICS[i],
            stack_pops: 0,
            stack_pushes: 1,
            operand_bytes: (i + 1) as u8,
            operator: None,
            flow: Sequential,
            category: Push,
            description: "Place a literal item on the stack.",
        };
        i += 1;
    }

    // 0x80 - 0x8f: duplication operations
    let mut i = 0;
    while i < 16 {
        let depth = (i + 1) as u8;
        t[0x80 + i] = op(
            DUP_MNEMONICS[i],
            depth,
            depth + 1,
            None,
            Sequential,
            Dup,
            "Duplicate a stack item.",
        );
        i += 1;
    }

    // 0x90 - 0x9f: exchange operations
    let mut i = 0;
    while i < 16 {
        let depth = (i + 2) as u8;
        t[0x90 + i] = op(
            SWAP_MNEMONICS[i],
            depth,
            depth,
            None,
            Sequential,
            Swap,
            "Exchange two stack items.",
        );
        i += 1;
    }

    // 0xa0 - 0xa4: logging operations
    let mut i = 0;
    while i < 5 {
        let topics = i as u8;
        t[0xa0 + i] = op(
            LOG_MNEMONICS[i],
            topics + 2,
            0,
            None,
            Sequential,
            Log,
            "Append log record.",
        );
        i += 1;
    }

    // System operations
    t[0xf0] = op("CREATE", 3, 1, None, Sequential, System, "Create a new contract account with associated code.");
    t[0xf1] = op("CALL", 7, 1, None, Sequential, System, "Message-call into an account.");
    t[0xf2] = op("CALLCODE", 7, 1, None, Sequential, System, "Message-call into this account with alternative account's code.");
    t[0xf3] = op("RETURN", 2, 0, None, Terminate, System, "Halt execution returning output data.");
    t[0xf4] = op("DELEGATECALL", 6, 1, None, Sequential, System, "Message-call into this account with an alternative account's code, persisting sender and value.");
    t[0xfa] = op("STATICCALL", 6, 1, None, Sequential, System, "Static message-call into an account.");
    t[0xfd] = op("REVERT", 2, 0, None, Terminate, System, "Halt execution reverting state changes, returning output data.");
    t[0xff] = op("SUICIDE", 1, 0, None, Terminate, System, "Halt execution and register account for deletion.");

    t
}
