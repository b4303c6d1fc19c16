//! Basic block representation and procedure grouping.
//!
//! A [`BasicBlock`] is a maximal instruction run with a single entry and no
//! internal control-flow exit; boundaries occur only at the last instruction.
//! Blocks carry their statically resolved successor edges and a procedure-entry
//! marker. [`procedures`] builds the procedure view on top: each entry block
//! together with the blocks reachable from it without crossing another entry.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::disassembler::Instruction;

/// Options controlling block construction.
///
/// `resolve_push_targets` toggles the push-immediately-before-jump heuristic:
/// when a `JUMP`/`JUMPI` is directly preceded by a push instruction, the pushed
/// literal is taken as the statically known jump target. Disabling it leaves
/// every jump unresolved, yielding a more conservative but less connected graph.
#[derive(Debug, Clone, Copy)]
pub struct BlockOptions {
    /// Resolve jump targets from an immediately preceding push literal
    pub resolve_push_targets: bool,
}

impl Default for BlockOptions {
    fn default() -> Self {
        BlockOptions {
            resolve_push_targets: true,
        }
    }
}

/// A basic block: a run of instructions with a single entry and a single exit.
///
/// Invariants upheld by the builder:
/// - instructions are contiguous and in address order;
/// - only the last instruction may end control flow;
/// - concatenating all blocks in entry-address order reproduces the decoded
///   instruction stream exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicBlock {
    /// Address of the first instruction in the block
    pub entry_address: u32,
    /// The instructions of the block, in address order
    pub instructions: Vec<Instruction>,
    /// Address control falls through to, if the block does not end in a
    /// terminator or unconditional jump
    pub fallthrough_successor: Option<u32>,
    /// Statically resolved jump targets; empty when the target is not a
    /// push-literal (a reported limitation, not an error)
    pub jump_successors: BTreeSet<u32>,
    /// Marks the block as a procedure entry (address 0, or a shared jump target)
    pub is_procedure_entry: bool,
}

impl BasicBlock {
    /// Create an empty block starting at `entry_address`.
    #[must_use]
    pub fn new(entry_address: u32) -> Self {
        BasicBlock {
            entry_address,
            instructions: Vec::new(),
            fallthrough_successor: None,
            jump_successors: BTreeSet::new(),
            is_procedure_entry: false,
        }
    }

    /// The last instruction of the block, if any.
    #[must_use]
    pub fn terminator(&self) -> Option<&Instruction> {
        self.instructions.last()
    }

    /// All successor addresses: resolved jump targets plus the fallthrough.
    pub fn successors(&self) -> impl Iterator<Item = u32> + '_ {
        self.jump_successors
            .iter()
            .copied()
            .chain(self.fallthrough_successor)
    }

    /// Returns `true` if the block ends in a jump whose target could not be
    /// statically resolved.
    #[must_use]
    pub fn has_unresolved_jump(&self) -> bool {
        use crate::disassembler::FlowType;

        match self.terminator() {
            Some(instruction) => {
                matches!(
                    instruction.info.flow,
                    FlowType::ConditionalJump | FlowType::UnconditionalJump
                ) && self.jump_successors.is_empty()
            }
            None => false,
        }
    }
}

/// A procedure: an entry block plus the blocks reachable from it without
/// crossing another procedure entry.
///
/// Procedures are a view over the block graph, not separately stored data; the
/// borrowed blocks stay owned by the caller's slice.
#[derive(Debug)]
pub struct Procedure<'a> {
    /// Entry address of the procedure
    pub entry_address: u32,
    /// The procedure's blocks, in address order, starting with the entry block
    pub blocks: Vec<&'a BasicBlock>,
}

/// Group blocks into procedures.
///
/// Every block is assigned to exactly one procedure: entries claim their
/// reachable blocks in address order (first claim wins), and any block left
/// unclaimed - e.g. the target of an unresolved jump - becomes a singleton
/// procedure so output always covers the whole stream.
#[must_use]
pub fn procedures(blocks: &[BasicBlock]) -> Vec<Procedure<'_>> {
    let by_address: BTreeMap<u32, &BasicBlock> =
        blocks.iter().map(|b| (b.entry_address, b)).collect();

    let mut claimed: BTreeSet<u32> = BTreeSet::new();
    let mut result = Vec::new();

    for entry in blocks.iter().filter(|b| b.is_procedure_entry) {
        if claimed.contains(&entry.entry_address) {
            continue;
        }

        let mut members: BTreeSet<u32> = BTreeSet::new();
        let mut queue = VecDeque::from([entry.entry_address]);

        while let Some(address) = queue.pop_front() {
            let Some(block) = by_address.get(&address) else {
                continue; // bogus resolved target, nothing to group
            };
            if members.contains(&address) || claimed.contains(&address) {
                continue;
            }
            if block.is_procedure_entry && address != entry.entry_address {
                continue;
            }

            members.insert(address);
            queue.extend(block.successors());
        }

        claimed.extend(&members);
        result.push(Procedure {
            entry_address: entry.entry_address,
            blocks: members.iter().map(|a| by_address[a]).collect(),
        });
    }

    for block in blocks {
        if !claimed.contains(&block.entry_address) {
            result.push(Procedure {
                entry_address: block.entry_address,
                blocks: vec![block],
            });
        }
    }

    result.sort_by_key(|p| p.entry_address);
    result
}
