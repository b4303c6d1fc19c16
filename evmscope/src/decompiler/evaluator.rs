//! Symbolic stack evaluation of basic blocks.
//!
//! Each block is evaluated independently against its own symbolic stack:
//! pushes become literals, pure opcodes fold into expression trees, and
//! values a block consumes without producing are synthesized as numbered
//! stack inputs. Side-effecting opcodes emit pseudocode statement lines, and
//! values still sitting on the stack when the block ends are flushed as
//! expression lines so dead computations stay visible in the output.
//! Blocks share no state, so evaluation parallelizes across blocks; the
//! only sequential part is the indentation pre-pass, which follows the
//! conditional-jump structure of the block list.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{
    decompiler::SymbolicValue,
    disassembler::{BasicBlock, FlowType, Instruction, InstructionCategory},
};

/// One line of emitted pseudocode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PseudoLine {
    /// Address of the instruction that produced the line
    pub address: u32,
    /// Nesting depth; the renderer turns this into leading indentation
    pub indentation_level: usize,
    /// The statement text
    pub text: String,
}

/// The pseudocode emitted for one basic block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompiledBlock {
    /// Entry address of the source block
    pub entry_address: u32,
    /// Emitted statements, in address order
    pub lines: Vec<PseudoLine>,
}

/// Per-block symbolic stack.
///
/// Underflow never fails: consuming from an empty stack synthesizes a fresh
/// [`SymbolicValue::StackInput`], and `DUP`/`SWAP` reaching below the values
/// the block produced synthesize inputs at the stack bottom. Input indices
/// count synthesis order within the block.
#[derive(Default)]
struct Stack {
    values: Vec<SymbolicValue>,
    next_input: usize,
}

impl Stack {
    fn push(&mut self, value: SymbolicValue) {
        self.values.push(value);
    }

    fn pop(&mut self) -> SymbolicValue {
        match self.values.pop() {
            Some(value) => value,
            None => {
                let input = SymbolicValue::StackInput(self.next_input);
                self.next_input += 1;
                input
            }
        }
    }

    fn pop_many(&mut self, count: usize) -> Vec<SymbolicValue> {
        (0..count).map(|_| self.pop()).collect()
    }

    /// Grow the stack from the bottom until it holds at least `depth` values.
    fn ensure_depth(&mut self, depth: usize) {
        while self.values.len() < depth {
            self.values.insert(0, SymbolicValue::StackInput(self.next_input));
            self.next_input += 1;
        }
    }

    /// Duplicate the `n`-th value from the top (1-based) onto the top.
    fn dup(&mut self, n: usize) {
        self.ensure_depth(n);
        let value = self.values[self.values.len() - n].clone();
        self.values.push(value);
    }

    /// Exchange the top with the value `n` positions below it.
    fn swap(&mut self, n: usize) {
        self.ensure_depth(n + 1);
        let top = self.values.len() - 1;
        self.values.swap(top, top - n);
    }

    /// Remove and return the block-produced values still on the stack, bottom
    /// to top. Bare synthesized inputs are not residue; they stand for values
    /// the caller already owns.
    fn residue(&mut self) -> Vec<SymbolicValue> {
        self.values
            .drain(..)
            .filter(|value| !matches!(value, SymbolicValue::StackInput(_)))
            .collect()
    }
}

/// Evaluate the blocks of a stream into pseudocode.
///
/// A sequential pre-pass assigns each block a base indentation level: the
/// fallthrough block of a conditional jump nests one level deeper than its
/// predecessor, while jump targets and plain fallthroughs inherit their
/// predecessor's level. The first edge to reach a block wins; unreferenced
/// blocks start at level zero. Block evaluation itself runs in parallel.
#[must_use]
pub fn decompile_blocks(blocks: &[BasicBlock]) -> Vec<DecompiledBlock> {
    let indents = base_indents(blocks);

    blocks
        .par_iter()
        .zip(indents.par_iter())
        .map(|(block, &indent)| evaluate_block(block, indent))
        .collect()
}

fn base_indents(blocks: &[BasicBlock]) -> Vec<usize> {
    let mut pending: BTreeMap<u32, usize> = BTreeMap::new();
    let mut indents = Vec::with_capacity(blocks.len());

    for block in blocks {
        let base = pending.remove(&block.entry_address).unwrap_or(0);
        indents.push(base);

        for target in &block.jump_successors {
            pending.entry(*target).or_insert(base);
        }

        if let Some(next) = block.fallthrough_successor {
            let conditional = block
                .terminator()
                .is_some_and(|i| i.info.flow == FlowType::ConditionalJump);
            let level = if conditional { base + 1 } else { base };
            pending.entry(next).or_insert(level);
        }
    }

    indents
}

fn evaluate_block(block: &BasicBlock, indent: usize) -> DecompiledBlock {
    let mut stack = Stack::default();
    let mut lines = Vec::new();

    let mut emit = |address: u32, text: String| {
        lines.push(PseudoLine {
            address,
            indentation_level: indent,
            text,
        });
    };

    for instruction in &block.instructions {
        let statement = evaluate_instruction(instruction, &mut stack);

        // Values the block produced but never consumed would vanish with the
        // block; flush them ahead of the closing statement.
        if instruction.info.ends_block() {
            for value in stack.residue() {
                emit(instruction.address, value.to_string());
            }
        }

        if let Some(text) = statement {
            emit(instruction.address, text);
        }
    }

    // A trailing run without a terminator still flushes its leftovers.
    if let Some(last) = block.instructions.last() {
        for value in stack.residue() {
            emit(last.address, value.to_string());
        }
    }

    DecompiledBlock {
        entry_address: block.entry_address,
        lines,
    }
}

/// Apply one instruction to the symbolic stack, returning the statement text
/// it emits, if any.
fn evaluate_instruction(instruction: &Instruction, stack: &mut Stack) -> Option<String> {
    let info = instruction.info;

    match info.category {
        InstructionCategory::Push => {
            stack.push(SymbolicValue::Literal(instruction.operand.unwrap_or_default()));
            None
        }
        InstructionCategory::Dup => {
            stack.dup(info.stack_pops as usize);
            None
        }
        InstructionCategory::Swap => {
            stack.swap(info.stack_pops as usize - 1);
            None
        }
        // POP discards silently; the value it removes appears nowhere
        InstructionCategory::Stack => {
            stack.pop();
            None
        }
        _ => match info.flow {
            FlowType::ConditionalJump => {
                let _target = stack.pop();
                let condition = stack.pop();
                Some(format!("if {condition}:"))
            }
            FlowType::UnconditionalJump => {
                let target = stack.pop();
                Some(format!("jump({target})"))
            }
            FlowType::Terminate => {
                let operands = stack.pop_many(info.stack_pops as usize);
                Some(call_form(instruction, &operands))
            }
            FlowType::Sequential | FlowType::JumpTarget => {
                let operands = stack.pop_many(info.stack_pops as usize);

                if info.stack_pushes == 1 {
                    let value = match info.operator {
                        Some(operator) => SymbolicValue::Expression { operator, operands },
                        None => SymbolicValue::Opaque {
                            mnemonic: instruction.mnemonic(),
                            operands,
                        },
                    };
                    stack.push(value);
                    None
                } else if info.stack_pops > 0 {
                    Some(call_form(instruction, &operands))
                } else {
                    // JUMPDEST and other stack-neutral markers emit nothing
                    None
                }
            }
        },
    }
}

fn call_form(instruction: &Instruction, operands: &[SymbolicValue]) -> String {
    let rendered: Vec<String> = operands.iter().map(ToString::to_string).collect();
    format!("{}({})", instruction.mnemonic(), rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::{decode_blocks, BlockOptions};

    fn decompile(code: &[u8]) -> Vec<DecompiledBlock> {
        decompile_blocks(&decode_blocks(code, &BlockOptions::default()))
    }

    #[test]
    fn arithmetic_folds_into_expression() {
        // push1 5, push1 3, add, push1 0, mstore, stop
        let decompiled = decompile(&[0x60, 0x05, 0x60, 0x03, 0x01, 0x60, 0x00, 0x52, 0x00]);

        assert_eq!(decompiled.len(), 1);
        let texts: Vec<&str> = decompiled[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["MSTORE(0x0, 0x3 + 0x5)", "STOP()"]);
    }

    #[test]
    fn dead_expression_flushed_at_terminator() {
        // push1 5, push1 3, add, stop - the sum is never consumed, but the
        // flush keeps it visible ahead of the terminator
        let decompiled = decompile(&[0x60, 0x05, 0x60, 0x03, 0x01, 0x00]);

        assert_eq!(decompiled.len(), 1);
        let texts: Vec<&str> = decompiled[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["0x3 + 0x5", "STOP()"]);
    }

    #[test]
    fn underflow_synthesizes_inputs() {
        // add with an empty stack, then stop
        let decompiled = decompile(&[0x01, 0x00]);

        // the flushed sum is built from synthesized inputs
        let texts: Vec<&str> = decompiled[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["arg_0 + arg_1", "STOP()"]);
    }

    #[test]
    fn conditional_jump_emits_if() {
        // jumpdest, push1 0, jumpi, stop
        let decompiled = decompile(&[0x5b, 0x60, 0x00, 0x57, 0x00]);

        assert_eq!(decompiled.len(), 2);
        assert_eq!(decompiled[0].lines.len(), 1);
        // target is the pushed literal; the condition comes from the caller
        assert_eq!(decompiled[0].lines[0].text, "if arg_0:");
        assert_eq!(decompiled[0].lines[0].indentation_level, 0);

        // fallthrough of the conditional nests one level deeper
        assert_eq!(decompiled[1].lines[0].text, "STOP()");
        assert_eq!(decompiled[1].lines[0].indentation_level, 1);
    }

    #[test]
    fn unconditional_jump_statement() {
        // push1 8, jump
        let decompiled = decompile(&[0x60, 0x08, 0x56]);

        assert_eq!(decompiled[0].lines[0].text, "jump(0x8)");
    }

    #[test]
    fn computed_jump_renders_expression_target() {
        // push1 0, calldataload, jump
        let decompiled = decompile(&[0x60, 0x00, 0x35, 0x56]);

        assert_eq!(decompiled[0].lines[0].text, "jump(CALLDATALOAD(0x0))");
    }

    #[test]
    fn dup_duplicates_structurally() {
        // push1 2, dup1, mul, push1 0, mstore, stop
        let decompiled = decompile(&[0x60, 0x02, 0x80, 0x02, 0x60, 0x00, 0x52, 0x00]);

        let texts: Vec<&str> = decompiled[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["MSTORE(0x0, 0x2 * 0x2)", "STOP()"]);
    }

    #[test]
    fn swap_exchanges_operands() {
        // push1 1, push1 2, swap1, sub, push1 0, mstore, stop
        // swap makes the subtraction 0x1 - 0x2 instead of 0x2 - 0x1
        let decompiled = decompile(&[0x60, 0x01, 0x60, 0x02, 0x90, 0x03, 0x60, 0x00, 0x52, 0x00]);

        let texts: Vec<&str> = decompiled[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["MSTORE(0x0, 0x1 - 0x2)", "STOP()"]);
    }

    #[test]
    fn dup_below_produced_values_synthesizes_input() {
        // dup2 with only one produced value reaches into the caller's stack
        // push1 5, dup2, add, push1 0, mstore, stop
        let decompiled = decompile(&[0x60, 0x05, 0x81, 0x01, 0x60, 0x00, 0x52, 0x00]);

        let texts: Vec<&str> = decompiled[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["MSTORE(0x0, arg_0 + 0x5)", "STOP()"]);
    }

    #[test]
    fn pop_is_silent() {
        // push1 1, pop, stop
        let decompiled = decompile(&[0x60, 0x01, 0x50, 0x00]);

        assert_eq!(decompiled[0].lines.len(), 1);
        assert_eq!(decompiled[0].lines[0].text, "STOP()");
    }

    #[test]
    fn terminators_render_operands() {
        // push1 32, push1 0, return
        let decompiled = decompile(&[0x60, 0x20, 0x60, 0x00, 0xf3]);

        assert_eq!(decompiled[0].lines[0].text, "RETURN(0x0, 0x20)");
    }

    #[test]
    fn unknown_opcode_statement() {
        let decompiled = decompile(&[0x0c]);

        assert_eq!(decompiled[0].lines[0].text, "UNK_0c()");
    }

    #[test]
    fn truncated_push_still_evaluates() {
        // push4 with two operand bytes, then nothing
        let decompiled = decompile(&[0x63, 0x12, 0x34]);

        // the clamped literal is flushed when the trailing run ends
        assert_eq!(decompiled.len(), 1);
        assert_eq!(decompiled[0].lines.len(), 1);
        assert_eq!(decompiled[0].lines[0].text, "0x1234");
    }

    #[test]
    fn jump_target_keeps_indentation() {
        // 0: push1 6, push1 1, jumpi | 5: stop | 6: jumpdest, stop
        let decompiled = decompile(&[0x60, 0x06, 0x60, 0x01, 0x57, 0x00, 0x5b, 0x00]);

        assert_eq!(decompiled.len(), 3);
        // fallthrough block indents, jump-target block does not
        assert_eq!(decompiled[1].lines[0].indentation_level, 1);
        assert_eq!(decompiled[2].lines[0].indentation_level, 0);
    }

    #[test]
    fn empty_input_decompiles_to_nothing() {
        assert!(decompile(&[]).is_empty());
    }
}
