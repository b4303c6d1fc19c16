//! Textual output formatting.
//!
//! Renders the disassembler's procedure view as a columnar listing and the
//! decompiler's pseudocode as indented text. Both renderers write into plain
//! `String`s; callers decide where the text goes (stdout, a file, a test
//! assertion).
//!
//! Listing lines have a fixed column layout so listings diff cleanly:
//!
//! ```text
//! ; Procedure 0x0
//! [     0x0] | PUSH1                | ['0x5']                 | Place a literal item on the stack.
//! ```

use std::fmt::Write;

use crate::{
    decompiler::DecompiledBlock,
    disassembler::{procedures, BasicBlock, Instruction},
};

/// Options controlling listing output.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Append the opcode description column to each listing line
    pub show_description: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            show_description: true,
        }
    }
}

/// Render a block slice as a columnar disassembly listing.
///
/// Blocks are grouped under `; Procedure 0x..` headings via
/// [`procedures`]. Each instruction renders as right-aligned
/// address, mnemonic, operand list, and (optionally) the catalog description.
/// A block ending in a jump whose target could not be resolved gets an
/// explicit comment line, so the limitation is visible in the output instead
/// of silently producing a disconnected listing.
#[must_use]
pub fn render_disassembly(blocks: &[BasicBlock], options: &RenderOptions) -> String {
    let mut out = String::new();

    for procedure in procedures(blocks) {
        let _ = writeln!(out, "; Procedure 0x{:x}", procedure.entry_address);

        for block in &procedure.blocks {
            for instruction in &block.instructions {
                out.push_str(&render_instruction(instruction, options));
                out.push('\n');
            }
            if block.has_unresolved_jump() {
                out.push_str("; Unresolved jump target\n");
            }
        }

        out.push('\n');
    }

    out
}

fn render_instruction(instruction: &Instruction, options: &RenderOptions) -> String {
    let address = format!("0x{:x}", instruction.address);
    let arguments = match instruction.operand {
        Some(value) => format!("['0x{value:x}']"),
        None => "None".to_string(),
    };

    let mut line = format!(
        "[{address: >8}] | {mnemonic: <20} | {arguments: <75}",
        mnemonic = instruction.mnemonic(),
    );

    if options.show_description {
        line.push_str(" | ");
        line.push_str(instruction.info.description);
        if instruction.truncated {
            line.push_str(" (truncated operand)");
        }
    } else if instruction.truncated {
        line.push_str(" | (truncated operand)");
    }

    line
}

/// Render decompiled blocks as indented pseudocode.
///
/// Each block gets a `; Block 0x..` header; statement nesting renders as one
/// tab per indentation level.
#[must_use]
pub fn render_decompilation(blocks: &[DecompiledBlock]) -> String {
    let mut out = String::new();

    for block in blocks {
        let _ = writeln!(out, "; Block 0x{:x}", block.entry_address);

        for line in &block.lines {
            for _ in 0..line.indentation_level {
                out.push('\t');
            }
            out.push_str(&line.text);
            out.push('\n');
        }

        out.push('\n');
    }

    out
}
