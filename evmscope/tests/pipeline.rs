//! End-to-end tests over the full analysis pipeline: input normalization,
//! linear-sweep decoding, block partitioning, procedure grouping, symbolic
//! evaluation, and text rendering.

use evmscope::prelude::*;

/// Every byte of input is covered by exactly one instruction, with no gaps or
/// overlaps, for arbitrary data.
#[test]
fn linear_sweep_total_coverage() {
    // pseudo-random but deterministic byte soup
    let mut data = Vec::with_capacity(4096);
    let mut state = 0x1234_5678_u32;
    for _ in 0..4096 {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        data.push((state >> 16) as u8);
    }

    let instructions = decode_stream(&data);

    let mut expected = 0u32;
    for instruction in &instructions {
        assert_eq!(instruction.address, expected);
        expected = instruction.next_address();
    }
    assert_eq!(expected as usize, data.len());
}

/// Concatenating the blocks in address order reproduces the instruction
/// stream exactly, for arbitrary data.
#[test]
fn block_partition_totality() {
    let mut data = Vec::with_capacity(2048);
    let mut state = 0xdead_beef_u32;
    for _ in 0..2048 {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        data.push((state >> 16) as u8);
    }

    let stream = decode_stream(&data);
    let blocks = decode_blocks(&data, &BlockOptions::default());

    let concatenated: Vec<Instruction> = blocks
        .iter()
        .flat_map(|b| b.instructions.iter().cloned())
        .collect();
    assert_eq!(concatenated, stream);

    // only the last instruction of a block may end it
    for block in &blocks {
        for instruction in &block.instructions[..block.instructions.len() - 1] {
            assert!(!instruction.info.ends_block());
        }
    }
}

/// Decoding is a pure function of the input bytes.
#[test]
fn pipeline_is_deterministic() {
    let code = [
        0x60, 0x0a, 0x60, 0x00, 0x57, 0x5b, 0x60, 0x01, 0x60, 0x02, 0x01, 0x0c, 0x00, 0x5b, 0x00,
    ];

    let first = decode_blocks(&code, &BlockOptions::default());
    let second = decode_blocks(&code, &BlockOptions::default());
    assert_eq!(first, second);

    let rendered_first = render_decompilation(&decompile_blocks(&first));
    let rendered_second = render_decompilation(&decompile_blocks(&second));
    assert_eq!(rendered_first, rendered_second);
}

/// A straight-line arithmetic fragment: one block, one procedure, folded
/// expression in the pseudocode.
#[test]
fn straight_line_fragment() {
    // push1 5, push1 3, add, stop
    let code = [0x60, 0x05, 0x60, 0x03, 0x01, 0x00];

    let blocks = decode_blocks(&code, &BlockOptions::default());
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].instructions.len(), 4);
    assert!(blocks[0].is_procedure_entry);

    let grouped = procedures(&blocks);
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped[0].entry_address, 0);

    let listing = render_disassembly(&blocks, &RenderOptions::default());
    assert!(listing.starts_with("; Procedure 0x0\n"));
    assert!(listing.contains("PUSH1"));
    assert!(listing.contains("ADD"));

    // the folded sum is visible even though nothing consumes it
    let decompiled = decompile_blocks(&blocks);
    let texts: Vec<&str> = decompiled[0].lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["0x3 + 0x5", "STOP()"]);
}

/// A conditional self-loop: resolved backward edge, nested fallthrough.
#[test]
fn conditional_loop_fragment() {
    // jumpdest, push1 0, jumpi, stop
    let code = [0x5b, 0x60, 0x00, 0x57, 0x00];

    let blocks = decode_blocks(&code, &BlockOptions::default());
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].jump_successors.contains(&0));
    assert_eq!(blocks[0].fallthrough_successor, Some(4));

    let rendered = render_decompilation(&decompile_blocks(&blocks));
    assert!(rendered.contains("if arg_0:"));
    assert!(rendered.contains("\tSTOP()"));
}

/// Empty input flows through every stage without panicking and renders to
/// empty text.
#[test]
fn empty_input() {
    let blocks = decode_blocks(&[], &BlockOptions::default());
    assert!(blocks.is_empty());
    assert!(procedures(&blocks).is_empty());
    assert!(decompile_blocks(&blocks).is_empty());
    assert!(render_disassembly(&blocks, &RenderOptions::default()).is_empty());
}

/// Unknown opcodes decode, terminate their block, and render as `UNK_xx`.
#[test]
fn unknown_opcode_handling() {
    let code = [0x60, 0x01, 0x0c, 0x5b, 0x00];

    let blocks = decode_blocks(&code, &BlockOptions::default());
    assert_eq!(blocks.len(), 2);

    let listing = render_disassembly(&blocks, &RenderOptions::default());
    assert!(listing.contains("UNK_0c"));
    assert!(listing.contains("Unknown opcode."));
}

/// A push operand running past the end of the stream clamps instead of
/// failing, and the pipeline still renders.
#[test]
fn truncated_push_handling() {
    // push32 with only three operand bytes present
    let code = [0x7f, 0xaa, 0xbb, 0xcc];

    let instructions = decode_stream(&code);
    assert_eq!(instructions.len(), 1);
    assert!(instructions[0].truncated);
    assert_eq!(instructions[0].size, 4);

    let blocks = decode_blocks(&code, &BlockOptions::default());
    let listing = render_disassembly(&blocks, &RenderOptions::default());
    assert!(listing.contains("['0xaabbcc']"));
    assert!(listing.contains("(truncated operand)"));
}

/// Push literals round-trip through decoding: the operand value equals the
/// big-endian interpretation of the encoded bytes.
#[test]
fn push_operand_round_trip() {
    for width in 1u8..=32 {
        let mut code = vec![0x5f + width];
        for byte in 0..width {
            code.push(0x10 + byte);
        }
        code.push(0x00);

        let instructions = decode_stream(&code);
        assert_eq!(instructions.len(), 2, "width {width}");

        let operand = instructions[0].operand.expect("push has an operand");
        let mut expected = [0u8; 32];
        expected[32 - width as usize..].copy_from_slice(&code[1..=width as usize]);
        assert_eq!(operand, primitive_types::U256::from_big_endian(&expected));
    }
}

/// Disabling jump resolution leaves the graph conservative but the output
/// complete.
#[test]
fn resolution_toggle() {
    let code = [0x5b, 0x60, 0x00, 0x57, 0x00];
    let options = BlockOptions {
        resolve_push_targets: false,
    };

    let blocks = decode_blocks(&code, &options);
    assert!(blocks[0].jump_successors.is_empty());
    assert!(blocks[0].has_unresolved_jump());

    let listing = render_disassembly(&blocks, &RenderOptions::default());
    assert!(listing.contains("; Unresolved jump target"));
}

/// Hex input (with prefix and whitespace) and raw bytes produce identical
/// results.
#[test]
fn hex_and_raw_inputs_agree() {
    let raw = File::from_mem(vec![0x60, 0x05, 0x60, 0x03, 0x01, 0x00]);
    let hex = File::from_hex("0x60 05 60 03 01 00").expect("valid hex");

    assert_eq!(raw.data(), hex.data());

    let from_raw = decode_blocks(raw.data(), &BlockOptions::default());
    let from_hex = decode_blocks(hex.data(), &BlockOptions::default());
    assert_eq!(from_raw, from_hex);
}

/// A dispatcher-shaped contract: shared handler grouped under its own
/// procedure heading exactly once.
#[test]
fn dispatcher_procedures() {
    // 0: push1 8, jump | 3: jumpdest, push1 8, jump | 7: stop | 8: jumpdest, stop
    let code = [0x60, 0x08, 0x56, 0x5b, 0x60, 0x08, 0x56, 0x00, 0x5b, 0x00];

    let blocks = decode_blocks(&code, &BlockOptions::default());
    let grouped = procedures(&blocks);

    let total: usize = grouped.iter().map(|p| p.blocks.len()).sum();
    assert_eq!(total, blocks.len());

    let listing = render_disassembly(&blocks, &RenderOptions::default());
    assert!(listing.contains("; Procedure 0x0\n"));
    assert!(listing.contains("; Procedure 0x8\n"));
    assert_eq!(listing.matches("JUMPDEST").count(), 2);
}
