use std::path::Path;

use evmscope::{
    decompiler::decompile_blocks, disassembler::decode_blocks, render::render_decompilation,
};

use crate::commands::common::{block_options, emit, load_bytecode};

pub fn run(path: &Path, no_opt: bool, out: Option<&Path>) -> anyhow::Result<()> {
    let file = load_bytecode(path)?;

    let blocks = decode_blocks(file.data(), &block_options(no_opt));
    let decompiled = decompile_blocks(&blocks);
    log::debug!("decompiled {} basic blocks", decompiled.len());

    emit(&render_decompilation(&decompiled), out)
}
