use std::path::Path;

use evmscope::{
    disassembler::decode_blocks,
    render::{render_disassembly, RenderOptions},
};

use crate::commands::common::{block_options, emit, load_bytecode};

pub fn run(path: &Path, no_desc: bool, no_opt: bool, out: Option<&Path>) -> anyhow::Result<()> {
    let file = load_bytecode(path)?;

    let blocks = decode_blocks(file.data(), &block_options(no_opt));
    log::debug!("partitioned into {} basic blocks", blocks.len());

    let listing = render_disassembly(
        &blocks,
        &RenderOptions {
            show_description: !no_desc,
        },
    );

    emit(&listing, out)
}
