use std::path::Path;

use anyhow::Context;
use evmscope::{disassembler::BlockOptions, File};

/// Load bytecode input, accepting raw bytes and textual hex dumps.
pub fn load_bytecode(path: &Path) -> anyhow::Result<File> {
    let file = File::from_file(path)
        .with_context(|| format!("failed to load bytecode: {}", path.display()))?;

    log::debug!("loaded {} bytes from {}", file.len(), path.display());
    Ok(file)
}

/// Block construction options for the given optimization toggle.
pub fn block_options(no_opt: bool) -> BlockOptions {
    BlockOptions {
        resolve_push_targets: !no_opt,
    }
}

/// Write rendered text to `out` if given, otherwise to stdout.
pub fn emit(text: &str, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write output: {}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}
