mod app;
mod commands;

use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })
    .expect("failed to set Ctrl+C handler");

    let cli = Cli::parse();

    // Show evmscope info+ on stderr; --verbose enables debug; RUST_LOG overrides
    let level = if cli.global.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_module("evmscope", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    match &cli.command {
        Command::Disasm {
            path,
            no_desc,
            no_opt,
            out,
        } => commands::disasm::run(path, *no_desc, *no_opt, out.as_deref()),
        Command::Decompile { path, no_opt, out } => {
            commands::decompile::run(path, *no_opt, out.as_deref())
        }
    }
}
