use anyhow::{Context, Result};
use clap::Parser;
use func_cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    func_cli::init_tracing(args.verbose)?;

    let cwd = std::env::current_dir().context("failed to read current directory")?;
    if args.watch {
        func_cli::watch(&args, &cwd)
    } else {
        func_cli::run(&args, &cwd).map(|_| ())
    }
}
