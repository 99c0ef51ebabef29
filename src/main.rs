use clap::Parser;

use pushdown::cli::{self, args::PushdownArgs};
use pushdown::diagnostics::print_error;

fn main() {
    let args = PushdownArgs::parse();

    // Warnings on stderr unless --json; -v adds info, -vv debug; RUST_LOG overrides
    if !args.json {
        let level = match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        };
        env_logger::Builder::new()
            .filter_module("pushdown", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match cli::run(args) {
        Ok(verdict) => std::process::exit(verdict.exit_code()),
        Err(error) => {
            print_error(error);
            std::process::exit(2);
        }
    }
}
