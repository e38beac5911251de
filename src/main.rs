mod args;
mod summary;

use clap::Parser;
use env_logger::Env;
use snafu::ErrorCompat;

use crate::args::Args;
use crate::summary::run_summary;

fn main() {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    if let Err(e) = run_summary(&args) {
        eprintln!("Error: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
