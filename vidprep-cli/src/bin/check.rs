// vidprep-cli/src/bin/check.rs
//
// Entry point for `vidprep-check [--require-latest]`.

use clap::Parser;
use vidprep_cli::{CheckArgs, exit_with, init_logging, run_check};

fn main() {
    let args = CheckArgs::parse();
    init_logging(args.verbose);

    let stdout = std::io::stdout();
    if let Err(e) = run_check(&args, &mut stdout.lock()) {
        exit_with(e);
    }
}
