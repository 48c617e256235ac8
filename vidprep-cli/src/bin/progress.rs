// vidprep-cli/src/bin/progress.rs
//
// Entry point for `vidprep-progress`, fed by `ffmpeg -progress pipe:1`.

use clap::Parser;
use vidprep_cli::{ProgressArgs, exit_with, init_logging, run_progress};

fn main() {
    let args = ProgressArgs::parse();
    init_logging(args.verbose);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    if let Err(e) = run_progress(&args, stdin.lock(), stdout.lock()) {
        exit_with(e);
    }
}
