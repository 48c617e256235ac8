// vidprep-cli/src/bin/probe.rs
//
// Entry point for `vidprep-probe <input> <out-width> <out-height>`.
// Missing arguments are a usage error and exit with status 2 via clap.

use clap::Parser;
use vidprep_cli::{ProbeArgs, exit_with, init_logging, run_probe};

fn main() {
    let args = ProbeArgs::parse();
    init_logging(args.verbose);

    let stdout = std::io::stdout();
    if let Err(e) = run_probe(&args, &mut stdout.lock()) {
        exit_with(e);
    }
}
