// ============================================================================
// vidprep-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger setup shared by the vidprep binaries
//
// All three tools reserve stdout for their real output (shell assignments,
// the status line, the startup report), so log records always go to stderr.
//
// USAGE:
// - default: warnings and errors only
// - -v/--verbose: debug records from the vidprep crates
// - RUST_LOG overrides both, e.g. RUST_LOG=vidprep_core=trace

use env_logger::{Env, Target};

/// Initialises the global logger. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,vidprep_core=debug,vidprep_cli=debug"
    } else {
        "warn"
    };

    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .target(Target::Stderr)
        .format_timestamp(None)
        .try_init();

    log::debug!("Logger initialized (verbose: {verbose})");
}
