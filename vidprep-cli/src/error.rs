// ============================================================================
// vidprep-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: exit codes for the vidprep binaries
//
// Exit codes:
// - 0: success
// - 1: unexpected failure (I/O, bad configuration)
// - 2: usage error (clap) or missing required tools
// - 3: --require-latest unsupported here (not macOS, no Homebrew)
// - 4: installed ffmpeg differs from Homebrew stable

use vidprep_core::CoreError;

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_MISSING_TOOLS: i32 = 2;
pub const EXIT_UNSUPPORTED: i32 = 3;
pub const EXIT_VERSION_MISMATCH: i32 = 4;

/// Maps an error to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CoreError>() {
        Some(CoreError::MissingTools(_)) => EXIT_MISSING_TOOLS,
        Some(CoreError::UnsupportedPlatform(_)) => EXIT_UNSUPPORTED,
        Some(CoreError::VersionMismatch { .. }) => EXIT_VERSION_MISMATCH,
        _ => EXIT_FAILURE,
    }
}

/// Prints `err` and any hint for it to stderr, then exits.
pub fn exit_with(err: anyhow::Error) -> ! {
    eprintln!();
    eprintln!("ERROR: {err:#}");
    if let Some(hint) = hint(&err) {
        eprintln!("{hint}");
    }
    std::process::exit(exit_code(&err));
}

fn hint(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<CoreError>()? {
        CoreError::MissingTools(_) => Some("Please install them (on macOS: brew install ffmpeg)"),
        CoreError::VersionMismatch { .. } => Some("Please run: brew update && brew upgrade ffmpeg"),
        _ => None,
    }
}
