// vidprep-cli/src/lib.rs
//
// Library portion of the vidprep command-line tools.
// Contains argument definitions, logging setup and command logic shared by
// the three binaries.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// Re-export items needed by the binaries or integration tests
pub use cli::{CheckArgs, ProbeArgs, ProgressArgs};
pub use commands::{check::run_check, probe::run_probe, progress::run_progress};
pub use error::{exit_code, exit_with};
pub use logging::init_logging;
