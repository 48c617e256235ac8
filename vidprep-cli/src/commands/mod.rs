// vidprep-cli/src/commands/mod.rs
//
// One module per binary. Each entry point takes its parsed arguments and the
// stream to write results to, and leaves exit-code mapping to the caller.

pub mod check;
pub mod probe;
pub mod progress;
