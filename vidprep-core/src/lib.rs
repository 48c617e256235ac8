//! Core library for the vidprep transcoding helpers.
//!
//! The helpers sit around an external ffmpeg encode driven from a shell
//! script:
//!
//! - [`probe`] inspects the input once with ffprobe and derives the encode
//!   parameters (frame rate, keyframe interval, frame count, preview size),
//!   emitted as `KEY='value'` lines for `eval`.
//! - [`progress`] renders ffmpeg's `-progress` feed as one status line.
//! - [`toolcheck`] verifies the ffmpeg toolchain is installed.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidprep_core::{ProbeConfig, Prober};
//! use std::path::Path;
//!
//! let prober = Prober::from_config(ProbeConfig::default());
//! let result = prober.run(Path::new("/path/to/input.mkv"), "1920", "1080");
//! print!("{}", result.to_shell());
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod probe;
pub mod progress;
pub mod toolcheck;
pub mod utils;

// Re-exports for public API
pub use config::{CheckConfig, ProbeConfig, ProgressConfig};
pub use error::{CoreError, CoreResult};
pub use external::{CommandRunner, SystemCommandRunner, is_macos};
pub use probe::{ProbeResult, Prober};
pub use progress::{MonitorState, ProgressMonitor, ProgressState, SessionSummary};
pub use toolcheck::{LatestCheck, StartupReport, run_startup_checks, verify_latest};
pub use utils::{Parsed, shell_quote};
