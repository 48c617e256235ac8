// ============================================================================
// vidprep-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Configuration structures and defaults
//
// This module defines the configuration for each of the three tools. Instances
// are built by vidprep-cli from command-line flags and environment variables
// and passed into the core entry points.

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Frame rate assumed when ffprobe reports nothing usable.
pub const DEFAULT_FRAME_RATE: f64 = 24.0;

/// Largest width or height a preview render may have.
pub const DEFAULT_MAX_PREVIEW_DIM: u32 = 1080;

/// Preview size used when the requested output size is unusable.
pub const FALLBACK_PREVIEW_SIZE: (u32, u32) = (640, 360);

/// Program name used for ffprobe when no override is given.
pub const DEFAULT_FFPROBE: &str = "ffprobe";

/// Environment variable carrying the expected frame count for the progress monitor.
pub const TOTAL_FRAMES_ENV: &str = "TOTAL_FRAMES";

/// Binaries the startup checker requires.
pub const REQUIRED_TOOLS: [&str; 3] = ["ffmpeg", "ffprobe", "ffplay"];

// ============================================================================
// PROBE CONFIGURATION
// ============================================================================

/// Settings for a single probe invocation.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// ffprobe program name or path.
    pub ffprobe_path: PathBuf,
    /// Frame rate used when the stream's rate is missing or malformed.
    pub default_frame_rate: f64,
    /// Upper bound on either preview dimension.
    pub max_preview_dim: u32,
    /// Preview size used when the requested output size is unusable.
    pub fallback_preview: (u32, u32),
    /// Optional limit on each individual ffprobe query.
    pub query_timeout: Option<Duration>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: PathBuf::from(DEFAULT_FFPROBE),
            default_frame_rate: DEFAULT_FRAME_RATE,
            max_preview_dim: DEFAULT_MAX_PREVIEW_DIM,
            fallback_preview: FALLBACK_PREVIEW_SIZE,
            query_timeout: None,
        }
    }
}

impl ProbeConfig {
    /// Rejects settings that would break the `ProbeResult` invariants.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.default_frame_rate.is_finite() && self.default_frame_rate > 0.0) {
            return Err(CoreError::Config(format!(
                "default frame rate must be positive, got {}",
                self.default_frame_rate
            )));
        }
        if self.max_preview_dim == 0 {
            return Err(CoreError::Config(
                "maximum preview dimension must be at least 1".to_string(),
            ));
        }
        let (w, h) = self.fallback_preview;
        if w == 0 || h == 0 || w.max(h) > self.max_preview_dim {
            return Err(CoreError::Config(format!(
                "fallback preview {w}x{h} must be non-zero and within {}",
                self.max_preview_dim
            )));
        }
        Ok(())
    }
}

// ============================================================================
// PROGRESS CONFIGURATION
// ============================================================================

/// Settings for one progress monitoring session.
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Expected number of frames, if known. Never changes during a session.
    pub total_frames: Option<u64>,
    /// Terminate the status line when input closes without `progress=end`.
    pub newline_on_eof: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            total_frames: None,
            newline_on_eof: true,
        }
    }
}

impl ProgressConfig {
    /// Builds a config from a raw total-frame value such as `$TOTAL_FRAMES`.
    ///
    /// Only plain ASCII digit strings count. Anything else, including `0`,
    /// leaves the total unknown.
    pub fn from_total_frames_value(raw: Option<&str>) -> Self {
        Self {
            total_frames: raw.and_then(parse_total_frames),
            ..Self::default()
        }
    }
}

fn parse_total_frames(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u64>().ok().filter(|&n| n > 0)
}

// ============================================================================
// STARTUP CHECK CONFIGURATION
// ============================================================================

/// Settings for the startup checker.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Binaries that must be runnable.
    pub required_tools: Vec<String>,
    /// Require the installed ffmpeg to match Homebrew's stable release.
    pub require_latest: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            required_tools: REQUIRED_TOOLS.iter().map(|t| t.to_string()).collect(),
            require_latest: false,
        }
    }
}
