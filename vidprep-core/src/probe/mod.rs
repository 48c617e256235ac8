// ============================================================================
// vidprep-core/src/probe/mod.rs
// ============================================================================
//
// PROBE: Derive encode parameters from ffprobe metadata
//
// This module inspects an input file once, before encoding, and derives the
// values the encode step is parametrised with: frame rate, keyframe interval,
// total frame count, native dimensions and a bounded preview size.
//
// KEY COMPONENTS:
// - ProbeResult: the derived values for one input
// - Prober: runs the queries in a fixed order and combines their results
// - Shell emission: `KEY='value'` lines for `eval` in the calling script
//
// FAILURE MODEL:
// No single failed query aborts the probe. A query that fails (tool missing,
// non-zero exit, timeout) degrades to a default or an absent field.

// ---- Submodules ----
pub mod frame_count;
pub mod frame_rate;
pub mod preview;

// ---- Internal crate imports ----
use crate::config::ProbeConfig;
use crate::external::{CommandRunner, FfprobeQueries, SystemCommandRunner};
use crate::utils::{FloatDisplay, Parsed, parse_trimmed, shell_quote};

// ---- Standard library imports ----
use std::fmt::{self, Write as _};
use std::path::Path;

// ---- Re-exports ----
pub use frame_count::{
    DEFAULT_STRATEGIES, FrameCountStrategy, estimate_from_duration, parse_frame_count,
    query_total_frames,
};
pub use frame_rate::{derive_keyframe_interval, parse_frame_rate};
pub use preview::compute_preview_dimensions;

// ============================================================================
// PROBE RESULT
// ============================================================================

/// Encode parameters derived from one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// Frames per second; always positive.
    pub frame_rate: Parsed<f64>,
    /// Frames between keyframes; always at least 1.
    pub keyframe_interval: u32,
    /// Total frames, when the container records or implies it.
    pub total_frames: Option<u64>,
    pub source_width: Option<u32>,
    pub source_height: Option<u32>,
    pub preview_width: u32,
    pub preview_height: u32,
}

impl ProbeResult {
    /// Returns the `(KEY, value)` pairs to emit, in output order.
    ///
    /// Fields that could not be determined are left out rather than emitted
    /// empty.
    pub fn assignments(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("FPS", FloatDisplay(self.frame_rate.into_inner()).to_string()),
            ("GOP", self.keyframe_interval.to_string()),
        ];
        if let Some(total) = self.total_frames {
            pairs.push(("TOTAL_FRAMES", total.to_string()));
        }
        if let Some(w) = self.source_width {
            pairs.push(("IN_WIDTH", w.to_string()));
        }
        if let Some(h) = self.source_height {
            pairs.push(("IN_HEIGHT", h.to_string()));
        }
        pairs.push(("PREVIEW_W", self.preview_width.to_string()));
        pairs.push(("PREVIEW_H", self.preview_height.to_string()));
        pairs
    }

    /// Renders the result as newline-terminated `KEY='value'` lines.
    pub fn to_shell(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.assignments() {
            let _ = writeln!(out, "{key}={}", shell_quote(&value));
        }
        out
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell())
    }
}

// ============================================================================
// PROBER
// ============================================================================

/// Runs the probe queries for one input.
pub struct Prober<R> {
    queries: FfprobeQueries<R>,
    config: ProbeConfig,
    strategies: Vec<FrameCountStrategy>,
}

impl Prober<SystemCommandRunner> {
    /// Creates a prober that calls the real ffprobe binary.
    pub fn from_config(config: ProbeConfig) -> Self {
        let runner = SystemCommandRunner::new().with_timeout(config.query_timeout);
        Self::with_runner(runner, config)
    }
}

impl<R: CommandRunner> Prober<R> {
    pub fn with_runner(runner: R, config: ProbeConfig) -> Self {
        let program = config.ffprobe_path.to_string_lossy().into_owned();
        Self {
            queries: FfprobeQueries::new(runner, program),
            config,
            strategies: DEFAULT_STRATEGIES.to_vec(),
        }
    }

    /// Replaces the frame-count strategies, tried in the given order.
    #[must_use]
    pub fn with_strategies(mut self, strategies: Vec<FrameCountStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Probes `path` and derives encode parameters for an `out_w`x`out_h`
    /// output.
    ///
    /// Runs frame rate, keyframe interval, dimensions, total frames, and
    /// preview size, in that order.
    pub fn run(&self, path: &Path, out_w: &str, out_h: &str) -> ProbeResult {
        log::debug!("Probing {}", path.display());

        let raw_rate = self.queries.frame_rate(path);
        let frame_rate = parse_frame_rate(&raw_rate, self.config.default_frame_rate);
        if frame_rate.is_defaulted() {
            log::info!(
                "Frame rate '{raw_rate}' unusable for {}, assuming {}",
                path.display(),
                self.config.default_frame_rate
            );
        }
        let fps = frame_rate.into_inner();
        let keyframe_interval = derive_keyframe_interval(fps);

        let (raw_w, raw_h) = self.queries.dimensions(path);
        let source_width = parse_trimmed::<u32>(&raw_w);
        let source_height = parse_trimmed::<u32>(&raw_h);

        let total_frames = query_total_frames(&self.queries, path, fps, &self.strategies);
        if total_frames.is_none() {
            log::info!("Total frame count unknown for {}", path.display());
        }

        let (preview_width, preview_height) = compute_preview_dimensions(
            out_w,
            out_h,
            self.config.max_preview_dim,
            self.config.fallback_preview,
        );

        ProbeResult {
            frame_rate,
            keyframe_interval,
            total_frames,
            source_width,
            source_height,
            preview_width,
            preview_height,
        }
    }
}
