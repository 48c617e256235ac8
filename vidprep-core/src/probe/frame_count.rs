//! Total frame count discovery.
//!
//! Strategies are tried in order and the first one that produces a count
//! wins. Streams with neither a header frame count nor a duration (live
//! captures, some transport streams) legitimately end up with no count.

use crate::external::{CommandRunner, FfprobeQueries};
use std::path::Path;

/// One way of determining how many frames a stream holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCountStrategy {
    /// Exact count from the stream's `nb_frames` header field.
    StreamFrameCount,
    /// `round(duration * fps)` from the container duration.
    DurationEstimate,
}

/// Default order: exact count first, estimate second.
pub const DEFAULT_STRATEGIES: [FrameCountStrategy; 2] = [
    FrameCountStrategy::StreamFrameCount,
    FrameCountStrategy::DurationEstimate,
];

impl FrameCountStrategy {
    /// Applies this strategy, returning `None` when it cannot answer.
    pub fn apply<R: CommandRunner>(
        self,
        queries: &FfprobeQueries<R>,
        path: &Path,
        frame_rate: f64,
    ) -> Option<u64> {
        match self {
            FrameCountStrategy::StreamFrameCount => parse_frame_count(&queries.frame_count(path)),
            FrameCountStrategy::DurationEstimate => {
                estimate_from_duration(&queries.duration(path), frame_rate)
            }
        }
    }
}

/// Runs `strategies` in order and returns the first count found.
pub fn query_total_frames<R: CommandRunner>(
    queries: &FfprobeQueries<R>,
    path: &Path,
    frame_rate: f64,
    strategies: &[FrameCountStrategy],
) -> Option<u64> {
    strategies.iter().find_map(|strategy| {
        let count = strategy.apply(queries, path, frame_rate);
        log::debug!("{strategy:?} -> {count:?}");
        count
    })
}

/// Accepts only a plain ASCII digit string, as ffprobe prints it.
pub fn parse_frame_count(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u64>().ok()
}

/// Estimates a frame count as `round(duration * fps)`, ties to even.
///
/// Returns `None` unless the duration parses and the estimate is at least 1.
pub fn estimate_from_duration(raw_duration: &str, frame_rate: f64) -> Option<u64> {
    let duration = raw_duration.trim().parse::<f64>().ok()?;
    let estimate = (duration * frame_rate).round_ties_even();
    if estimate.is_finite() && estimate >= 1.0 && estimate < u64::MAX as f64 {
        Some(estimate as u64)
    } else {
        None
    }
}
