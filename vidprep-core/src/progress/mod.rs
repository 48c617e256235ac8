//! ffmpeg `-progress` feed monitor
//!
//! Consumes the `key=value` lines ffmpeg writes to its progress channel and
//! keeps a single status line redrawn in place on the output stream. Only the
//! latest `frame`, `fps` and `speed` values are held, so memory use does not
//! grow with the length of the encode.

use crate::config::ProgressConfig;
use crate::error::CoreResult;
use std::io::{BufRead, Write};

const FRAME_KEY: &str = "frame=";
const FPS_KEY: &str = "fps=";
const SPEED_KEY: &str = "speed=";
const END_SENTINEL: &str = "progress=end";
const PLACEHOLDER: &str = "?";

/// Latest values seen in the feed for one session.
///
/// Fields go from absent to present, or are overwritten by a newer value of
/// the same key; nothing is ever cleared mid-session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    pub frame: Option<String>,
    pub fps: Option<String>,
    pub speed: Option<String>,
    pub total_frames: Option<u64>,
}

impl ProgressState {
    #[must_use]
    pub fn new(total_frames: Option<u64>) -> Self {
        Self {
            total_frames,
            ..Self::default()
        }
    }

    /// Completion percentage, right-aligned to three characters, or `?`.
    ///
    /// Rounds half up (`floor(x + 0.5)`). Needs a known total and a frame
    /// value that parses as a non-negative integer.
    pub fn percent(&self) -> String {
        let total = self.total_frames.filter(|&t| t > 0);
        let frame = self.frame.as_deref().and_then(|f| f.parse::<u64>().ok());
        match (frame, total) {
            (Some(frame), Some(total)) => {
                let pct = (frame as f64 / total as f64 * 100.0 + 0.5).floor();
                format!("{:>3}", pct as u64)
            }
            _ => PLACEHOLDER.to_string(),
        }
    }

    /// The redraw line: carriage return, status, trailing space, no newline.
    pub fn status_line(&self) -> String {
        format!(
            "\rProgress: {}% | frame={} | fps={} | speed={} ",
            self.percent(),
            display(&self.frame),
            display(&self.fps),
            display(&self.speed),
        )
    }
}

/// An empty value (`frame=`) shows as a placeholder, like a missing one.
fn display(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(PLACEHOLDER)
}

/// Where the monitor is in its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Collecting,
    /// `progress=end` was seen; no more lines are consumed.
    Done,
}

/// Counters describing a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub lines_read: u64,
    pub redraws: u64,
    pub reached_end: bool,
}

/// Renders a progress feed onto `out`.
pub struct ProgressMonitor<W: Write> {
    out: W,
    state: ProgressState,
    monitor_state: MonitorState,
    newline_on_eof: bool,
    summary: SessionSummary,
}

impl<W: Write> ProgressMonitor<W> {
    pub fn new(out: W, config: &ProgressConfig) -> Self {
        Self {
            out,
            state: ProgressState::new(config.total_frames),
            monitor_state: MonitorState::Collecting,
            newline_on_eof: config.newline_on_eof,
            summary: SessionSummary::default(),
        }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn monitor_state(&self) -> MonitorState {
        self.monitor_state
    }

    /// Handles one feed line and returns the state afterwards.
    ///
    /// Lines arriving after `Done` are ignored.
    pub fn handle_line(&mut self, line: &str) -> CoreResult<MonitorState> {
        if self.monitor_state == MonitorState::Done {
            return Ok(MonitorState::Done);
        }

        let line = line.trim();
        if line.is_empty() {
            return Ok(self.monitor_state);
        }

        if let Some(value) = line.strip_prefix(FRAME_KEY) {
            self.state.frame = Some(value.to_string());
        } else if let Some(value) = line.strip_prefix(FPS_KEY) {
            self.state.fps = Some(value.to_string());
        } else if let Some(value) = line.strip_prefix(SPEED_KEY) {
            // speed closes each progress block, after that block's frame
            // and fps, so it is the redraw trigger.
            self.state.speed = Some(value.to_string());
            self.redraw()?;
        } else if line == END_SENTINEL {
            self.out.write_all(b"\n")?;
            self.out.flush()?;
            self.summary.reached_end = true;
            self.monitor_state = MonitorState::Done;
        } else {
            log::trace!("Ignoring progress line: {line}");
        }

        Ok(self.monitor_state)
    }

    /// Consumes `input` until `progress=end` or end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced, so such a line is
    /// ignored like any other unrecognised line.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> CoreResult<SessionSummary> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            self.summary.lines_read += 1;
            let line = String::from_utf8_lossy(&buf);
            if self.handle_line(&line)? == MonitorState::Done {
                break;
            }
        }

        if !self.summary.reached_end {
            log::debug!("Progress input closed without {END_SENTINEL}");
            if self.newline_on_eof && self.summary.redraws > 0 {
                self.out.write_all(b"\n")?;
                self.out.flush()?;
            }
        }

        Ok(self.summary)
    }

    /// Returns the output stream, consuming the monitor.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn redraw(&mut self) -> CoreResult<()> {
        self.out.write_all(self.state.status_line().as_bytes())?;
        self.out.flush()?;
        self.summary.redraws += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(total: Option<u64>) -> ProgressMonitor<Vec<u8>> {
        let config = ProgressConfig {
            total_frames: total,
            ..ProgressConfig::default()
        };
        ProgressMonitor::new(Vec::new(), &config)
    }

    fn output(monitor: ProgressMonitor<Vec<u8>>) -> String {
        String::from_utf8(monitor.into_inner()).unwrap()
    }

    #[test]
    fn test_percent_formatting() {
        let mut state = ProgressState::new(Some(100));
        assert_eq!(state.percent(), "?");
        state.frame = Some("20".into());
        assert_eq!(state.percent(), " 20");
        state.frame = Some("5".into());
        assert_eq!(state.percent(), "  5");
        state.frame = Some("100".into());
        assert_eq!(state.percent(), "100");
        state.frame = Some("abc".into());
        assert_eq!(state.percent(), "?");
    }

    #[test]
    fn test_percent_rounds_half_up() {
        let mut state = ProgressState::new(Some(8));
        state.frame = Some("1".into());
        assert_eq!(state.percent(), " 13");
        state.frame = Some("3".into());
        assert_eq!(state.percent(), " 38");
    }

    #[test]
    fn test_percent_unknown_total() {
        let mut state = ProgressState::new(None);
        state.frame = Some("20".into());
        assert_eq!(state.percent(), "?");
        state.total_frames = Some(0);
        assert_eq!(state.percent(), "?");
    }

    #[test]
    fn test_status_line_placeholders() {
        let state = ProgressState::new(None);
        assert_eq!(
            state.status_line(),
            "\rProgress: ?% | frame=? | fps=? | speed=? "
        );
    }

    #[test]
    fn test_empty_value_shows_placeholder() {
        let mut state = ProgressState::new(None);
        state.fps = Some(String::new());
        assert_eq!(
            state.status_line(),
            "\rProgress: ?% | frame=? | fps=? | speed=? "
        );
    }

    #[test]
    fn test_no_output_before_speed() {
        let mut m = monitor(Some(100));
        m.handle_line("frame=10").unwrap();
        m.handle_line("fps=25.0").unwrap();
        assert_eq!(output(m), "");
    }

    #[test]
    fn test_value_after_first_equals_is_kept() {
        let mut m = monitor(None);
        m.handle_line("  speed=a=b  ").unwrap();
        assert_eq!(m.state().speed.as_deref(), Some("a=b"));
    }

    #[test]
    fn test_blank_and_unknown_lines_ignored() {
        let mut m = monitor(None);
        assert_eq!(m.handle_line("").unwrap(), MonitorState::Collecting);
        assert_eq!(m.handle_line("   ").unwrap(), MonitorState::Collecting);
        assert_eq!(m.handle_line("out_time=00:00:01.00").unwrap(), MonitorState::Collecting);
        assert_eq!(m.handle_line("progress=continue").unwrap(), MonitorState::Collecting);
        assert_eq!(*m.state(), ProgressState::new(None));
        assert_eq!(output(m), "");
    }

    #[test]
    fn test_end_sentinel_stops_processing() {
        let input = "frame=1\nspeed=1x\nprogress=end\nframe=99\nspeed=9x\n";
        let mut m = monitor(None);
        let summary = m.run(input.as_bytes()).unwrap();
        assert!(summary.reached_end);
        assert_eq!(summary.redraws, 1);
        assert_eq!(summary.lines_read, 3);
        assert_eq!(m.monitor_state(), MonitorState::Done);
        assert_eq!(m.state().frame.as_deref(), Some("1"));
        assert_eq!(
            output(m),
            "\rProgress: ?% | frame=1 | fps=? | speed=1x \n"
        );
    }

    #[test]
    fn test_eof_without_sentinel_terminates_line() {
        let mut m = monitor(None);
        let summary = m.run("frame=3\nspeed=0.5x\n".as_bytes()).unwrap();
        assert!(!summary.reached_end);
        assert!(output(m).ends_with("speed=0.5x \n"));
    }

    #[test]
    fn test_eof_without_sentinel_can_leave_line_open() {
        let config = ProgressConfig {
            total_frames: None,
            newline_on_eof: false,
        };
        let mut m = ProgressMonitor::new(Vec::new(), &config);
        m.run("frame=3\nspeed=0.5x\n".as_bytes()).unwrap();
        assert!(output(m).ends_with("speed=0.5x "));
    }

    #[test]
    fn test_invalid_utf8_line_is_ignored() {
        let mut input = b"frame=10\nspeed=1x\n".to_vec();
        input.extend_from_slice(b"\xff\xfe junk\n");
        input.extend_from_slice(b"frame=20\nspeed=2x\nprogress=end\n");

        let mut m = monitor(None);
        let summary = m.run(input.as_slice()).unwrap();
        assert!(summary.reached_end);
        assert_eq!(summary.redraws, 2);
        assert_eq!(summary.lines_read, 6);
        assert_eq!(
            output(m),
            "\rProgress: ?% | frame=10 | fps=? | speed=1x \
             \rProgress: ?% | frame=20 | fps=? | speed=2x \n"
        );
    }

    #[test]
    fn test_eof_without_output_writes_nothing() {
        let mut m = monitor(None);
        m.run("frame=3\n".as_bytes()).unwrap();
        assert_eq!(output(m), "");
    }
}
