//! Text-mode ffprobe queries.
//!
//! Every query asks for a single entry of the first video stream (or the
//! container) in `default=nk=1:nw=1` form, so the reply is bare values, one
//! per line. A failed query is not an error here: it yields an empty string,
//! and callers treat empty as "unknown".

use super::CommandRunner;
use std::ffi::OsStr;
use std::path::Path;

/// Issues metadata queries against ffprobe for one input.
pub struct FfprobeQueries<R> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> FfprobeQueries<R> {
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// Raw `r_frame_rate` of the first video stream, e.g. `24000/1001`.
    pub fn frame_rate(&self, path: &Path) -> String {
        self.query(path, "stream=r_frame_rate")
    }

    /// Width and height of the first video stream, in that order.
    ///
    /// ffprobe prints the two values on consecutive lines in the order the
    /// entries were requested, so they are mapped by position. Fewer than two
    /// lines yields `("", "")`.
    pub fn dimensions(&self, path: &Path) -> (String, String) {
        let out = self.query(path, "stream=width,height");
        let mut lines = out.lines();
        match (lines.next(), lines.next()) {
            (Some(w), Some(h)) => (w.trim().to_string(), h.trim().to_string()),
            _ => (String::new(), String::new()),
        }
    }

    /// Frame count recorded in the stream header (`nb_frames`), often `N/A`.
    pub fn frame_count(&self, path: &Path) -> String {
        self.query(path, "stream=nb_frames")
    }

    /// Container duration in seconds.
    pub fn duration(&self, path: &Path) -> String {
        self.query(path, "format=duration")
    }

    fn query(&self, path: &Path, entries: &str) -> String {
        let args = [
            OsStr::new("-v"),
            OsStr::new("error"),
            OsStr::new("-select_streams"),
            OsStr::new("v:0"),
            OsStr::new("-show_entries"),
            OsStr::new(entries),
            OsStr::new("-of"),
            OsStr::new("default=nk=1:nw=1"),
            path.as_os_str(),
        ];
        match self.runner.run(&self.program, &args) {
            Ok(out) => out,
            Err(e) => {
                log::debug!("ffprobe query {entries} on {} failed: {e}", path.display());
                String::new()
            }
        }
    }
}
