use crate::cli::ProgressArgs;
use anyhow::Result;
use std::io::{BufRead, Write};
use vidprep_core::{ProgressConfig, ProgressMonitor};

/// Builds the monitor configuration from command-line arguments.
pub fn progress_config(args: &ProgressArgs) -> ProgressConfig {
    let mut config = ProgressConfig::from_total_frames_value(args.total_frames.as_deref());
    config.newline_on_eof = !args.no_eof_newline;
    config
}

/// Renders the progress feed on `input` to `out` until it ends.
pub fn run_progress<R: BufRead, W: Write>(args: &ProgressArgs, input: R, out: W) -> Result<()> {
    let config = progress_config(args);
    log::debug!("Total frames: {:?}", config.total_frames);

    let summary = ProgressMonitor::new(out, &config).run(input)?;
    log::debug!(
        "Progress session finished: {} lines, {} redraws, end marker seen: {}",
        summary.lines_read,
        summary.redraws,
        summary.reached_end
    );
    Ok(())
}
