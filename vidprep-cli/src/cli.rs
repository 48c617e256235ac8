// vidprep-cli/src/cli.rs
//
// Defines the command-line argument structures for the three vidprep tools
// using clap.

use clap::Parser;
use std::path::PathBuf;

// --- Probe ---

#[derive(Parser, Debug)]
#[command(
    name = "vidprep-probe",
    version,
    about = "Probe a video and print encode parameters as shell assignments",
    long_about = "Runs ffprobe against INPUT and prints FPS, GOP, TOTAL_FRAMES, IN_WIDTH, \
                  IN_HEIGHT, PREVIEW_W and PREVIEW_H as single-quoted KEY='value' lines \
                  suitable for eval. Fields that cannot be determined are omitted. \
                  Options go before INPUT; anything after OUT_HEIGHT is ignored.",
    allow_negative_numbers = true
)]
pub struct ProbeArgs {
    /// Video file to inspect
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Requested output width; used to size the preview
    #[arg(value_name = "OUT_WIDTH", allow_hyphen_values = true)]
    pub out_width: String,

    /// Requested output height; used to size the preview
    #[arg(value_name = "OUT_HEIGHT", allow_hyphen_values = true)]
    pub out_height: String,

    /// Extra positional arguments are accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,

    /// ffprobe binary to run
    #[arg(long, value_name = "PATH", env = "FFPROBE", default_value = "ffprobe")]
    pub ffprobe: PathBuf,

    /// Largest preview width or height
    #[arg(long, value_name = "PIXELS", default_value_t = vidprep_core::config::DEFAULT_MAX_PREVIEW_DIM)]
    pub max_dim: u32,

    /// Give up on any single ffprobe query after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

// --- Progress ---

#[derive(Parser, Debug)]
#[command(
    name = "vidprep-progress",
    version,
    about = "Render an ffmpeg -progress feed from stdin as a single status line"
)]
pub struct ProgressArgs {
    /// Expected frame count; anything but a positive integer means unknown
    #[arg(long, value_name = "FRAMES", env = "TOTAL_FRAMES")]
    pub total_frames: Option<String>,

    /// Leave the status line unterminated if input ends without progress=end
    #[arg(long)]
    pub no_eof_newline: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

// --- Startup checks ---

#[derive(Parser, Debug)]
#[command(
    name = "vidprep-check",
    version,
    about = "Check that ffmpeg, ffprobe and ffplay are installed"
)]
pub struct CheckArgs {
    /// On macOS, require the installed ffmpeg to match Homebrew's stable version
    #[arg(long)]
    pub require_latest: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_args() {
        let args = ProbeArgs::parse_from(["vidprep-probe", "in.mkv", "1920", "1080"]);
        assert_eq!(args.input, PathBuf::from("in.mkv"));
        assert_eq!(args.out_width, "1920");
        assert_eq!(args.out_height, "1080");
        assert_eq!(args.max_dim, 1080);
        assert!(args.timeout_secs.is_none());
    }

    #[test]
    fn test_probe_accepts_odd_dimensions() {
        let args = ProbeArgs::parse_from(["vidprep-probe", "in.mkv", "-1280", "abc"]);
        assert_eq!(args.out_width, "-1280");
        assert_eq!(args.out_height, "abc");

        let args = ProbeArgs::parse_from(["vidprep-probe", "in.mkv", "-x", "720"]);
        assert_eq!(args.out_width, "-x");
        assert_eq!(args.out_height, "720");

        let args = ProbeArgs::parse_from(["vidprep-probe", "in.mkv", "1920", "-y"]);
        assert_eq!(args.out_height, "-y");
    }

    #[test]
    fn test_probe_ignores_extra_positionals() {
        let args = ProbeArgs::parse_from(["vidprep-probe", "in.mkv", "1920", "1080", "extra", "-z"]);
        assert_eq!(args.out_height, "1080");
        assert_eq!(args.extra, vec!["extra", "-z"]);
    }

    #[test]
    fn test_probe_options_before_positionals() {
        let args = ProbeArgs::parse_from(["vidprep-probe", "--max-dim", "720", "in.mkv", "1920", "1080"]);
        assert_eq!(args.max_dim, 720);
        assert!(args.extra.is_empty());
    }

    #[test]
    fn test_probe_requires_three_positionals() {
        let err = ProbeArgs::try_parse_from(["vidprep-probe", "in.mkv", "1920"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_parse_progress_args() {
        let args = ProgressArgs::parse_from(["vidprep-progress", "--total-frames", "500"]);
        assert_eq!(args.total_frames.as_deref(), Some("500"));
        assert!(!args.no_eof_newline);
    }

    #[test]
    fn test_parse_check_args() {
        let args = CheckArgs::parse_from(["vidprep-check", "--require-latest"]);
        assert!(args.require_latest);
    }
}
