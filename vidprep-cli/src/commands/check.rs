use crate::cli::CheckArgs;
use anyhow::Result;
use std::io::Write;
use vidprep_core::{
    CheckConfig, CommandRunner, LatestCheck, SystemCommandRunner, run_startup_checks,
    verify_latest,
};

/// Runs the startup checks against the real toolchain.
pub fn run_check<W: Write>(args: &CheckArgs, out: &mut W) -> Result<()> {
    // Version banners may land on stderr, so capture both streams.
    let runner = SystemCommandRunner::new().merge_stderr(true);
    run_check_with(&runner, args, vidprep_core::is_macos(), out)
}

/// Runs the startup checks with an explicit runner and platform.
pub fn run_check_with<R: CommandRunner, W: Write>(
    runner: &R,
    args: &CheckArgs,
    on_macos: bool,
    out: &mut W,
) -> Result<()> {
    let config = CheckConfig {
        require_latest: args.require_latest,
        ..CheckConfig::default()
    };

    let report = run_startup_checks(runner, &config, on_macos)?;
    write!(out, "{report}")?;

    if config.require_latest {
        out.flush()?;
        match verify_latest(runner, on_macos)? {
            LatestCheck::UpToDate(version) => log::info!("ffmpeg {version} is current"),
            LatestCheck::Skipped => eprintln!(
                "\nWARNING: could not determine Homebrew latest ffmpeg version; skipping latest check"
            ),
        }
    }

    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::exit_code;
    use std::ffi::OsStr;
    use vidprep_core::{CoreError, CoreResult};

    struct FakeToolchain {
        installed: &'static [&'static str],
        brew_json: Option<&'static str>,
    }

    impl CommandRunner for FakeToolchain {
        fn run<S: AsRef<OsStr>>(&self, program: &str, args: &[S]) -> CoreResult<String> {
            if program == "brew" {
                let first = args.first().map(|a| a.as_ref());
                return match (first, self.brew_json) {
                    (_, None) => Err(CoreError::DependencyNotFound(program.into())),
                    (Some(arg), Some(json)) if arg == "info" => Ok(json.to_string()),
                    _ => Ok("Homebrew 4.4.0".to_string()),
                };
            }
            if self.installed.contains(&program) {
                Ok(format!("{program} version 7.1 Copyright (c) the FFmpeg developers"))
            } else {
                Err(CoreError::DependencyNotFound(program.into()))
            }
        }
    }

    const ALL: &[&str] = &["ffmpeg", "ffprobe", "ffplay"];

    fn args(require_latest: bool) -> CheckArgs {
        CheckArgs {
            require_latest,
            verbose: false,
        }
    }

    #[test]
    fn test_report_printed() {
        let runner = FakeToolchain { installed: ALL, brew_json: None };
        let mut out = Vec::new();
        run_check_with(&runner, &args(false), false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nStartup checks:\n  ffmpeg: 7.1\n  ffprobe: 7.1\n  ffplay: 7.1\n\n"
        );
    }

    #[test]
    fn test_missing_tool_exit_code() {
        let runner = FakeToolchain { installed: &["ffmpeg"], brew_json: None };
        let err = run_check_with(&runner, &args(false), false, &mut Vec::new()).unwrap_err();
        assert_eq!(exit_code(&err), 2);
        assert_eq!(err.to_string(), "missing required tools: ffprobe, ffplay");
    }

    #[test]
    fn test_require_latest_off_macos() {
        let runner = FakeToolchain { installed: ALL, brew_json: None };
        let err = run_check_with(&runner, &args(true), false, &mut Vec::new()).unwrap_err();
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn test_require_latest_without_brew() {
        let runner = FakeToolchain { installed: ALL, brew_json: None };
        let err = run_check_with(&runner, &args(true), true, &mut Vec::new()).unwrap_err();
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn test_require_latest_mismatch() {
        let runner = FakeToolchain {
            installed: ALL,
            brew_json: Some(r#"{"formulae":[{"versions":{"stable":"8.0"}}]}"#),
        };
        let err = run_check_with(&runner, &args(true), true, &mut Vec::new()).unwrap_err();
        assert_eq!(exit_code(&err), 4);
    }

    #[test]
    fn test_require_latest_match() {
        let runner = FakeToolchain {
            installed: ALL,
            brew_json: Some(r#"{"formulae":[{"versions":{"stable":"7.1"}}]}"#),
        };
        let mut out = Vec::new();
        run_check_with(&runner, &args(true), true, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("  Homebrew: Homebrew 4.4.0\n"));
        assert!(out.ends_with("  ffplay: 7.1\n\n"));
    }

    #[test]
    fn test_require_latest_skipped_without_stable_version() {
        let runner = FakeToolchain {
            installed: ALL,
            brew_json: Some(r#"{"formulae":[]}"#),
        };
        let mut out = Vec::new();
        run_check_with(&runner, &args(true), true, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("  ffplay: 7.1\n\n"));
    }
}
