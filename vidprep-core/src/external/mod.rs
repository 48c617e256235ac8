// ============================================================================
// vidprep-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffprobe, ffmpeg and friends
//
// This module encapsulates every call to an external program. Consumers go
// through the `CommandRunner` trait so tests can substitute a scripted runner
// for the real binaries.
//
// KEY COMPONENTS:
// - CommandRunner: trait for running a program and capturing its stdout
// - SystemCommandRunner: std::process implementation with optional timeout
// - Dependency checking and platform detection helpers

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};

// ---- Standard library imports ----
use std::borrow::Cow;
use std::env;
use std::ffi::OsStr;
use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Text-mode ffprobe queries used by the probe.
pub mod ffprobe;

#[cfg(test)]
pub(crate) mod mocks;

pub use ffprobe::FfprobeQueries;

// ============================================================================
// COMMAND RUNNER
// ============================================================================

/// Runs an external program and returns its standard output.
///
/// Implementations return the output with surrounding whitespace trimmed.
/// A program that cannot be found must be reported as
/// [`CoreError::DependencyNotFound`] so callers can tell "missing" apart from
/// "ran and failed". Arguments are passed through as OS strings, so input
/// paths that are not valid UTF-8 reach the program unchanged.
pub trait CommandRunner {
    fn run<S: AsRef<OsStr>>(&self, program: &str, args: &[S]) -> CoreResult<String>;
}

impl<R: CommandRunner> CommandRunner for &R {
    fn run<S: AsRef<OsStr>>(&self, program: &str, args: &[S]) -> CoreResult<String> {
        (**self).run(program, args)
    }
}

/// Joins `program` and `args` for log lines and test matching.
pub(crate) fn display_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    std::iter::once(Cow::Borrowed(program))
        .chain(args.iter().map(|a| a.as_ref().to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Production [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    timeout: Option<Duration>,
    merge_stderr: bool,
}

impl SystemCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Kills any command still running after `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Appends stderr to the returned text. Some tools print their version
    /// banner there.
    #[must_use]
    pub fn merge_stderr(mut self, merge: bool) -> Self {
        self.merge_stderr = merge;
        self
    }

    fn wait(&self, program: &str, child: &mut Child) -> CoreResult<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return child.wait().map_err(|e| command_start_error(program, e));
        };

        let start = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if start.elapsed() < timeout => {
                    thread::sleep(Duration::from_millis(20));
                }
                Ok(None) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    log::debug!("{program} exceeded {}s, killed", timeout.as_secs());
                    return Err(CoreError::CommandTimeout(
                        program.to_string(),
                        timeout.as_secs(),
                    ));
                }
                Err(e) => return Err(command_start_error(program, e)),
            }
        }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run<S: AsRef<OsStr>>(&self, program: &str, args: &[S]) -> CoreResult<String> {
        log::debug!("Running: {}", display_command(program, args));

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    CoreError::DependencyNotFound(program.to_string())
                } else {
                    command_start_error(program, e)
                }
            })?;

        // Drain both pipes on their own threads so a chatty child cannot
        // block on a full pipe while we poll for its exit.
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let status = self.wait(program, &mut child)?;
        let stdout = stdout.map(join_reader).unwrap_or_default();
        let stderr = stderr.map(join_reader).unwrap_or_default();

        if !status.success() {
            log::debug!("{program} failed with {status}: {}", stderr.trim());
            return Err(command_failed_error(program, status, stderr));
        }

        let mut text = stdout;
        if self.merge_stderr {
            text.push_str(&stderr);
        }
        Ok(text.trim().to_string())
    }
}

fn spawn_reader<S: Read + Send + 'static>(mut stream: S) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stream.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks whether `cmd_name` can be executed.
///
/// Runs `<cmd_name> -version` and returns the first line of its output. A
/// tool that exits non-zero still counts as present; only a failure to start
/// it is an error.
pub fn check_dependency<R: CommandRunner>(runner: &R, cmd_name: &str) -> CoreResult<String> {
    match runner.run(cmd_name, &["-version"]) {
        Ok(output) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(first_line(&output).to_string())
        }
        Err(CoreError::CommandFailed(_, _, stderr)) => {
            log::debug!("Found dependency {cmd_name}, but -version failed");
            Ok(first_line(&stderr).to_string())
        }
        Err(e @ CoreError::DependencyNotFound(_)) => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(e)
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(e)
        }
    }
}

/// Returns the first line of `text`, or the empty string.
#[must_use]
pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim()
}

// ============================================================================
// PLATFORM DETECTION
// ============================================================================

/// Checks if the current platform is macOS.
pub fn is_macos() -> bool {
    env::consts::OS == "macos"
}
