// ============================================================================
// vidprep-core/src/toolcheck/mod.rs
// ============================================================================
//
// STARTUP CHECKS: Verify the ffmpeg toolchain before a transcoding run
//
// Reports which of the required ffmpeg binaries are installed and which
// versions they are. Optionally, on macOS, requires the installed ffmpeg to
// match the stable release Homebrew currently ships.
//
// KEY COMPONENTS:
// - StartupReport: what was found, rendered as the "Startup checks:" block
// - run_startup_checks: gathers the report, failing on missing tools
// - verify_latest: compares the installed ffmpeg with Homebrew's stable

// ---- Internal crate imports ----
use crate::config::CheckConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{CommandRunner, check_dependency, first_line};

// ---- External crate imports ----
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// ---- Standard library imports ----
use std::fmt;

static FFMPEG_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ffmpeg version\s*([0-9A-Za-z.+-]+)").expect("valid regex"));

const BREW: &str = "brew";

// ============================================================================
// VERSION EXTRACTION
// ============================================================================

/// Extracts the version token from an ffmpeg-family `-version` banner.
///
/// Handles the usual `ffmpeg version 7.1 Copyright ...` form; otherwise
/// falls back to the third whitespace-separated token.
pub fn extract_ffmpeg_version(line: &str) -> Option<String> {
    if let Some(caps) = FFMPEG_VERSION_RE.captures(line) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }
    line.split_whitespace().nth(2).map(str::to_string)
}

/// Reads the stable ffmpeg version out of `brew info --json=v2 ffmpeg`.
///
/// Looks at the first entry of `formulae` (or `casks`) and takes
/// `versions.stable`, then `stable_version`, `version`, `current_version`.
pub fn parse_brew_stable_version(json: &str) -> CoreResult<Option<String>> {
    let data: Value =
        serde_json::from_str(json).map_err(|e| CoreError::JsonParseError(e.to_string()))?;

    let first = ["formulae", "casks"]
        .iter()
        .filter_map(|key| data.get(key).and_then(Value::as_array))
        .find(|items| !items.is_empty())
        .and_then(|items| items.first());
    let Some(item) = first else {
        return Ok(None);
    };

    let stable = item
        .get("versions")
        .and_then(|v| v.get("stable"))
        .and_then(Value::as_str);
    let version = stable.or_else(|| {
        ["stable_version", "version", "current_version"]
            .iter()
            .find_map(|key| item.get(key).and_then(Value::as_str))
    });
    Ok(version.filter(|v| !v.is_empty()).map(str::to_string))
}

// ============================================================================
// REPORT
// ============================================================================

/// A tool that was found, with its reported version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolVersion {
    pub name: String,
    pub version: String,
}

/// Results of the startup checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupReport {
    /// `None` off macOS; `Some(None)` when Homebrew is absent.
    pub homebrew: Option<Option<String>>,
    pub tools: Vec<ToolVersion>,
}

impl fmt::Display for StartupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Startup checks:")?;
        if let Some(brew) = &self.homebrew {
            writeln!(f, "  Homebrew: {}", brew.as_deref().unwrap_or("not found"))?;
        }
        for tool in &self.tools {
            writeln!(f, "  {}: {}", tool.name, tool.version)?;
        }
        Ok(())
    }
}

/// Checks the required tools and collects their versions.
///
/// Every tool is checked before failing, so the error names all missing
/// tools at once.
pub fn run_startup_checks<R: CommandRunner>(
    runner: &R,
    config: &CheckConfig,
    on_macos: bool,
) -> CoreResult<StartupReport> {
    let homebrew = on_macos.then(|| homebrew_version(runner));

    let mut tools = Vec::new();
    let mut missing = Vec::new();
    for name in &config.required_tools {
        match check_dependency(runner, name) {
            Ok(banner) => {
                let version = extract_ffmpeg_version(&banner).unwrap_or(banner);
                tools.push(ToolVersion {
                    name: name.clone(),
                    version,
                });
            }
            Err(CoreError::DependencyNotFound(_)) => missing.push(name.clone()),
            Err(e) => return Err(e),
        }
    }

    if !missing.is_empty() {
        return Err(CoreError::MissingTools(missing));
    }
    Ok(StartupReport { homebrew, tools })
}

fn homebrew_version<R: CommandRunner>(runner: &R) -> Option<String> {
    match runner.run(BREW, &["--version"]) {
        Ok(out) => Some(first_line(&out).to_string()),
        Err(CoreError::DependencyNotFound(_)) => None,
        Err(e) => {
            log::debug!("brew --version failed: {e}");
            Some(String::new())
        }
    }
}

// ============================================================================
// LATEST VERSION CHECK
// ============================================================================

/// Outcome of a successful latest-version check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatestCheck {
    /// Installed ffmpeg matches Homebrew stable.
    UpToDate(String),
    /// Homebrew did not report a stable version; the check was skipped.
    Skipped,
}

/// Requires the installed ffmpeg to match Homebrew's stable release.
///
/// Fails with [`CoreError::UnsupportedPlatform`] off macOS or without
/// Homebrew, and with [`CoreError::VersionMismatch`] when the versions differ.
pub fn verify_latest<R: CommandRunner>(runner: &R, on_macos: bool) -> CoreResult<LatestCheck> {
    if !on_macos {
        return Err(CoreError::UnsupportedPlatform(
            "--require-latest is supported only on macOS".to_string(),
        ));
    }

    let latest = match runner.run(BREW, &["info", "--json=v2", "ffmpeg"]) {
        Ok(json) => parse_brew_stable_version(&json).unwrap_or_else(|e| {
            log::debug!("Unreadable brew info output: {e}");
            None
        }),
        Err(CoreError::DependencyNotFound(_)) => {
            return Err(CoreError::UnsupportedPlatform(
                "Homebrew not found; cannot check latest ffmpeg".to_string(),
            ));
        }
        Err(e) => {
            log::debug!("brew info failed: {e}");
            None
        }
    };

    let Some(latest) = latest else {
        log::debug!("brew info reported no stable ffmpeg version");
        return Ok(LatestCheck::Skipped);
    };

    let installed = check_dependency(runner, "ffmpeg")
        .ok()
        .and_then(|banner| extract_ffmpeg_version(&banner))
        .unwrap_or_default();

    if installed == latest {
        Ok(LatestCheck::UpToDate(latest))
    } else {
        Err(CoreError::VersionMismatch { installed, latest })
    }
}
