// vidprep-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::{CommandRunner, display_command};
use crate::error::{CoreError, CoreResult};
use std::cell::RefCell;
use std::ffi::OsStr;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

enum Reply {
    Output(String),
    Failure,
    Missing,
}

/// Scripted [`CommandRunner`] for unit tests.
///
/// Each expectation is matched as a substring of `"<program> <args...>"`; the
/// first match wins. Calls with no matching expectation fail as if the
/// program had exited non-zero.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: Vec<(String, Reply)>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, pattern: &str, output: &str) -> Self {
        self.replies.push((pattern.to_string(), Reply::Output(output.to_string())));
        self
    }

    pub fn fail(mut self, pattern: &str) -> Self {
        self.replies.push((pattern.to_string(), Reply::Failure));
        self
    }

    pub fn missing(mut self, program: &str) -> Self {
        self.replies.push((program.to_string(), Reply::Missing));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run<S: AsRef<OsStr>>(&self, program: &str, args: &[S]) -> CoreResult<String> {
        let line = display_command(program, args);
        self.calls.borrow_mut().push(line.clone());

        let reply = self
            .replies
            .iter()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map(|(_, reply)| reply);

        match reply {
            Some(Reply::Output(out)) => Ok(out.trim().to_string()),
            Some(Reply::Missing) => Err(CoreError::DependencyNotFound(program.to_string())),
            Some(Reply::Failure) | None => Err(CoreError::CommandFailed(
                program.to_string(),
                ExitStatus::from_raw(1 << 8),
                "scripted failure".to_string(),
            )),
        }
    }
}
