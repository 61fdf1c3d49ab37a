//! External tool invocation
//!
//! One narrow contract for every subprocess the tool runs: spawn, capture
//! both output streams fully, and turn any non-zero exit into a
//! [`ToolFailure`]. No shell, no retry, no timeout.

use std::ffi::{OsStr, OsString};
use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result, ToolFailure};

/// One fully constructed external command: program plus argument list.
///
/// Arguments are passed to the process verbatim; there is no shell
/// interpretation or metacharacter expansion anywhere.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a sequence of arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the program with the given working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arg_list(&self) -> &[OsString] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Short name used when reporting failures.
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|name| strip_windows_ext(name))
            .unwrap_or_else(|| self.program.display().to_string())
    }
}

/// Drops a `.exe`/`.bat` suffix so failure reports name the tool itself.
fn strip_windows_ext(name: &OsStr) -> String {
    let name = name.to_string_lossy();
    match name.strip_suffix(".exe").or_else(|| name.strip_suffix(".bat")) {
        Some(stripped) => stripped.to_string(),
        None => name.into_owned(),
    }
}

/// Runs one external command to completion.
///
/// The pipeline and scaffolder are generic over this trait so tests can
/// substitute a recording implementation for the real subprocess spawn.
pub trait ToolRunner {
    /// Run to completion, capturing output. Non-zero exit is an error.
    fn run(&self, invocation: Invocation) -> impl Future<Output = Result<()>> + Send;
}

/// The real runner, backed by `tokio::process`.
///
/// Blocks the calling flow until the subprocess exits; on success the
/// captured output is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    async fn run(&self, invocation: Invocation) -> Result<()> {
        debug!(
            "running {:?} with args {:?}",
            invocation.program(),
            invocation.arg_list()
        );

        let mut command = Command::new(invocation.program());
        command.args(invocation.arg_list());
        if let Some(dir) = invocation.working_dir() {
            command.current_dir(dir);
        }

        let output = command.output().await?;
        if !output.status.success() {
            return Err(Error::Tool(ToolFailure {
                tool: invocation.tool_name(),
                stage: None,
                code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }));
        }
        Ok(())
    }
}
