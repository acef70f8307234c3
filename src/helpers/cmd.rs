//! Checked external tool execution
//!
//! Every subprocess the cache starts (git, the dependency installer) goes
//! through [`ToolCmd`]. Exit status is always checked and stderr is captured,
//! so a failing tool surfaces as [`FetchError::ExternalToolFailure`] instead
//! of being ignored.

use crate::core::error::{FetchError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Builder for an external tool invocation.
///
/// # Example
/// ```ignore
/// ToolCmd::new("git")
///     .args(["pull"])
///     .dir("/cache/Burger")
///     .run()?;
/// ```
#[derive(Debug, Clone)]
pub struct ToolCmd {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ToolCmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Build from an argv list such as `["pip", "install", "six"]`.
    ///
    /// Returns `None` for an empty list.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone()).args(args.iter().cloned()))
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the command.
    pub fn dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    /// Run to completion and return captured stdout.
    ///
    /// Failing to start the process and a nonzero exit are both
    /// `ExternalToolFailure`.
    pub fn run(&self) -> Result<String> {
        let output = self
            .build_command()
            .output()
            .map_err(|e| FetchError::ExternalToolFailure {
                cmd: self.display_cmd(),
                code: None,
                stderr: format!("failed to start: {}", e),
            })?;

        if !output.status.success() {
            return Err(FetchError::ExternalToolFailure {
                cmd: self.display_cmd(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Command line for messages, including the working directory if set.
    pub fn display_cmd(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        match self.cwd {
            Some(ref cwd) => format!("{} (in {})", line, cwd.display()),
            None => line,
        }
    }
}
