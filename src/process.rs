//! External program execution
//!
//! The finalize script, the manifest viewer and the OS launcher are all
//! "start a program, maybe wait for it". Components only see
//! [`ProcessRunner`], so tests can record invocations instead of spawning.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

/// A program to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Whether the caller waits for the program to exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitMode {
    Blocking,
    Detached,
}

/// What happened to a started program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exit code; `None` when terminated by a signal
    Exited(Option<i32>),
    /// Started and left running
    Spawned,
}

/// Starts external programs
pub trait ProcessRunner {
    fn run(&self, invocation: &Invocation, mode: WaitMode) -> io::Result<RunOutcome>;
}

/// Runs programs with `std::process::Command`, inheriting the terminal
#[derive(Debug, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &Invocation, mode: WaitMode) -> io::Result<RunOutcome> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }

        debug!(command = %invocation, ?mode, "starting process");
        match mode {
            WaitMode::Blocking => {
                let status = command.status()?;
                Ok(RunOutcome::Exited(status.code()))
            }
            WaitMode::Detached => {
                command
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null());
                command.spawn()?;
                Ok(RunOutcome::Spawned)
            }
        }
    }
}
