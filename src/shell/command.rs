//! External command execution.

use crate::error::{Result, ShipcheckError};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use super::platform::{shell_flag, shell_program};

/// How often a running child is polled while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How long to keep reading after a kill, for output still in the pipes.
const DRAIN_GRACE: Duration = Duration::from_millis(250);

/// What to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// A command line handed to the platform shell (`/bin/sh -c`).
    Shell(String),
    /// A program and its arguments, executed without a shell.
    Program(Vec<String>),
}

impl CommandSpec {
    /// Create a shell command.
    pub fn shell(command: impl Into<String>) -> Self {
        Self::Shell(command.into())
    }

    /// Create a program invocation from an argument list.
    pub fn program<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Program(args.into_iter().map(Into::into).collect())
    }

    /// Reject specs that cannot name an executable.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Shell(line) if line.trim().is_empty() => Err(ShipcheckError::InvalidCommand {
                message: "shell command is empty".to_string(),
            }),
            Self::Program(args) if args.first().is_none_or(|p| p.trim().is_empty()) => {
                Err(ShipcheckError::InvalidCommand {
                    message: "program argument list is empty".to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn to_command(&self) -> Command {
        match self {
            Self::Shell(line) => {
                let mut cmd = Command::new(shell_program());
                cmd.arg(shell_flag()).arg(line);
                cmd
            }
            Self::Program(args) => {
                let mut cmd = Command::new(&args[0]);
                cmd.args(&args[1..]);
                cmd
            }
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shell(line) => f.write_str(line),
            Self::Program(args) => {
                let quoted: Vec<String> = args
                    .iter()
                    .map(|a| {
                        if a.is_empty() || a.contains(char::is_whitespace) {
                            format!("'{}'", a)
                        } else {
                            a.clone()
                        }
                    })
                    .collect();
                f.write_str(&quoted.join(" "))
            }
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Kill the command once it has run this long (None = no timeout).
    pub timeout: Option<Duration>,
}

/// Result of running a command to completion or to its deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command was killed because it hit its timeout.
    pub timed_out: bool,
}

impl CommandOutcome {
    /// A command that exited on its own (code is None when killed by a signal).
    pub fn exited(
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration,
            timed_out: false,
        }
    }

    /// A command killed at its deadline, with whatever output it produced.
    pub fn timed_out(
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code: None,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration,
            timed_out: true,
        }
    }

    /// Whether the command exited with status zero.
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Capability for running external commands.
///
/// `Err` means the command never started (invalid spec, missing executable,
/// missing working directory). Timeouts and non-zero exits are outcomes.
pub trait CommandExecutor {
    /// Run `spec` to completion or until `options.timeout` expires.
    fn execute(&self, spec: &CommandSpec, options: &CommandOptions) -> Result<CommandOutcome>;
}

/// Executor that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&self, spec: &CommandSpec, options: &CommandOptions) -> Result<CommandOutcome> {
        execute(spec, options)
    }
}

/// Execute a command, capturing stdout and stderr.
pub fn execute(spec: &CommandSpec, options: &CommandOptions) -> Result<CommandOutcome> {
    spec.validate()?;

    if let Some(cwd) = &options.cwd {
        if !cwd.is_dir() {
            return Err(ShipcheckError::WorkingDirNotFound { path: cwd.clone() });
        }
    }

    let start = Instant::now();
    let mut cmd = spec.to_command();

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    // Own process group, so a timeout can take down everything the shell started.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let mut child = cmd.spawn().map_err(|e| ShipcheckError::SpawnFailed {
        command: spec.to_string(),
        message: e.to_string(),
    })?;

    tracing::debug!(pid = child.id(), command = %spec, "spawned");

    // Drain both pipes concurrently; a full pipe would otherwise stall the child.
    let mut capture = OutputCapture::start(&mut child);

    // A deadline past the end of `Instant` is no deadline at all.
    let deadline = options.timeout.and_then(|t| start.checked_add(t));
    let status = match wait_until(&mut child, deadline) {
        Ok(status) => status,
        Err(e) => {
            kill_process_tree(&mut child);
            let _ = child.wait();
            return Err(ShipcheckError::Io(e));
        }
    };

    // The shell can exit while a background job still holds its pipes open.
    // The check is only finished once both pipes reach EOF.
    let finished = match status {
        Some(status) if capture.wait_for_eof(deadline) => Some(status),
        Some(_) => {
            tracing::debug!(command = %spec, "output still open at deadline");
            None
        }
        None => None,
    };

    if finished.is_none() {
        kill_process_tree(&mut child);
        let _ = child.wait();
        capture.wait_for_eof(Some(Instant::now() + DRAIN_GRACE));
    }

    let (stdout, stderr) = capture.take();
    let duration = start.elapsed();

    match finished {
        Some(status) => {
            tracing::debug!(code = ?status.code(), ?duration, command = %spec, "exited");
            Ok(CommandOutcome::exited(
                status.code(),
                stdout,
                stderr,
                duration,
            ))
        }
        None => {
            tracing::debug!(?duration, command = %spec, "timed out");
            Ok(CommandOutcome::timed_out(stdout, stderr, duration))
        }
    }
}

/// Wait for the child; `Ok(None)` means the deadline passed first.
fn wait_until(child: &mut Child, deadline: Option<Instant>) -> std::io::Result<Option<ExitStatus>> {
    let Some(deadline) = deadline else {
        return child.wait().map(Some);
    };

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Kill the child's process group, or just the child where groups are unavailable.
///
/// The group id outlives the shell itself, so this also reaches background
/// jobs after the shell has been reaped.
fn kill_process_tree(child: &mut Child) {
    #[cfg(unix)]
    {
        // SAFETY: kill(2) with a negative pid signals the process group that
        // `process_group(0)` created for this child; it touches no memory.
        let rc = unsafe { libc::kill(-(child.id() as libc::pid_t), libc::SIGKILL) };
        if rc == 0 {
            return;
        }
        tracing::debug!(pid = child.id(), "process group kill failed, killing child only");
    }

    if let Err(e) = child.kill() {
        tracing::warn!(pid = child.id(), error = %e, "failed to kill timed-out command");
    }
}

type SharedBuffer = Arc<Mutex<Vec<u8>>>;

/// Captured stdout and stderr, filled by one reader thread per pipe.
///
/// Buffers are shared so that output read before a deadline survives even
/// when a reader never sees EOF.
struct OutputCapture {
    stdout: SharedBuffer,
    stderr: SharedBuffer,
    eof: Receiver<()>,
    open: usize,
}

impl OutputCapture {
    fn start(child: &mut Child) -> Self {
        let (tx, eof) = mpsc::channel();
        let stdout = SharedBuffer::default();
        let stderr = SharedBuffer::default();
        let mut open = 0;

        if let Some(stream) = child.stdout.take() {
            spawn_reader(stream, Arc::clone(&stdout), tx.clone());
            open += 1;
        }
        if let Some(stream) = child.stderr.take() {
            spawn_reader(stream, Arc::clone(&stderr), tx);
            open += 1;
        }

        Self {
            stdout,
            stderr,
            eof,
            open,
        }
    }

    /// Wait until every pipe is closed; `false` means the deadline passed first.
    fn wait_for_eof(&mut self, deadline: Option<Instant>) -> bool {
        while self.open > 0 {
            let received = match deadline {
                None => self.eof.recv().map_err(|_| RecvTimeoutError::Disconnected),
                Some(deadline) => self
                    .eof
                    .recv_timeout(deadline.saturating_duration_since(Instant::now())),
            };

            match received {
                Ok(()) => self.open -= 1,
                Err(RecvTimeoutError::Timeout) => return false,
                // Every reader is gone, closed or not.
                Err(RecvTimeoutError::Disconnected) => self.open = 0,
            }
        }
        true
    }

    /// Whatever has been read so far, as (stdout, stderr).
    fn take(self) -> (String, String) {
        (drain(&self.stdout), drain(&self.stderr))
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut stream: R, buffer: SharedBuffer, eof: Sender<()>) {
    thread::spawn(move || {
        let mut chunk = [0u8; 8192];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => match buffer.lock() {
                    Ok(mut buf) => buf.extend_from_slice(&chunk[..n]),
                    Err(_) => break,
                },
            }
        }
        let _ = eof.send(());
    });
}

fn drain(buffer: &SharedBuffer) -> String {
    let bytes = buffer
        .lock()
        .map(|mut buf| std::mem::take(&mut *buf))
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}
