//! External command execution.

use crate::error::{InstallError, Result, Termination};
use crate::secrets::OutputMasker;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;

/// A program and its argument tokens, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name, resolved on PATH at execution time.
    pub program: String,

    /// Argument tokens, passed to the program as-is.
    pub args: Vec<String>,

    /// Indices into `args` to mask when the command line is rendered.
    pub redact: Vec<usize>,
}

impl Invocation {
    /// Create an invocation with no redacted values.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            redact: Vec::new(),
        }
    }

    /// Mask the argument at `index` in the rendered command line.
    pub fn redacting(mut self, index: usize) -> Self {
        self.redact.push(index);
        self
    }

    /// Arguments joined with single spaces.
    pub fn args_line(&self) -> String {
        self.args.join(" ")
    }

    /// Render `<program> <args...>` for display.
    ///
    /// Arguments are joined with raw spaces and are not shell-quoted, so a
    /// line whose arguments contain whitespace cannot be pasted back into a
    /// shell verbatim.
    /// Redacted arguments are replaced whole; the program and every other
    /// token print exactly as they are passed.
    pub fn render(&self, program: &str) -> String {
        if self.redact.is_empty() {
            return format!("{} {}", program, self.args_line());
        }
        let mut masker = OutputMasker::new();
        masker.add_positions(self.redact.iter().copied());
        format!("{} {}", program, masker.mask_args(&self.args).join(" "))
    }
}

/// Output chunk from a running command.
#[derive(Debug, Clone)]
pub enum OutputChunk {
    Stdout(Vec<u8>),
    Stderr(Vec<u8>),
}

/// Something that can run an [`Invocation`] to completion.
pub trait CommandRunner {
    /// Run the invocation, blocking until it exits.
    ///
    /// # Errors
    ///
    /// `LaunchFailed` if the process could not start, `ExecutionFailed` if
    /// it exited unsuccessfully.
    fn run(&mut self, invocation: &Invocation) -> Result<()>;
}

/// Runs commands for real, forwarding their output into two writers.
pub struct StreamingRunner<O: Write, E: Write> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> StreamingRunner<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Give back the output and error writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> CommandRunner for StreamingRunner<O, E> {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        execute_streaming(invocation, &mut self.out, &mut self.err)
    }
}

/// Find `program` on PATH, falling back to the bare name.
pub fn resolve_program(program: &str) -> PathBuf {
    which::which(program).unwrap_or_else(|_| PathBuf::from(program))
}

/// Execute an invocation with streaming output.
///
/// The rendered command line is written to `out` before the process starts.
/// Stdout and stderr of the child are forwarded to `out` and `err` as they
/// arrive. No timeout is applied.
pub fn execute_streaming(
    invocation: &Invocation,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let path = resolve_program(&invocation.program);
    let command_line = invocation.render(&path.to_string_lossy());

    writeln!(out, "{}", command_line)?;
    out.flush()?;
    tracing::debug!("Spawning: {}", command_line);

    let mut child = Command::new(&path)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| InstallError::LaunchFailed {
            command: command_line.clone(),
            source,
        })?;

    let (tx, rx) = mpsc::channel();
    let mut pumps = Vec::new();

    if let Some(stdout) = child.stdout.take() {
        let tx = tx.clone();
        pumps.push(thread::spawn(move || {
            if let Err(e) = pump(stdout, |chunk| tx.send(OutputChunk::Stdout(chunk)).is_ok()) {
                tracing::warn!("Reading command stdout failed, output may be truncated: {}", e);
            }
        }));
    }
    if let Some(stderr) = child.stderr.take() {
        let tx = tx.clone();
        pumps.push(thread::spawn(move || {
            if let Err(e) = pump(stderr, |chunk| tx.send(OutputChunk::Stderr(chunk)).is_ok()) {
                tracing::warn!("Reading command stderr failed, output may be truncated: {}", e);
            }
        }));
    }
    drop(tx);

    // Keep draining after a failed write so the child never blocks on a full pipe.
    let mut write_error = None;
    for chunk in rx {
        let written = match chunk {
            OutputChunk::Stdout(bytes) => out.write_all(&bytes).and_then(|_| out.flush()),
            OutputChunk::Stderr(bytes) => err.write_all(&bytes).and_then(|_| err.flush()),
        };
        if let Err(e) = written {
            write_error = write_error.or(Some(e));
        }
    }

    for handle in pumps {
        if handle.join().is_err() {
            tracing::warn!("Output reader for '{}' panicked", command_line);
        }
    }

    let status = child.wait()?;

    if let Some(e) = write_error {
        return Err(InstallError::Io(e));
    }

    if status.success() {
        tracing::debug!("Command succeeded: {}", command_line);
        Ok(())
    } else {
        Err(InstallError::ExecutionFailed {
            command: command_line,
            termination: Termination::from_status(status),
        })
    }
}

/// Forward lines from `reader` until EOF, a read error, or `send` refusing.
fn pump<R: Read>(reader: R, mut send: impl FnMut(Vec<u8>) -> bool) -> io::Result<()> {
    let mut reader = BufReader::new(reader);
    loop {
        let mut chunk = Vec::new();
        if reader.read_until(b'\n', &mut chunk)? == 0 || !send(chunk) {
            return Ok(());
        }
    }
}
