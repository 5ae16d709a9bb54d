//! Running external commands
//!
//! The programmer tool writes its own progress and diagnostics, so output is
//! never captured: the child inherits our stdin, stdout and stderr. The only
//! thing we look at is the exit status.

use std::io::{self, Write};
use std::process::Command;

/// Runs an external command and reports whether it succeeded
pub trait CommandRunner {
    /// Print `label`, run `argv[0]` with the remaining arguments, and return
    /// `true` only if it exited with status zero
    ///
    /// Failures to start the command count as failures and are not
    /// propagated.
    fn run(&mut self, label: &str, argv: &[String]) -> bool;
}

/// [`CommandRunner`] that spawns real processes
///
/// Labels and error lines go to `out`; the child writes straight to the
/// inherited terminal.
#[derive(Debug)]
pub struct ProcessRunner<W = io::Stdout> {
    out: W,
}

impl ProcessRunner<io::Stdout> {
    /// Runner reporting on stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ProcessRunner<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the output sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn spawn(label: &str, argv: &[String]) -> bool {
        let Some((program, args)) = argv.split_first() else {
            log::error!("No command given for {}", label);
            return false;
        };

        log::debug!("Running: {}", argv.join(" "));
        match Command::new(program).args(args).status() {
            Ok(status) => {
                log::debug!("{} exited with {}", program, status);
                status.success()
            }
            Err(e) => {
                log::error!("Failed to run {}: {}", program, e);
                false
            }
        }
    }
}

impl<W: Write> CommandRunner for ProcessRunner<W> {
    fn run(&mut self, label: &str, argv: &[String]) -> bool {
        // Output errors do not affect the command result
        writeln!(self.out, "{}", label).ok();
        self.out.flush().ok();

        let ok = Self::spawn(label, argv);
        if !ok {
            writeln!(self.out, "Error during: {}", label).ok();
        }
        ok
    }
}

/// [`CommandRunner`] that only prints what it would run
///
/// Every command reports success, so the cycle goes all the way through.
#[derive(Debug)]
pub struct DryRunRunner<W = io::Stdout> {
    out: W,
}

impl DryRunRunner<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> DryRunRunner<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CommandRunner for DryRunRunner<W> {
    fn run(&mut self, label: &str, argv: &[String]) -> bool {
        writeln!(self.out, "{}", label).ok();
        writeln!(self.out, "  would run: {}", argv.join(" ")).ok();
        true
    }
}
