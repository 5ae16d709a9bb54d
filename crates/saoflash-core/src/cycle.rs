//! Interactive flash cycle
//!
//! One iteration of the cycle is:
//!
//! ```text
//! SEARCHING --no port--> "No CH340 device found." -> ENTER -> SEARCHING
//!     |
//!   port
//!     v
//!   ping --failed--> ENTER -> SEARCHING
//!     |
//!    ok
//!     v
//!   ENTER -> erase -> write -> "Done." -> ENTER -> SEARCHING
//! ```
//!
//! The loop never ends on its own. It stops only when the operator's input
//! goes away (end of file on stdin) or writing to the terminal fails.

use crate::detect::PortDetector;
use crate::error::{CycleError, Result};
use crate::firmware::Firmware;
use crate::programmer::{Action, ProgrammerConfig};
use crate::runner::CommandRunner;
use std::io::{self, BufRead, Write};

/// Printed when detection comes up empty
pub const NO_DEVICE_MESSAGE: &str = "No CH340 device found.";

/// Printed after the write step, whatever its outcome
pub const DONE_MESSAGE: &str = "Done.";

/// Prompt shown while waiting for the operator
pub const ACK_PROMPT: &str = "Press ENTER to continue...";

/// The person at the bench
pub trait Operator {
    /// Block until the operator confirms they are ready to continue
    fn acknowledge(&mut self) -> Result<()>;
}

/// [`Operator`] that prints a prompt and waits for a line of input
pub struct PromptOperator<R, W> {
    input: R,
    output: W,
}

/// Operator on the process terminal
pub type StdinOperator = PromptOperator<io::StdinLock<'static>, io::Stdout>;

impl<R: BufRead, W: Write> PromptOperator<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl StdinOperator {
    /// Operator reading from stdin and prompting on stdout
    pub fn stdin() -> Self {
        PromptOperator::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Operator for PromptOperator<R, W> {
    fn acknowledge(&mut self) -> Result<()> {
        write!(self.output, "{}", ACK_PROMPT)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CycleError::InputClosed);
        }
        Ok(())
    }
}

/// How an iteration of the cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Detection found nothing
    NoDevice,
    /// The target did not answer the ping
    PingFailed { port: String },
    /// Erase and write were run (their results are not checked)
    Flashed { port: String },
}

/// The detect / ping / erase / write loop
pub struct FlashCycle<'a> {
    firmware: &'a Firmware,
    programmer: &'a ProgrammerConfig,
    detector: &'a mut dyn PortDetector,
    runner: &'a mut dyn CommandRunner,
    operator: &'a mut dyn Operator,
    out: &'a mut dyn Write,
}

impl<'a> FlashCycle<'a> {
    pub fn new(
        firmware: &'a Firmware,
        programmer: &'a ProgrammerConfig,
        detector: &'a mut dyn PortDetector,
        runner: &'a mut dyn CommandRunner,
        operator: &'a mut dyn Operator,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            firmware,
            programmer,
            detector,
            runner,
            operator,
            out,
        }
    }

    /// Run iterations until acknowledgment or output fails
    pub fn run(&mut self) -> Result<()> {
        loop {
            let step = self.step()?;
            log::debug!("Cycle step finished: {:?}", step);
        }
    }

    /// Run a single iteration, starting from port detection
    pub fn step(&mut self) -> Result<Step> {
        let port = match self.detector.detect() {
            Some(port) => port,
            None => {
                writeln!(self.out, "{}", NO_DEVICE_MESSAGE)?;
                self.operator.acknowledge()?;
                return Ok(Step::NoDevice);
            }
        };

        writeln!(self.out, "Using port: {}", port)?;
        self.out.flush()?;

        if !self.invoke(Action::Ping, &port) {
            self.operator.acknowledge()?;
            return Ok(Step::PingFailed { port });
        }

        self.operator.acknowledge()?;

        // Erase and write outcomes are left to the operator reading the
        // tool output; write runs even if erase failed.
        self.invoke(Action::Erase, &port);
        self.invoke(Action::Write, &port);

        writeln!(self.out, "{}", DONE_MESSAGE)?;
        self.operator.acknowledge()?;
        Ok(Step::Flashed { port })
    }

    fn invoke(&mut self, action: Action, port: &str) -> bool {
        let argv = self.programmer.command(action, port, self.firmware);
        self.out.flush().ok();
        self.runner.run(action.name(), &argv)
    }
}
