//! saoflash-core - Building blocks for the saoflash operator loop
//!
//! This crate contains everything the `saoflash` binary needs apart from
//! argument parsing:
//!
//! - [`firmware`] - validation of the firmware image argument
//! - [`platform`] - host operating system family
//! - [`detect`] - locating a CH340 USB-serial adapter per platform
//! - [`programmer`] - argument templates for the external programmer tool
//! - [`runner`] - running external commands with forwarded stdio
//! - [`cycle`] - the interactive detect/ping/erase/write loop
//!
//! Every interaction with the outside world (listing `/dev`, running
//! `udevadm`, spawning the programmer, waiting for ENTER) goes through a
//! trait so the loop can be driven by test doubles.
//!
//! # Example
//!
//! ```no_run
//! use saoflash_core::cycle::{FlashCycle, StdinOperator};
//! use saoflash_core::detect::SystemDetector;
//! use saoflash_core::firmware::Firmware;
//! use saoflash_core::programmer::ProgrammerConfig;
//! use saoflash_core::runner::ProcessRunner;
//!
//! let firmware = Firmware::from_path("badge.hex")?;
//! let programmer = ProgrammerConfig::default();
//! let mut detector = SystemDetector::host();
//! let mut runner = ProcessRunner::stdout();
//! let mut operator = StdinOperator::stdin();
//! let mut out = std::io::stdout();
//!
//! let mut cycle = FlashCycle::new(
//!     &firmware,
//!     &programmer,
//!     &mut detector,
//!     &mut runner,
//!     &mut operator,
//!     &mut out,
//! );
//! cycle.run()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cycle;
pub mod detect;
pub mod error;
pub mod firmware;
pub mod platform;
pub mod programmer;
pub mod runner;

pub use error::{CycleError, FirmwareError};
