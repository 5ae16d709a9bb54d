//! CLI argument parsing

use clap::Parser;
use saoflash_core::programmer::{DEFAULT_DEVICE, DEFAULT_TOOL};
use std::path::PathBuf;

/// Usage synopsis, shared by clap's diagnostics and our own argument errors
pub const USAGE_LINE: &str = "saoflash [OPTIONS] [--] <FIRMWARE.hex>";

#[derive(Parser, Debug)]
#[command(name = "saoflash")]
#[command(
    author,
    version,
    about = "Find a CH340 adapter and flash an ATtiny1616 over UART, one badge after another",
    long_about = None,
    override_usage = USAGE_LINE
)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Programmer executable (pymcuprog compatible)
    #[arg(long, default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Target device profile
    #[arg(short, long, default_value = DEFAULT_DEVICE)]
    pub device: String,

    /// Serial port to use instead of auto-detecting a CH340
    #[arg(short, long)]
    pub port: Option<String>,

    /// Print programmer commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Firmware image in Intel HEX format (*.hex); put `--` before paths starting with '-'
    pub firmware: PathBuf,
}
