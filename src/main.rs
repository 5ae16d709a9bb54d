//! saoflash - Bench tool for flashing SAO badges
//!
//! Finds a CH340 USB-serial adapter, then drives `pymcuprog` to ping, erase
//! and write an ATtiny1616 over UART. After each board the operator swaps
//! in the next one and presses ENTER; the loop runs until interrupted.

mod cli;

use clap::Parser;
use cli::{Cli, USAGE_LINE};
use saoflash_core::cycle::{FlashCycle, StdinOperator};
use saoflash_core::detect::{FixedPort, PortDetector, SystemDetector};
use saoflash_core::firmware::Firmware;
use saoflash_core::programmer::ProgrammerConfig;
use saoflash_core::runner::{CommandRunner, DryRunRunner, ProcessRunner};
use saoflash_core::FirmwareError;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            e.print()?;
            return Ok(());
        }
        Err(e) => {
            // clap's diagnostic already carries the usage line
            e.print()?;
            std::process::exit(1);
        }
    };

    // Initialize logger, with -v raising the default level
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match cli.verbose {
        0 => {}
        1 => {
            logger.filter_level(log::LevelFilter::Debug);
        }
        _ => {
            logger.filter_level(log::LevelFilter::Trace);
        }
    }
    logger.init();

    let firmware = match Firmware::from_path(&cli.firmware) {
        Ok(firmware) => firmware,
        Err(FirmwareError::BadExtension { .. }) => {
            println!("Usage: {}", USAGE_LINE);
            std::process::exit(1);
        }
        Err(e @ FirmwareError::NotFound(_)) => {
            println!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("Firmware: {}", firmware);

    let programmer = ProgrammerConfig::default()
        .with_tool(cli.tool)
        .with_device(cli.device);

    let mut detector: Box<dyn PortDetector> = match cli.port {
        Some(port) => {
            log::info!("Using fixed port {}", port);
            Box::new(FixedPort(port))
        }
        None => {
            let detector = SystemDetector::host();
            log::debug!("Detecting CH340 ports for {}", detector.platform());
            Box::new(detector)
        }
    };

    let mut runner: Box<dyn CommandRunner> = if cli.dry_run {
        log::info!("Dry run: programmer commands are printed, not executed");
        Box::new(DryRunRunner::stdout())
    } else {
        Box::new(ProcessRunner::stdout())
    };

    let mut operator = StdinOperator::stdin();
    let mut out = std::io::stdout();

    let mut cycle = FlashCycle::new(
        &firmware,
        &programmer,
        &mut *detector,
        &mut *runner,
        &mut operator,
        &mut out,
    );

    if let Err(e) = cycle.run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}
