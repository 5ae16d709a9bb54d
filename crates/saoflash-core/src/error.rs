//! Error types for saoflash-core

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the firmware image argument
#[derive(Debug, Error)]
pub enum FirmwareError {
    /// The path does not end in the required extension
    #[error("Firmware path must end in {extension}: {path}")]
    BadExtension {
        path: PathBuf,
        extension: &'static str,
    },

    /// The path does not name an existing regular file
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Errors that end the interactive flash cycle
///
/// Detection and programmer failures never show up here; they are reported
/// to the operator and retried. Only losing the operator's terminal stops
/// the loop.
#[derive(Debug, Error)]
pub enum CycleError {
    /// The interactive input stream reached end of file
    #[error("Input stream closed while waiting for the operator")]
    InputClosed,

    /// Reading operator input or writing a message failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for firmware validation
pub type FirmwareResult<T> = std::result::Result<T, FirmwareError>;

/// Result type for the flash cycle
pub type Result<T> = std::result::Result<T, CycleError>;
