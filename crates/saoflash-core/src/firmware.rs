//! Firmware image argument
//!
//! The image itself is never parsed; the programmer tool reads it. We only
//! check that the operator pointed us at something that looks like an
//! Intel HEX file and that it is actually there.

use crate::error::{FirmwareError, FirmwareResult};
use std::fmt;
use std::path::{Path, PathBuf};

/// Required suffix of the firmware path (Intel HEX)
pub const FIRMWARE_EXTENSION: &str = ".hex";

/// A validated firmware image path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Firmware {
    path: PathBuf,
}

impl Firmware {
    /// Validate `path` and wrap it
    ///
    /// The suffix check is done on the path text and is case-sensitive, so
    /// `image.HEX` is rejected. The extension is checked before existence.
    pub fn from_path(path: impl AsRef<Path>) -> FirmwareResult<Self> {
        let path = path.as_ref();

        if !has_firmware_extension(path) {
            return Err(FirmwareError::BadExtension {
                path: path.to_path_buf(),
                extension: FIRMWARE_EXTENSION,
            });
        }

        if !path.is_file() {
            return Err(FirmwareError::NotFound(path.to_path_buf()));
        }

        log::debug!("Firmware image: {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path as given by the operator
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path rendered as a command-line argument
    pub fn as_arg(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl fmt::Display for Firmware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Check the textual suffix of a path
pub fn has_firmware_extension(path: &Path) -> bool {
    path.to_str()
        .is_some_and(|s| s.ends_with(FIRMWARE_EXTENSION))
}
