//! CH340 serial port detection
//!
//! Each platform exposes USB-serial adapters differently, so detection is
//! dispatched on [`Platform`]:
//!
//! - Linux: `/dev/ttyUSB*` nodes, confirmed through `udevadm` metadata
//! - macOS: `/dev/tty.wchusbserial*` and `/dev/cu.wchusbserial*` nodes
//! - Windows: COM ports reported by `wmic path Win32_SerialPort`
//!
//! All filesystem and tool access goes through [`SystemProbe`], which keeps
//! the matching logic testable on any host.

mod linux;
mod macos;
mod windows;

pub use linux::{detect_linux, LINUX_ID_MARKERS, LINUX_NODE_PREFIX};
pub use macos::{detect_macos, MACOS_NODE_PREFIXES};
pub use windows::{detect_windows, find_com_port};

use crate::platform::Platform;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Read-only access to the host used by the detectors
pub trait SystemProbe {
    /// Names of the entries in `dir`
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Run `program` with `args` and return its standard output
    ///
    /// Fails when the program cannot be started or exits non-zero.
    fn query(&self, program: &str, args: &[&str]) -> io::Result<String>;
}

/// [`SystemProbe`] backed by the real filesystem and process table
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProbe;

impl SystemProbe for HostProbe {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let entries = std::fs::read_dir(dir)?.map(|entry| entry.map(|e| e.file_name()));
        Ok(readable_names(entries))
    }

    fn query(&self, program: &str, args: &[&str]) -> io::Result<String> {
        log::trace!("Running {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{} exited with {}",
                program, output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Entry names that could be read and are valid UTF-8
///
/// One unreadable entry (e.g. a node that vanished mid-listing) is skipped
/// rather than discarding the whole listing.
fn readable_names<I>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = io::Result<OsString>>,
{
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(name) => name.into_string().ok(),
            Err(e) => {
                log::debug!("Skipping unreadable directory entry: {}", e);
                None
            }
        })
        .collect()
}

/// Something that can name the serial port to program through
pub trait PortDetector {
    /// Look for a port; `None` when nothing suitable is attached
    fn detect(&mut self) -> Option<String>;
}

/// Platform-dispatched detector
#[derive(Debug, Clone)]
pub struct SystemDetector<P: SystemProbe = HostProbe> {
    platform: Platform,
    probe: P,
}

impl SystemDetector<HostProbe> {
    /// Detector for the platform this binary runs on
    pub fn host() -> Self {
        Self::new(Platform::current(), HostProbe)
    }
}

impl<P: SystemProbe> SystemDetector<P> {
    /// Create a detector for `platform` using `probe` for system access
    pub fn new(platform: Platform, probe: P) -> Self {
        Self { platform, probe }
    }

    /// Platform this detector dispatches on
    pub fn platform(&self) -> Platform {
        self.platform
    }
}

impl<P: SystemProbe> PortDetector for SystemDetector<P> {
    fn detect(&mut self) -> Option<String> {
        let port = match self.platform {
            Platform::Linux => detect_linux(&self.probe),
            Platform::MacOs => detect_macos(&self.probe),
            Platform::Windows => detect_windows(&self.probe),
            Platform::Other => {
                log::debug!("No port detection available on this platform");
                None
            }
        };
        log::debug!("Detection on {}: {:?}", self.platform, port);
        port
    }
}

/// Detector that always returns the port the operator named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedPort(pub String);

impl PortDetector for FixedPort {
    fn detect(&mut self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Full paths of the entries in `dir` whose name starts with `prefix`
///
/// Results are sorted so detection is stable across calls. An unreadable
/// directory yields no candidates.
pub(crate) fn matching_nodes<P: SystemProbe + ?Sized>(
    probe: &P,
    dir: &str,
    prefix: &str,
) -> Vec<String> {
    let names = match probe.list_dir(Path::new(dir)) {
        Ok(names) => names,
        Err(e) => {
            log::debug!("Cannot list {}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut nodes: Vec<String> = names
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .map(|name| format!("{}/{}", dir.trim_end_matches('/'), name))
        .collect();
    nodes.sort();
    nodes
}
