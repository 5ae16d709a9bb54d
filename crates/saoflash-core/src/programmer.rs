//! External programmer tool invocation
//!
//! saoflash does not talk UPDI itself. It hands every step to a
//! `pymcuprog`-compatible tool using a fixed argument vocabulary:
//!
//! ```text
//! pymcuprog ping  -t uart -u <port> -d attiny1616
//! pymcuprog erase -t uart -u <port> -d attiny1616
//! pymcuprog write -t uart -u <port> -d attiny1616 -f <firmware.hex>
//! ```

use crate::firmware::Firmware;
use std::fmt;

/// Default programmer executable
pub const DEFAULT_TOOL: &str = "pymcuprog";

/// Default target device profile
pub const DEFAULT_DEVICE: &str = "attiny1616";

/// Transport selector; the badges are programmed over serial UPDI
pub const TRANSPORT: &str = "uart";

/// Programmer sub-commands used by the flash cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Check that the target answers
    Ping,
    /// Chip erase
    Erase,
    /// Program the firmware image
    Write,
}

impl Action {
    /// Sub-command name, also used as the label shown to the operator
    pub fn name(self) -> &'static str {
        match self {
            Action::Ping => "ping",
            Action::Erase => "erase",
            Action::Write => "write",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which tool to run and which part it should target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammerConfig {
    /// Executable name or path
    pub tool: String,
    /// Device profile passed with `-d`
    pub device: String,
}

impl Default for ProgrammerConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            device: DEFAULT_DEVICE.to_string(),
        }
    }
}

impl ProgrammerConfig {
    /// Use a different programmer executable
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Target a different device profile
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    /// Full argument vector (tool first) for `action` against `port`
    pub fn command(&self, action: Action, port: &str, firmware: &Firmware) -> Vec<String> {
        let mut argv = vec![
            self.tool.clone(),
            action.name().to_string(),
            "-t".to_string(),
            TRANSPORT.to_string(),
            "-u".to_string(),
            port.to_string(),
            "-d".to_string(),
            self.device.clone(),
        ];
        if action == Action::Write {
            argv.push("-f".to_string());
            argv.push(firmware.as_arg());
        }
        argv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn firmware() -> (tempfile::TempDir, Firmware) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sao.hex");
        File::create(&path).unwrap();
        let firmware = Firmware::from_path(&path).unwrap();
        (dir, firmware)
    }

    #[test]
    fn test_ping_and_erase_templates() {
        let (_dir, fw) = firmware();
        let config = ProgrammerConfig::default();

        assert_eq!(
            config.command(Action::Ping, "/dev/ttyUSB0", &fw),
            ["pymcuprog", "ping", "-t", "uart", "-u", "/dev/ttyUSB0", "-d", "attiny1616"]
        );
        assert_eq!(
            config.command(Action::Erase, "COM5", &fw),
            ["pymcuprog", "erase", "-t", "uart", "-u", "COM5", "-d", "attiny1616"]
        );
    }

    #[test]
    fn test_write_template_appends_firmware() {
        let (_dir, fw) = firmware();
        let argv = ProgrammerConfig::default().command(Action::Write, "/dev/ttyUSB1", &fw);

        assert_eq!(argv.len(), 10);
        assert_eq!(argv[1], "write");
        assert_eq!(argv[8], "-f");
        assert_eq!(argv[9], fw.as_arg());
    }

    #[test]
    fn test_custom_tool_and_device() {
        let (_dir, fw) = firmware();
        let config = ProgrammerConfig::default()
            .with_tool("/opt/venv/bin/pymcuprog")
            .with_device("attiny3216");
        let argv = config.command(Action::Ping, "COM3", &fw);

        assert_eq!(argv[0], "/opt/venv/bin/pymcuprog");
        assert_eq!(argv[7], "attiny3216");
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(Action::Ping.to_string(), "ping");
        assert_eq!(Action::Erase.to_string(), "erase");
        assert_eq!(Action::Write.to_string(), "write");
    }
}
