//! Windows detection via `wmic`

use super::SystemProbe;
use regex::Regex;
use std::sync::OnceLock;

/// COM port token followed by the chipset name on the same line
fn com_port_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(COM\d+).*CH340").expect("COM port pattern is valid")
    })
}

/// Extract the first COM port listed on a line that also mentions CH340
pub fn find_com_port(listing: &str) -> Option<String> {
    com_port_pattern()
        .captures(listing)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Query `wmic` for serial ports and pick the CH340 one
///
/// A failing or missing `wmic` counts as nothing found.
pub fn detect_windows<P: SystemProbe + ?Sized>(probe: &P) -> Option<String> {
    match probe.query("wmic", &["path", "Win32_SerialPort"]) {
        Ok(listing) => find_com_port(&listing),
        Err(e) => {
            log::debug!("wmic query failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fake::FakeProbe;
    use super::*;

    const LISTING: &str = "\
Availability  Caption                          DeviceID  Description
              Communications Port (COM1)       COM1      Communications Port
              USB-SERIAL CH340 (COM5)          COM5      USB-SERIAL CH340
";

    #[test]
    fn test_find_com_port_on_ch340_line() {
        assert_eq!(find_com_port(LISTING).as_deref(), Some("COM5"));
    }

    #[test]
    fn test_find_com_port_case_insensitive() {
        assert_eq!(
            find_com_port("com12  usb-serial ch340").as_deref(),
            Some("com12")
        );
    }

    #[test]
    fn test_find_com_port_does_not_span_lines() {
        let listing = "COM3  Prolific USB-to-Serial\nUSB-SERIAL CH340\n";
        assert_eq!(find_com_port(listing), None);
    }

    #[test]
    fn test_find_com_port_without_ch340() {
        assert_eq!(find_com_port("COM1 Communications Port\n"), None);
        assert_eq!(find_com_port(""), None);
    }

    #[test]
    fn test_detect_windows_query() {
        let probe = FakeProbe::new().with_reply("wmic path Win32_SerialPort", LISTING);
        assert_eq!(detect_windows(&probe).as_deref(), Some("COM5"));
    }

    #[test]
    fn test_detect_windows_tool_failure() {
        let probe = FakeProbe::new().with_failure("wmic path Win32_SerialPort");
        assert_eq!(detect_windows(&probe), None);

        let probe = FakeProbe::new();
        assert_eq!(detect_windows(&probe), None);
    }
}
