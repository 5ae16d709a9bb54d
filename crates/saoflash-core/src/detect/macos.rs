//! macOS detection by device node name

use super::{matching_nodes, SystemProbe};

/// Node name prefixes the WCH driver uses, in lookup order
pub const MACOS_NODE_PREFIXES: &[&str] = &["tty.wchusbserial", "cu.wchusbserial"];

/// Return the first WCH serial node; presence alone counts as a match
pub fn detect_macos<P: SystemProbe + ?Sized>(probe: &P) -> Option<String> {
    MACOS_NODE_PREFIXES
        .iter()
        .flat_map(|prefix| matching_nodes(probe, "/dev", prefix))
        .next()
}

#[cfg(test)]
mod tests {
    use super::super::fake::FakeProbe;
    use super::*;

    #[test]
    fn test_tty_preferred_over_cu() {
        let probe = FakeProbe::new().with_dir(
            "/dev",
            &["cu.wchusbserial1410", "tty.wchusbserial1410", "tty.Bluetooth"],
        );
        assert_eq!(
            detect_macos(&probe).as_deref(),
            Some("/dev/tty.wchusbserial1410")
        );
    }

    #[test]
    fn test_cu_only() {
        let probe = FakeProbe::new().with_dir("/dev", &["cu.wchusbserial1420", "cu.usbmodem1"]);
        assert_eq!(
            detect_macos(&probe).as_deref(),
            Some("/dev/cu.wchusbserial1420")
        );
    }

    #[test]
    fn test_nothing_attached() {
        let probe = FakeProbe::new().with_dir("/dev", &["cu.usbserial-A10", "tty.usbmodem1"]);
        assert_eq!(detect_macos(&probe), None);
        assert!(probe.queries.borrow().is_empty());
    }
}
