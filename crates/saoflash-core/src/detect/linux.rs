//! Linux detection via `udevadm`

use super::{matching_nodes, SystemProbe};

/// Name prefix of USB-serial device nodes under `/dev`
pub const LINUX_NODE_PREFIX: &str = "ttyUSB";

/// Substrings of `udevadm info` output that identify a CH340
pub const LINUX_ID_MARKERS: &[&str] = &["CH340", "1a86:7523"];

/// Return the first `/dev/ttyUSB*` node whose udev metadata names a CH340
///
/// Nodes whose metadata cannot be read are skipped.
pub fn detect_linux<P: SystemProbe + ?Sized>(probe: &P) -> Option<String> {
    for node in matching_nodes(probe, "/dev", LINUX_NODE_PREFIX) {
        let info = match probe.query("udevadm", &["info", "-q", "all", "-n", &node]) {
            Ok(info) => info,
            Err(e) => {
                log::debug!("Skipping {}: {}", node, e);
                continue;
            }
        };

        if LINUX_ID_MARKERS.iter().any(|marker| info.contains(marker)) {
            return Some(node);
        }
        log::debug!("{} is not a CH340", node);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::super::fake::FakeProbe;
    use super::*;

    const CH340_INFO: &str = "\
P: /devices/pci0000:00/0000:00:14.0/usb1/1-2/1-2:1.0/ttyUSB0/tty/ttyUSB0
N: ttyUSB0
E: ID_VENDOR=1a86
E: ID_MODEL=USB_Serial
E: ID_MODEL_FROM_DATABASE=CH340 serial converter
";

    const FTDI_INFO: &str = "\
N: ttyUSB0
E: ID_VENDOR=FTDI
E: ID_MODEL=FT232R_USB_UART
E: ID_VENDOR_ID=0403
";

    #[test]
    fn test_finds_ch340_by_name() {
        let probe = FakeProbe::new()
            .with_dir("/dev", &["ttyUSB0"])
            .with_reply("udevadm info -q all -n /dev/ttyUSB0", CH340_INFO);
        assert_eq!(detect_linux(&probe).as_deref(), Some("/dev/ttyUSB0"));
    }

    #[test]
    fn test_finds_ch340_by_usb_id() {
        let probe = FakeProbe::new()
            .with_dir("/dev", &["ttyUSB3"])
            .with_reply(
                "udevadm info -q all -n /dev/ttyUSB3",
                "E: PRODUCT=1a86:7523\n",
            );
        assert_eq!(detect_linux(&probe).as_deref(), Some("/dev/ttyUSB3"));
    }

    #[test]
    fn test_candidates_without_marker_are_absent() {
        let probe = FakeProbe::new()
            .with_dir("/dev", &["ttyUSB0", "ttyUSB1"])
            .with_reply("udevadm info -q all -n /dev/ttyUSB0", FTDI_INFO)
            .with_reply("udevadm info -q all -n /dev/ttyUSB1", FTDI_INFO);
        assert_eq!(detect_linux(&probe), None);
        assert_eq!(probe.queries.borrow().len(), 2);
    }

    #[test]
    fn test_failed_query_is_skipped() {
        let probe = FakeProbe::new()
            .with_dir("/dev", &["ttyUSB0", "ttyUSB1"])
            .with_failure("udevadm info -q all -n /dev/ttyUSB0")
            .with_reply("udevadm info -q all -n /dev/ttyUSB1", CH340_INFO);
        assert_eq!(detect_linux(&probe).as_deref(), Some("/dev/ttyUSB1"));
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        let probe = FakeProbe::new()
            .with_dir("/dev", &["ttyUSB0"])
            .with_reply("udevadm info -q all -n /dev/ttyUSB0", "E: ID_MODEL=ch340\n");
        assert_eq!(detect_linux(&probe), None);
    }

    #[test]
    fn test_ignores_other_nodes() {
        let probe = FakeProbe::new()
            .with_dir("/dev", &["ttyACM0", "ttyS0"])
            .with_reply("udevadm info -q all -n /dev/ttyACM0", CH340_INFO);
        assert_eq!(detect_linux(&probe), None);
        assert!(probe.queries.borrow().is_empty());
    }
}
