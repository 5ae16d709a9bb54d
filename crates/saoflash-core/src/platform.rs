//! Host operating system family

use std::fmt;

/// Operating system families with distinct port naming schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    /// Anything else; port detection always comes up empty
    Other,
}

impl Platform {
    /// Family of the platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Linux => "Linux",
            Platform::MacOs => "macOS",
            Platform::Windows => "Windows",
            Platform::Other => "unsupported platform",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_matches_target() {
        let platform = Platform::current();
        #[cfg(target_os = "linux")]
        assert_eq!(platform, Platform::Linux);
        #[cfg(target_os = "macos")]
        assert_eq!(platform, Platform::MacOs);
        #[cfg(target_os = "windows")]
        assert_eq!(platform, Platform::Windows);
        let _ = platform;
    }
}
