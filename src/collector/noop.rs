//! Focus source for platforms without a supported window API.
//!
//! This exists so the crate (and binary) compile everywhere; the agent
//! refuses to start when only this source is available.

use crate::collector::types::{CollectorError, FocusSource};

/// A focus source that cannot be constructed.
pub struct UnsupportedFocusSource {
    _private: (),
}

impl UnsupportedFocusSource {
    pub fn new() -> Result<Self, CollectorError> {
        Err(CollectorError::Unsupported(std::env::consts::OS.to_string()))
    }
}

impl FocusSource for UnsupportedFocusSource {
    fn focused_title(&mut self) -> Result<String, CollectorError> {
        Err(CollectorError::Unsupported(std::env::consts::OS.to_string()))
    }
}

/// No native focus source on this platform.
pub fn check_support() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_reports_platform() {
        match UnsupportedFocusSource::new() {
            Err(CollectorError::Unsupported(os)) => assert_eq!(os, std::env::consts::OS),
            _ => panic!("expected an unsupported platform error"),
        }
        assert!(!check_support());
    }
}
