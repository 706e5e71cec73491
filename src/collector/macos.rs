//! macOS focus source.
//!
//! Asks System Events for the frontmost application process through
//! `osascript`. Window titles need the Accessibility permission, so the
//! application name is reported instead; it is what the trailing title
//! segment holds on other platforms anyway.

use crate::collector::types::{CollectorError, FocusSource};
use std::process::Command;

const FRONTMOST_APP_SCRIPT: &str = concat!(
    "tell application \"System Events\" to get name of ",
    "first application process whose frontmost is true"
);

/// Reads the frontmost application name via AppleScript.
pub struct MacOSFocusSource {
    program: String,
}

impl MacOSFocusSource {
    pub fn new() -> Result<Self, CollectorError> {
        Ok(Self {
            program: "osascript".to_string(),
        })
    }
}

impl FocusSource for MacOSFocusSource {
    fn focused_title(&mut self) -> Result<String, CollectorError> {
        let output = Command::new(&self.program)
            .args(["-e", FRONTMOST_APP_SCRIPT])
            .output()
            .map_err(|e| CollectorError::Query(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            return Err(CollectorError::Query(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(parse_script_output(&output.stdout))
    }
}

/// `osascript` prints the result followed by a newline.
fn parse_script_output(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

/// `osascript` ships with every macOS install.
pub fn check_support() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_newline_is_stripped() {
        assert_eq!(parse_script_output(b"Safari\n"), "Safari");
        assert_eq!(parse_script_output(b""), "");
    }

    #[test]
    fn test_missing_program_is_query_error() {
        let mut source = MacOSFocusSource {
            program: "osascript-does-not-exist".to_string(),
        };
        assert!(matches!(
            source.focused_title(),
            Err(CollectorError::Query(_))
        ));
    }
}
