//! Windows focus source using the Win32 foreground window API.

use crate::collector::types::{CollectorError, FocusSource};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW,
};

/// Reads the title of the foreground window with `GetWindowTextW`.
pub struct WindowsFocusSource {
    buffer: Vec<u16>,
}

impl WindowsFocusSource {
    pub fn new() -> Result<Self, CollectorError> {
        Ok(Self {
            buffer: vec![0u16; 512],
        })
    }
}

impl FocusSource for WindowsFocusSource {
    fn focused_title(&mut self) -> Result<String, CollectorError> {
        unsafe {
            let hwnd = GetForegroundWindow();
            if hwnd.0.is_null() {
                return Ok(String::new());
            }

            let len = GetWindowTextLengthW(hwnd);
            if len <= 0 {
                return Ok(String::new());
            }

            // Room for the terminating NUL.
            let needed = len as usize + 1;
            if self.buffer.len() < needed {
                self.buffer.resize(needed, 0);
            }

            let copied = GetWindowTextW(hwnd, &mut self.buffer);
            if copied <= 0 {
                return Ok(String::new());
            }

            Ok(String::from_utf16_lossy(&self.buffer[..copied as usize]))
        }
    }
}

/// Windows always has a foreground window API.
pub fn check_support() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_creation() {
        let source = WindowsFocusSource::new().unwrap();
        assert_eq!(source.buffer.len(), 512);
    }
}
