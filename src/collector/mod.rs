//! Focused-window collection for the focus telemetry agent.
//!
//! The sampling loop only sees the [`FocusSource`] trait; the platform
//! implementation is picked at compile time.

pub mod types;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub mod noop;

// Re-export commonly used types
pub use types::{CollectorError, FocusSource};

#[cfg(target_os = "windows")]
pub use self::windows::{check_support, WindowsFocusSource};

/// Platform-agnostic focus source type alias
#[cfg(target_os = "windows")]
pub type NativeFocusSource = WindowsFocusSource;

#[cfg(target_os = "macos")]
pub use macos::{check_support, MacOSFocusSource};

/// Platform-agnostic focus source type alias
#[cfg(target_os = "macos")]
pub type NativeFocusSource = MacOSFocusSource;

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub use noop::{check_support, UnsupportedFocusSource};

/// Platform-agnostic focus source type alias
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub type NativeFocusSource = UnsupportedFocusSource;
