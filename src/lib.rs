//! Focus Telemetry Agent - reports which applications hold window focus.
//!
//! The agent samples the title of the focused window once per second,
//! reduces it to the application part, counts occurrences and sends the
//! table as a JSON object to a remote endpoint every minute.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Focus Telemetry Agent                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐       │
//! │  │ FocusSource │──▶│  Normalize  │──▶│   Counter   │       │
//! │  │  (1s tick)  │   │ (last part) │   │ (60 ticks)  │       │
//! │  └─────────────┘   └─────────────┘   └─────────────┘       │
//! │         ▲                                    │              │
//! │         │                                    ▼              │
//! │  ┌─────────────┐                     ┌─────────────┐       │
//! │  │  Shutdown   │                     │   Report    │──▶ POST│
//! │  │   Signal    │                     │  Transport  │       │
//! │  └─────────────┘                     └─────────────┘       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use focus_telemetry_agent::{
//!     BlockingReportClient, Config, ReportTransport, SamplingLoop, ShutdownSignal,
//! };
//!
//! let config = Config::from_env().expect("AUTH_TOKEN and MY_API_URL must be set");
//! let client = BlockingReportClient::new(config.request_timeout).unwrap();
//! let source = || Ok::<_, focus_telemetry_agent::CollectorError>("notes - Editor".to_string());
//!
//! let shutdown = ShutdownSignal::new();
//! shutdown.install_handler().unwrap();
//!
//! let mut sampler = SamplingLoop::new(config, source, ReportTransport::new(client), shutdown);
//! sampler.run();
//! ```

pub mod collector;
pub mod config;
pub mod core;
pub mod sampling;
pub mod shutdown;
pub mod transparency;
pub mod transport;

// Re-export key types at crate root for convenience
pub use collector::{CollectorError, FocusSource, NativeFocusSource};
pub use config::{Config, ConfigError};
pub use core::{encode, normalize_title, ActivityCounter, Report, ReportError};
pub use sampling::{CycleError, CycleOutcome, Dispatch, LoopState, SamplingLoop};
pub use shutdown::ShutdownSignal;
pub use transparency::{SharedTransparencyLog, TransparencyLog, TransparencyStats};
pub use transport::{
    BlockingReportClient, Delivery, DeliveryOutcome, HttpPost, HttpResponse, ReportClient,
    ReportTransport, TransportError,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Statement of what the agent collects, shown by `focus-telemetry privacy`.
pub const PRIVACY_DECLARATION: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║          FOCUS TELEMETRY AGENT - DATA COLLECTION NOTICE          ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  This agent reports which applications you spend time in.        ║
║                                                                  ║
║  ✓ WHAT WE CAPTURE:                                              ║
║    • The title of the focused window, once per second           ║
║    • Only the part after the last "-" (usually the app name)     ║
║    • How many seconds each app held focus in the last minute     ║
║                                                                  ║
║  ✗ WHAT WE NEVER CAPTURE:                                        ║
║    • Keystrokes, mouse activity or screen content                ║
║    • Window contents or file contents                            ║
║    • History older than the current minute                       ║
║                                                                  ║
║  Counts are sent once a minute to the configured endpoint        ║
║  and then discarded locally.                                     ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privacy_declaration_contents() {
        assert!(PRIVACY_DECLARATION.contains("WHAT WE CAPTURE"));
        assert!(PRIVACY_DECLARATION.contains("NEVER CAPTURE"));
        assert!(PRIVACY_DECLARATION.contains("Keystrokes"));
    }
}
