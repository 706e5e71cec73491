//! The sampling, aggregation and dispatch loop.
//!
//! Every tick the loop reads the focused window title, normalizes it and
//! counts it. After a full batch of ticks it encodes the counter, sends the
//! report and clears the counter for the next interval.
//!
//! # Failure handling
//!
//! A failing cycle never stops the agent. The error is logged, the loop
//! backs off and starts a fresh cycle.
//!
//! - Focus source and encoding failures happen before the report is handed
//!   off, so the counter keeps its samples and the next report includes them.
//! - Once a report has been handed to the transport the batch is over. If
//!   the request fails or the server answers with an error status the
//!   samples of that interval are dropped, not retried.
//!
//! # Shutdown
//!
//! The [`ShutdownSignal`] is checked at the top of every tick and every
//! cycle. A partial batch is discarded without being sent; a report already
//! in flight completes first.

use crate::collector::{CollectorError, FocusSource};
use crate::config::Config;
use crate::core::{encode, normalize_title, ActivityCounter, ReportError};
use crate::shutdown::ShutdownSignal;
use crate::transparency::{create_shared_log, SharedTransparencyLog};
use crate::transport::{Delivery, DeliveryOutcome, HttpPost, ReportTransport, TransportError};

/// Lifecycle of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    ShuttingDown,
    Stopped,
}

/// A report that reached the endpoint.
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// The JSON body that was sent
    pub report: String,
    /// Classified response
    pub delivery: Delivery,
}

/// How a cycle ended, when it did not fail.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// A full batch was sent
    Dispatched(Dispatch),
    /// Shutdown was observed after `ticks` ticks; nothing was sent
    Interrupted { ticks: u32 },
}

/// Recoverable failures of a single cycle.
#[derive(Debug, Clone)]
pub enum CycleError {
    /// The focus source failed
    Focus(CollectorError),
    /// The counter could not be encoded
    Encode(String),
    /// No response was obtained for the report
    Transport(TransportError),
    /// The endpoint answered with status 400 or above
    HttpStatus { status: u16, body: String },
}

impl CycleError {
    /// Short name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            CycleError::Focus(_) => "focus",
            CycleError::Encode(_) => "encode",
            CycleError::Transport(e) => e.kind(),
            CycleError::HttpStatus { .. } => "http_status",
        }
    }

    /// Whether the failure discarded the samples of the interval.
    pub fn drops_batch(&self) -> bool {
        matches!(
            self,
            CycleError::Transport(_) | CycleError::HttpStatus { .. }
        )
    }
}

impl From<ReportError> for CycleError {
    fn from(e: ReportError) -> Self {
        CycleError::Encode(e.to_string())
    }
}

impl std::fmt::Display for CycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleError::Focus(e) => write!(f, "{e}"),
            CycleError::Encode(e) => write!(f, "{e}"),
            CycleError::Transport(e) => write!(f, "{e}"),
            CycleError::HttpStatus { status, body } => {
                write!(f, "Endpoint returned error ({status}): {body}")
            }
        }
    }
}

impl std::error::Error for CycleError {}

/// Owns the counter and drives the tick/batch cycle.
pub struct SamplingLoop<S, H> {
    config: Config,
    source: S,
    transport: ReportTransport<H>,
    shutdown: ShutdownSignal,
    counter: ActivityCounter,
    state: LoopState,
    log: SharedTransparencyLog,
}

impl<S: FocusSource, H: HttpPost> SamplingLoop<S, H> {
    /// Create a loop in the `Running` state with an empty counter.
    pub fn new(
        config: Config,
        source: S,
        transport: ReportTransport<H>,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            config,
            source,
            transport,
            shutdown,
            counter: ActivityCounter::new(),
            state: LoopState::Running,
            log: create_shared_log(),
        }
    }

    /// Record statistics into an existing transparency log.
    pub fn with_transparency_log(mut self, log: SharedTransparencyLog) -> Self {
        self.log = log;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Samples accumulated since the last report.
    pub fn counter(&self) -> &ActivityCounter {
        &self.counter
    }

    pub fn transparency_log(&self) -> &SharedTransparencyLog {
        &self.log
    }

    /// Take one sample. Returns whether a title was counted.
    pub fn sample_once(&mut self) -> Result<bool, CycleError> {
        let raw = self.source.focused_title().map_err(CycleError::Focus)?;
        let title = normalize_title(&raw, self.config.title_delimiter);

        let counted = !title.is_empty();
        self.counter.increment(title);
        self.log.record_tick(counted);

        Ok(counted)
    }

    /// Run one batch of ticks and dispatch the report.
    pub fn run_cycle(&mut self) -> Result<CycleOutcome, CycleError> {
        for tick in 0..self.config.batch_ticks {
            if self.shutdown.is_requested() {
                return Ok(CycleOutcome::Interrupted { ticks: tick });
            }

            self.sample_once()?;
            self.shutdown.wait(self.config.tick_interval);
        }

        if self.shutdown.is_requested() {
            return Ok(CycleOutcome::Interrupted {
                ticks: self.config.batch_ticks,
            });
        }

        self.dispatch().map(CycleOutcome::Dispatched)
    }

    /// Encode, send, log, then reset.
    fn dispatch(&mut self) -> Result<Dispatch, CycleError> {
        let report = encode(&self.counter)?;
        tracing::info!("Sending report: {}", report);

        self.log.record_report_sent();
        let sent = self.transport.send(
            &self.config.api_url,
            &self.config.auth_token,
            report.as_str(),
        );

        let result = match sent {
            Ok(delivery) => match delivery.outcome {
                DeliveryOutcome::Accepted => {
                    self.log.record_report_accepted();
                    tracing::info!(
                        "Report delivered: {} titles, status {}",
                        report.titles(),
                        delivery.status
                    );
                    Ok(delivery)
                }
                DeliveryOutcome::Unrecognized => {
                    self.log.record_response_warning();
                    tracing::warn!("Unexpected response content: {}", delivery.body);
                    Ok(delivery)
                }
                DeliveryOutcome::Empty => {
                    tracing::debug!("Report sent, empty response (status {})", delivery.status);
                    Ok(delivery)
                }
                DeliveryOutcome::HttpError { status } => Err(CycleError::HttpStatus {
                    status,
                    body: delivery.body,
                }),
            },
            Err(e) => Err(CycleError::Transport(e)),
        };

        // The report has been handed off; this interval is over either way.
        self.counter.reset();
        if result.is_err() {
            self.log.record_batch_dropped();
        }

        result.map(|delivery| Dispatch {
            report: report.into_string(),
            delivery,
        })
    }

    /// Run cycles until shutdown is requested. Returns the final state.
    pub fn run(&mut self) -> LoopState {
        tracing::info!(
            "Sampling every {:?}, reporting every {} ticks to {}",
            self.config.tick_interval,
            self.config.batch_ticks,
            self.config.api_url
        );

        while self.state == LoopState::Running {
            if self.shutdown.is_requested() {
                self.state = LoopState::ShuttingDown;
                break;
            }

            match self.run_cycle() {
                Ok(CycleOutcome::Dispatched(_)) => {}
                Ok(CycleOutcome::Interrupted { ticks }) => {
                    tracing::info!("Stopping after {ticks} ticks of the current batch");
                    self.state = LoopState::ShuttingDown;
                }
                Err(e) => {
                    self.log.record_cycle_failure();
                    tracing::error!(
                        kind = e.kind(),
                        batch_dropped = e.drops_batch(),
                        "Cycle failed: {e}"
                    );
                    self.shutdown.wait(self.config.retry_backoff);
                }
            }
        }

        self.shut_down();
        self.state
    }

    fn shut_down(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::ShuttingDown;

        let pending = self.counter.total();
        if pending > 0 {
            tracing::info!("Discarding {pending} unsent samples");
        }
        self.counter.reset();

        self.state = LoopState::Stopped;
        tracing::info!("Sampling loop stopped");
    }
}
