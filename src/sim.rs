//! In-memory module and delay for running bring-up on the host.
//!
//! [`SimulatedModule`] answers `OK` to everything unless told otherwise and
//! keeps a transcript of what it was sent. [`RecordingDelay`] remembers each
//! pacing wait instead of sleeping.

use heapless::{String, Vec};

use embedded_hal::delay::DelayNs;

use crate::config::MAX_COMMAND_LEN;
use crate::module::BleModule;

/// Maximum number of exchanges a transcript holds.
pub const TRANSCRIPT_CAPACITY: usize = 32;

/// One exchange seen by the simulated module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exchange {
    /// `begin` with the requested verbosity.
    Begin { verbose: bool },
    /// An AT command line.
    Command(String<MAX_COMMAND_LEN>),
}

impl Exchange {
    /// The command line, if this exchange was one.
    pub fn command(&self) -> Option<&str> {
        match self {
            Exchange::Command(line) => Some(line.as_str()),
            Exchange::Begin { .. } => None,
        }
    }
}

/// Why the simulated module failed an exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimError {
    /// No module on the bus.
    NotResponding,
    /// The module replied `ERROR`.
    Rejected,
    /// The command line exceeds [`MAX_COMMAND_LEN`]; nothing was sent.
    LineTooLong,
    /// The transcript is full.
    TranscriptFull,
}

/// Scripted stand-in for a Bluefruit LE module.
#[derive(Debug, Default)]
pub struct SimulatedModule {
    absent: bool,
    reject_prefix: Option<&'static str>,
    reject_occurrence: usize,
    matches_seen: usize,
    transcript: Vec<Exchange, TRANSCRIPT_CAPACITY>,
}

impl SimulatedModule {
    /// A module that accepts every command.
    pub fn new() -> Self {
        Self::default()
    }

    /// A module that never answers `begin`.
    pub fn absent() -> Self {
        Self {
            absent: true,
            ..Self::default()
        }
    }

    /// Reject the first command starting with `prefix`.
    pub fn rejecting(prefix: &'static str) -> Self {
        Self::rejecting_nth(prefix, 0)
    }

    /// Reject the `n`th (zero-based) command starting with `prefix`.
    pub fn rejecting_nth(prefix: &'static str, n: usize) -> Self {
        Self {
            reject_prefix: Some(prefix),
            reject_occurrence: n,
            ..Self::default()
        }
    }

    /// Everything the module has been sent, in order.
    pub fn transcript(&self) -> &[Exchange] {
        &self.transcript
    }

    /// Only the command lines, in order.
    pub fn commands(&self) -> impl Iterator<Item = &str> + '_ {
        self.transcript.iter().filter_map(Exchange::command)
    }

    /// How many times `line` was sent verbatim.
    pub fn count(&self, line: &str) -> usize {
        self.commands().filter(|c| *c == line).count()
    }

    fn record(&mut self, exchange: Exchange) -> Result<(), SimError> {
        self.transcript
            .push(exchange)
            .map_err(|_| SimError::TranscriptFull)
    }
}

impl BleModule for SimulatedModule {
    type Error = SimError;

    fn begin(&mut self, verbose: bool) -> Result<(), Self::Error> {
        self.record(Exchange::Begin { verbose })?;
        if self.absent {
            return Err(SimError::NotResponding);
        }
        Ok(())
    }

    fn send_command_check_ok(&mut self, command: &str) -> Result<(), Self::Error> {
        let mut line = String::new();
        line.push_str(command).map_err(|_| SimError::LineTooLong)?;
        self.record(Exchange::Command(line))?;

        if let Some(prefix) = self.reject_prefix {
            if command.starts_with(prefix) {
                let seen = self.matches_seen;
                self.matches_seen += 1;
                if seen == self.reject_occurrence {
                    return Err(SimError::Rejected);
                }
            }
        }
        Ok(())
    }
}

/// [`DelayNs`] that records requested waits instead of blocking.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    waits_ms: Vec<u32, TRANSCRIPT_CAPACITY>,
    dropped: usize,
    total_ns: u64,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Millisecond waits in the order they were requested.
    ///
    /// Holds the first [`TRANSCRIPT_CAPACITY`] waits; later ones are only
    /// counted in [`RecordingDelay::total_ns`] and [`RecordingDelay::dropped`].
    pub fn waits_ms(&self) -> &[u32] {
        &self.waits_ms
    }

    /// Millisecond waits that did not fit in [`RecordingDelay::waits_ms`].
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Total time waited, across every granularity.
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        if self.waits_ms.push(ms).is_err() {
            self.dropped += 1;
        }
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}
