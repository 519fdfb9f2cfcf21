//! Error types for the bring-up sequence.
//!
//! We avoid `alloc` - all variants carry only fixed-size data.
//! Implements `defmt::Format` when the `defmt` feature is enabled.

use core::fmt;

use crate::sequencer::Step;

/// Rejected [`crate::options::BringUpOptions`].
///
/// Raised when the sequencer is constructed, before the module is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OptionsError {
    /// The device name is empty.
    EmptyDeviceName,
    /// The device name exceeds [`crate::config::MAX_DEVICE_NAME_LEN`].
    DeviceNameTooLong,
    /// The device name contains a control character.
    InvalidDeviceNameChar,
    /// GAP minimum connection interval is larger than the maximum.
    InvalidGapRange,
    /// A command line does not fit in [`crate::command::CommandLine`].
    CommandTooLong,
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            OptionsError::EmptyDeviceName => "device name is empty",
            OptionsError::DeviceNameTooLong => "device name is too long",
            OptionsError::InvalidDeviceNameChar => "device name contains a control character",
            OptionsError::InvalidGapRange => "GAP min interval exceeds max interval",
            OptionsError::CommandTooLong => "command line too long",
        };
        f.write_str(msg)
    }
}

/// Fatal bring-up failure.
///
/// `E` is the error reported by the [`crate::module::BleModule`]
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport could not be opened; the module did not respond.
    ModuleNotFound(E),

    /// The module answered a step's command with a failure.
    CommandRejected {
        /// Step whose command was rejected.
        step: Step,
        /// Error reported by the module driver.
        cause: E,
    },
}

impl<E> Error<E> {
    /// Step that failed.
    pub fn step(&self) -> Step {
        match self {
            Error::ModuleNotFound(_) => Step::Begin,
            Error::CommandRejected { step, .. } => *step,
        }
    }

    /// Fixed diagnostic line emitted before halting.
    pub fn diagnostic(&self) -> &'static str {
        self.step().diagnostic()
    }

    /// Error reported by the module driver.
    pub fn cause(&self) -> &E {
        match self {
            Error::ModuleNotFound(cause) => cause,
            Error::CommandRejected { cause, .. } => cause,
        }
    }
}

impl<E> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diagnostic())
    }
}
