//! Bring-up for an SPI-attached Bluefruit LE module acting as an HID keyboard.
//!
//! The module is configured with a short, fixed sequence of AT commands:
//! rename, enable the HID keyboard profile, optionally tune GAP timing,
//! reset so the service change takes effect, optionally silence echo.
//!
//! The SPI transport and AT parser come from the module's driver, plugged
//! in through [`module::BleModule`]. Everything here runs on the host
//! against [`sim::SimulatedModule`].
//!
//! ```
//! use bluefruit_hid::options::BringUpOptions;
//! use bluefruit_hid::sequencer::{BringUpState, Sequencer};
//! use bluefruit_hid::sim::{RecordingDelay, SimulatedModule};
//!
//! let mut seq = Sequencer::new(
//!     SimulatedModule::new(),
//!     RecordingDelay::new(),
//!     BringUpOptions::controller_tuned(),
//! )
//! .unwrap();
//! seq.initialize().unwrap();
//! assert_eq!(seq.state(), BringUpState::Ready);
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod command;
pub mod config;
pub mod error;
pub mod module;
pub mod options;
pub mod sequencer;
pub mod sim;

pub use error::{Error, OptionsError};
pub use module::BleModule;
pub use options::BringUpOptions;
pub use sequencer::{halt, BringUpState, Sequencer, Step};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
