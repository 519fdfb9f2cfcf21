//! Compile-time configuration.
//!
//! Device-name literals, GAP timing, pacing, and buffer sizes live here so
//! they can be tuned in one place. Runtime choices between them are made
//! through [`crate::options::BringUpOptions`].

// Device name

/// Advertised name used by the paced and tuned bring-up variants.
pub const DEVICE_NAME_CONTROLLER: &str = "Controller";

/// Advertised name used by the minimal bring-up variant.
pub const DEVICE_NAME_CONTROLLER_INPUT: &str = "Controller Input";

/// Longest device name the module accepts (bytes).
pub const MAX_DEVICE_NAME_LEN: usize = 20;

// GAP timing

/// Minimum connection interval requested by the tuned variant (ms).
pub const GAP_MIN_CONN_INTERVAL_MS: u16 = 10;

/// Maximum connection interval requested by the tuned variant (ms).
pub const GAP_MAX_CONN_INTERVAL_MS: u16 = 50;

// Pacing

/// Wait inserted between bring-up steps when pacing is enabled (ms).
pub const DEFAULT_PACING_DELAY_MS: u32 = 100;

// Buffers

/// Capacity of a single formatted AT command line (bytes).
pub const MAX_COMMAND_LEN: usize = 64;

/// Upper bound on the number of steps in a bring-up plan.
pub const MAX_PLAN_STEPS: usize = 6;

// SPI wiring (Feather 32u4 Bluefruit LE defaults)
//
// The transport is supplied by the integrator; these are the pins the
// vendor driver is usually constructed with.
//
//   BLUEFRUIT_SPI_CS   → D8
//   BLUEFRUIT_SPI_IRQ  → D7
//   BLUEFRUIT_SPI_RST  → D4
