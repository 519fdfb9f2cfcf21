//! AT command lines understood by the Bluefruit LE module.
//!
//! Only the handful of commands the bring-up sequence issues are modelled.
//! Lines are built into fixed-capacity buffers; nothing here allocates.

use core::fmt::Write;

use heapless::String;

use crate::config::{GAP_MAX_CONN_INTERVAL_MS, GAP_MIN_CONN_INTERVAL_MS, MAX_COMMAND_LEN};

/// A formatted AT command line.
pub type CommandLine = String<MAX_COMMAND_LEN>;

/// Prefix of the rename command; the device name follows.
pub const GAP_DEVICE_NAME: &str = "AT+GAPDEVNAME=";

/// Enable the BLE HID keyboard profile.
pub const HID_ENABLE: &str = "AT+BleHIDEn=On";

/// Prefix of the GAP timing command; four comma-separated fields follow.
pub const GAP_INTERVALS: &str = "AT+GAPINTERVALS=";

/// Software reset.
pub const RESET: &str = "ATZ";

/// Turn command echo off.
pub const ECHO_OFF: &str = "ATE=0";

/// Turn command echo on.
pub const ECHO_ON: &str = "ATE=1";

/// Build `AT+GAPDEVNAME=<name>`.
///
/// Returns `None` if the line does not fit in [`CommandLine`].
pub fn device_name_command(name: &str) -> Option<CommandLine> {
    let mut line = CommandLine::new();
    line.push_str(GAP_DEVICE_NAME).ok()?;
    line.push_str(name).ok()?;
    Some(line)
}

/// GAP connection and advertising timing.
///
/// A `None` field is sent empty, which leaves the module's current value
/// in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GapIntervals {
    /// Minimum connection interval (ms).
    pub min_conn_ms: Option<u16>,
    /// Maximum connection interval (ms).
    pub max_conn_ms: Option<u16>,
    /// Fast advertising interval (ms).
    pub fast_adv_interval_ms: Option<u16>,
    /// Fast advertising timeout (s).
    pub fast_adv_timeout_s: Option<u16>,
}

impl GapIntervals {
    /// Connection interval range with advertising left at module defaults.
    pub const fn connection(min_ms: u16, max_ms: u16) -> Self {
        Self {
            min_conn_ms: Some(min_ms),
            max_conn_ms: Some(max_ms),
            fast_adv_interval_ms: None,
            fast_adv_timeout_s: None,
        }
    }

    /// The 10 ms / 50 ms range used by the tuned controller.
    pub const fn controller() -> Self {
        Self::connection(GAP_MIN_CONN_INTERVAL_MS, GAP_MAX_CONN_INTERVAL_MS)
    }

    /// `true` unless both connection bounds are set and inverted.
    pub fn is_valid(&self) -> bool {
        match (self.min_conn_ms, self.max_conn_ms) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }

    /// Build `AT+GAPINTERVALS=<min>,<max>,<fast_adv>,<fast_adv_timeout>`.
    pub fn command(&self) -> Option<CommandLine> {
        let mut line = CommandLine::new();
        line.push_str(GAP_INTERVALS).ok()?;
        let fields = [
            self.min_conn_ms,
            self.max_conn_ms,
            self.fast_adv_interval_ms,
            self.fast_adv_timeout_s,
        ];
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(',').ok()?;
            }
            if let Some(value) = field {
                write!(line, "{}", value).ok()?;
            }
        }
        Some(line)
    }
}
