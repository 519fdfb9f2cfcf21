//! Bring-up options and the step plan derived from them.
//!
//! The three controller firmwares this crate replaces differ only in the
//! advertised name, a pacing wait, GAP tuning, and whether echo is turned
//! off afterwards. Each is available as a preset; none is the default.

use heapless::Vec;

use crate::command::{self, CommandLine, GapIntervals};
use crate::config::{
    DEFAULT_PACING_DELAY_MS, DEVICE_NAME_CONTROLLER, DEVICE_NAME_CONTROLLER_INPUT,
    MAX_DEVICE_NAME_LEN, MAX_PLAN_STEPS,
};
use crate::error::OptionsError;
use crate::sequencer::Step;

/// Ordered list of steps a bring-up will run.
pub type Plan = Vec<Step, MAX_PLAN_STEPS>;

/// Command lines built from validated options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLines {
    /// `AT+GAPDEVNAME=<name>`.
    pub device_name: CommandLine,
    /// `AT+GAPINTERVALS=...`, when GAP tuning is enabled.
    pub gap_intervals: Option<CommandLine>,
}

/// What the sequencer configures and how.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BringUpOptions {
    /// Name the module advertises.
    pub device_name: &'static str,
    /// GAP timing to apply before the reset, if any.
    pub gap_intervals: Option<GapIntervals>,
    /// Turn command echo off once the module is ready.
    pub disable_echo: bool,
    /// Wait between consecutive steps (ms).
    pub pacing_delay_ms: Option<u32>,
    /// Driver debug output and diagnostic messages.
    pub verbose: bool,
}

impl BringUpOptions {
    /// Rename, enable HID, reset. Nothing else.
    pub const fn new(device_name: &'static str) -> Self {
        Self {
            device_name,
            gap_intervals: None,
            disable_echo: false,
            pacing_delay_ms: None,
            verbose: false,
        }
    }

    /// "Controller Input", no pacing.
    pub const fn controller_input() -> Self {
        Self::new(DEVICE_NAME_CONTROLLER_INPUT)
    }

    /// "Controller", paced.
    pub const fn controller_paced() -> Self {
        Self::new(DEVICE_NAME_CONTROLLER).with_pacing(DEFAULT_PACING_DELAY_MS)
    }

    /// "Controller", paced, 10-50 ms connection interval, echo off.
    pub const fn controller_tuned() -> Self {
        Self::controller_paced()
            .with_gap_intervals(GapIntervals::controller())
            .with_echo_disabled()
    }

    pub const fn with_gap_intervals(mut self, gap: GapIntervals) -> Self {
        self.gap_intervals = Some(gap);
        self
    }

    pub const fn with_echo_disabled(mut self) -> Self {
        self.disable_echo = true;
        self
    }

    pub const fn with_pacing(mut self, delay_ms: u32) -> Self {
        self.pacing_delay_ms = Some(delay_ms);
        self
    }

    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check the options before any command is sent.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let name = self.device_name;
        if name.is_empty() {
            return Err(OptionsError::EmptyDeviceName);
        }
        if name.len() > MAX_DEVICE_NAME_LEN {
            return Err(OptionsError::DeviceNameTooLong);
        }
        // A CR or LF would end the AT line early.
        if name.chars().any(char::is_control) {
            return Err(OptionsError::InvalidDeviceNameChar);
        }
        if let Some(gap) = &self.gap_intervals {
            if !gap.is_valid() {
                return Err(OptionsError::InvalidGapRange);
            }
        }
        Ok(())
    }

    /// Validate and build every parameterised command line up front.
    pub fn command_lines(&self) -> Result<CommandLines, OptionsError> {
        self.validate()?;
        let device_name =
            command::device_name_command(self.device_name).ok_or(OptionsError::CommandTooLong)?;
        let gap_intervals = match &self.gap_intervals {
            Some(gap) => Some(gap.command().ok_or(OptionsError::CommandTooLong)?),
            None => None,
        };
        Ok(CommandLines {
            device_name,
            gap_intervals,
        })
    }

    /// Steps in execution order.
    pub fn plan(&self) -> Plan {
        let mut plan = Plan::new();
        // Capacity covers every optional step, so pushes cannot fail.
        let _ = plan.push(Step::Begin);
        let _ = plan.push(Step::SetDeviceName);
        let _ = plan.push(Step::EnableHidKeyboard);
        if self.gap_intervals.is_some() {
            let _ = plan.push(Step::SetGapIntervals);
        }
        let _ = plan.push(Step::Reset);
        if self.disable_echo {
            let _ = plan.push(Step::DisableEcho);
        }
        plan
    }
}
