//! Device bring-up sequencer.
//!
//! Drives a freshly powered module to "advertising as an HID keyboard":
//!
//! 1. **Begin** - open the transport.
//! 2. **SetDeviceName** - `AT+GAPDEVNAME=<name>`.
//! 3. **EnableHidKeyboard** - `AT+BleHIDEn=On`.
//! 4. **SetGapIntervals** (optional) - `AT+GAPINTERVALS=...`.
//! 5. **Reset** - applies the service and name changes.
//! 6. **DisableEcho** (optional) - cosmetic, result ignored.
//!
//! The first failing step ends the run and nothing further is sent to the
//! module. The caller decides what happens next; [`Sequencer::initialize_or_halt`]
//! keeps the classic firmware behaviour of stopping forever.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::command;
use crate::error::{Error, OptionsError};
use crate::module::BleModule;
use crate::options::{BringUpOptions, CommandLines, Plan};

/// One bring-up step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Begin,
    SetDeviceName,
    EnableHidKeyboard,
    SetGapIntervals,
    Reset,
    DisableEcho,
}

impl Step {
    /// Fixed line reported when this step fails.
    pub const fn diagnostic(self) -> &'static str {
        match self {
            Step::Begin => "NO BLE?",
            Step::SetDeviceName => "err:rename fail",
            Step::EnableHidKeyboard => "err:enable Kb",
            Step::SetGapIntervals => "err:gap intervals",
            Step::Reset => "err:SW reset",
            Step::DisableEcho => "err:echo off",
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Step::Begin => "begin",
            Step::SetDeviceName => "set device name",
            Step::EnableHidKeyboard => "enable HID keyboard",
            Step::SetGapIntervals => "set GAP intervals",
            Step::Reset => "reset",
            Step::DisableEcho => "disable echo",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the sequencer is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringUpState {
    NotStarted,
    /// Executing the given step.
    Running(Step),
    /// Every step succeeded; the module is advertising.
    Ready,
    /// Stopped at the given step.
    Halted(Step),
}

/// Runs the bring-up plan against a module.
pub struct Sequencer<M, D> {
    module: M,
    delay: D,
    options: BringUpOptions,
    lines: CommandLines,
    state: BringUpState,
}

impl<M, D> Sequencer<M, D>
where
    M: BleModule,
    D: DelayNs,
{
    /// Validate `options` and take ownership of the module.
    pub fn new(module: M, delay: D, options: BringUpOptions) -> Result<Self, OptionsError> {
        let lines = options.command_lines()?;
        Ok(Self {
            module,
            delay,
            options,
            lines,
            state: BringUpState::NotStarted,
        })
    }

    pub fn state(&self) -> BringUpState {
        self.state
    }

    pub fn options(&self) -> &BringUpOptions {
        &self.options
    }

    pub fn module(&self) -> &M {
        &self.module
    }

    pub fn module_mut(&mut self) -> &mut M {
        &mut self.module
    }

    /// Hand the module over to the runtime once bring-up is done.
    pub fn into_inner(self) -> M {
        self.module
    }

    /// Run the plan.
    ///
    /// A no-op once [`BringUpState::Ready`]. After a failure the next call
    /// starts again from [`Step::Begin`].
    pub fn initialize(&mut self) -> Result<(), Error<M::Error>> {
        if self.state == BringUpState::Ready {
            return Ok(());
        }

        let plan: Plan = self.options.plan();
        for (i, &step) in plan.iter().enumerate() {
            if i > 0 {
                if let Some(ms) = self.options.pacing_delay_ms {
                    self.delay.delay_ms(ms);
                }
            }

            self.state = BringUpState::Running(step);
            if self.options.verbose {
                debug!("bring-up: {}", step);
            }

            if let Err(err) = self.run_step(step) {
                self.state = BringUpState::Halted(step);
                if self.options.verbose {
                    error!("{}", err.diagnostic());
                }
                return Err(err);
            }
        }

        self.state = BringUpState::Ready;
        if self.options.verbose {
            info!("bring-up complete: advertising as {}", self.options.device_name);
        }
        Ok(())
    }

    /// Run the plan; on failure never return.
    pub fn initialize_or_halt(&mut self) {
        if self.initialize().is_err() {
            halt();
        }
    }

    fn run_step(&mut self, step: Step) -> Result<(), Error<M::Error>> {
        let rejected = |cause: M::Error| Error::CommandRejected { step, cause };
        match step {
            Step::Begin => self
                .module
                .begin(self.options.verbose)
                .map_err(Error::ModuleNotFound),
            Step::SetDeviceName => self
                .module
                .send_command_check_ok(&self.lines.device_name)
                .map_err(rejected),
            Step::EnableHidKeyboard => self
                .module
                .send_command_check_ok(command::HID_ENABLE)
                .map_err(rejected),
            // Planned only when `gap_intervals` is set, so the line exists.
            Step::SetGapIntervals => match &self.lines.gap_intervals {
                Some(line) => self.module.send_command_check_ok(line).map_err(rejected),
                None => Ok(()),
            },
            Step::Reset => self.module.reset().map_err(rejected),
            Step::DisableEcho => {
                if let Err(_err) = self.module.set_echo(false) {
                    if self.options.verbose {
                        warn!("{} ignored", step.diagnostic());
                    }
                }
                Ok(())
            }
        }
    }
}

/// Stop forever. The module is left as it is.
pub fn halt() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
