//! The seam between the sequencer and the vendor's module driver.
//!
//! The SDEP-over-SPI transport and the AT response parser belong to the
//! driver; the sequencer only needs "send this line, did it say OK".

use crate::command;

/// A Bluefruit LE module reachable through an AT command channel.
pub trait BleModule {
    /// Driver error (SPI fault, timeout, `ERROR` reply, ...).
    type Error: core::fmt::Debug;

    /// Open the transport and check that the module responds.
    ///
    /// `verbose` enables the driver's own debug output.
    fn begin(&mut self, verbose: bool) -> Result<(), Self::Error>;

    /// Send one AT command line and wait for `OK`.
    fn send_command_check_ok(&mut self, command: &str) -> Result<(), Self::Error>;

    /// Software reset, required after adding or removing a service.
    fn reset(&mut self) -> Result<(), Self::Error> {
        self.send_command_check_ok(command::RESET)
    }

    /// Enable or disable echo of received commands.
    fn set_echo(&mut self, enabled: bool) -> Result<(), Self::Error> {
        let line = if enabled {
            command::ECHO_ON
        } else {
            command::ECHO_OFF
        };
        self.send_command_check_ok(line)
    }
}

impl<M: BleModule + ?Sized> BleModule for &mut M {
    type Error = M::Error;

    fn begin(&mut self, verbose: bool) -> Result<(), Self::Error> {
        (**self).begin(verbose)
    }

    fn send_command_check_ok(&mut self, command: &str) -> Result<(), Self::Error> {
        (**self).send_command_check_ok(command)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        (**self).reset()
    }

    fn set_echo(&mut self, enabled: bool) -> Result<(), Self::Error> {
        (**self).set_echo(enabled)
    }
}
