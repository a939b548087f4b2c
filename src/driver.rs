//! Blocking driver for the on-chip EEPROM controller.
//!
//! The controller is programmed through a timed register sequence: latch the
//! address, select a programming mode, load the data register, arm the
//! master write enable, then start the cycle. The order is a hardware
//! contract; a start issued before the master enable is armed is ignored by
//! the controller.

use crate::error::Error;
use crate::registers::{EepromRegisters, ProgrammingMode};

/// First address of the window advertised to callers.
///
/// Advisory only; no operation checks addresses against it.
pub const START_ADDRESS: u16 = 0x0005;

/// Address of the cell advertising the end of the usable window. Advisory as
/// well.
pub const END_ADDRESS_LOCATION: u16 = 0x0001;

/// Value an erased cell reads back as.
pub const ERASED_VALUE: u8 = 0xFF;

/// Driver configuration.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Upper bound on busy-flag polls per wait. When the controller stays
    /// busy past the budget the operation returns [`Error::Timeout`] instead
    /// of spinning forever.
    pub max_busy_polls: u32,
    /// Wait for the controller to report idle after triggering a read,
    /// before sampling the data register. When disabled (the default) the
    /// data register is sampled immediately, which on hardware where the
    /// read is not same-cycle returns stale data.
    pub wait_for_read_complete: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_busy_polls: 100_000,
            wait_for_read_complete: false,
        }
    }
}

/// EEPROM driver over a register bank `R`.
pub struct Eeprom<R> {
    regs: R,
    config: Config,
}

impl<R: EepromRegisters> Eeprom<R> {
    /// Creates a driver with the default [`Config`].
    pub fn new(regs: R) -> Self {
        Self::with_config(regs, Config::default())
    }

    pub fn with_config(regs: R, config: Config) -> Self {
        Self { regs, config }
    }

    /// Releases the underlying register bank.
    pub fn free(self) -> R {
        self.regs
    }

    /// Erases one cell to [`ERASED_VALUE`].
    ///
    /// Fire-and-forget: the call returns as soon as the erase cycle has been
    /// started, without waiting for its completion. The busy-wait at the
    /// head of every operation covers the in-flight cycle, so an erase
    /// followed immediately by another operation behaves as expected.
    pub fn erase_address(&mut self, address: u16) -> Result<(), Error> {
        self.wait_ready()?;

        self.regs.set_address(address);
        self.regs.set_mode(ProgrammingMode::EraseOnly);
        self.regs.enable_master_write();
        self.regs.trigger_write();

        #[cfg(feature = "defmt")]
        defmt::trace!("erase cycle started at address 0x{:04x}", address);
        Ok(())
    }

    /// Writes one byte, erasing and programming the cell in a single cycle.
    ///
    /// The register sequence runs with global interrupts disabled; an
    /// interrupted cycle can leave the cell in an undefined state. The
    /// interrupt flag is restored to its prior state on every exit path,
    /// including the timeout path. On `Ok` the controller has reported the
    /// cycle complete and the byte is durably stored.
    pub fn write_to_address(&mut self, address: u16, data: u8) -> Result<(), Error> {
        // Wait outside the critical section so a slow predecessor cycle
        // does not extend the interrupt-masked window.
        self.wait_ready()?;

        self.with_interrupts_disabled(|this| {
            this.regs.disable_ready_interrupt();
            this.regs.set_address(address);
            this.regs.set_mode(ProgrammingMode::EraseWrite);
            this.regs.set_data(data);
            this.regs.enable_master_write();
            this.regs.trigger_write();
            this.wait_ready()
        })?;

        #[cfg(feature = "defmt")]
        defmt::trace!("wrote 0x{:02x} to address 0x{:04x}", data, address);
        Ok(())
    }

    /// Reads the byte at `address`.
    ///
    /// Any in-flight write cycle is waited out before the address is
    /// latched. Addresses are not checked against the advertised window;
    /// out-of-range values alias whatever the hardware decodes.
    pub fn read_from_address(&mut self, address: u16) -> Result<u8, Error> {
        self.wait_ready()?;

        self.regs.disable_ready_interrupt();
        self.regs.set_address(address);
        self.regs.trigger_read();
        if self.config.wait_for_read_complete {
            self.wait_ready()?;
        }
        Ok(self.regs.data())
    }

    /// Blocks until the controller reports idle, for at most
    /// `max_busy_polls` polls.
    fn wait_ready(&mut self) -> Result<(), Error> {
        for _ in 0..self.config.max_busy_polls {
            if !self.regs.is_busy() {
                return Ok(());
            }
        }
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "EEPROM busy flag stuck after {} polls",
            self.config.max_busy_polls
        );
        Err(Error::Timeout)
    }

    /// Runs `f` with global interrupts disabled, restoring the prior state
    /// afterwards regardless of the outcome. The prior state is sampled
    /// from the hardware, never from the caller.
    fn with_interrupts_disabled<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let prior = self.regs.interrupts_enabled();
        self.regs.set_interrupts_enabled(false);
        let result = f(self);
        self.regs.set_interrupts_enabled(prior);
        result
    }
}
