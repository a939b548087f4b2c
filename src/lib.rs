//! Driver for the AVR on-chip EEPROM controller.
//!
//! The controller exposes byte-granular erase, write and read through a
//! small register bank: an address register pair, a data register and a
//! control register carrying the programming-mode bits, the master write
//! enable, the start bits and the write-in-progress flag. The whole driver
//! is the timed sequence that programs those registers in the order the
//! hardware requires, with global interrupts masked for the duration of a
//! combined erase+write cycle.
//!
//! Register access goes through the [`EepromRegisters`] trait:
//! [`MmioRegisters`] implements it over real memory-mapped I/O, and tests
//! drive the same sequences against a simulated register bank.
//!
//! Every busy-wait is bounded ([`Config::max_busy_polls`]): an unresponsive
//! controller surfaces as [`Error::Timeout`] rather than a hang, and the
//! interrupt flag is restored on every exit path, including timeouts.
//!
//! # Example
//!
//! ```no_run
//! use avr_eeprom_rs::{Eeprom, MmioRegisters};
//!
//! let regs = unsafe { MmioRegisters::new() };
//! let mut eeprom = Eeprom::new(regs);
//!
//! eeprom.write_to_address(0x0010, 0xA5)?;
//! assert_eq!(eeprom.read_from_address(0x0010)?, 0xA5);
//! # Ok::<(), avr_eeprom_rs::Error>(())
//! ```

#![cfg_attr(not(test), no_std)]

pub mod driver;
pub mod error;
pub mod mmio;
pub mod registers;

pub use driver::{Config, Eeprom, END_ADDRESS_LOCATION, ERASED_VALUE, START_ADDRESS};
pub use error::Error;
pub use mmio::MmioRegisters;
pub use registers::{EepromRegisters, ProgrammingMode};
