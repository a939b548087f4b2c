//! Register access over real memory-mapped I/O.
//!
//! Data-space layout of the ATmega32u4 generation: EECR `0x3F`, EEDR `0x40`,
//! EEARL `0x41`, EEARH `0x42`, SREG `0x5F`. Porting to a different
//! controller generation means remapping every address and bit below.

use crate::registers::{EepromRegisters, ProgrammingMode};
use bitflags::bitflags;

const EECR: *mut u8 = 0x3F as *mut u8;
const EEDR: *mut u8 = 0x40 as *mut u8;
const EEARL: *mut u8 = 0x41 as *mut u8;
const EEARH: *mut u8 = 0x42 as *mut u8;
const SREG: *mut u8 = 0x5F as *mut u8;

/// Global interrupt enable bit of the status register.
const SREG_I: u8 = 1 << 7;

bitflags! {
    /// EEPROM control register bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Eecr: u8 {
        /// Read enable/start.
        const EERE = 1 << 0;
        /// Write enable/start; reads back as the write-in-progress flag.
        const EEPE = 1 << 1;
        /// Master write enable.
        const EEMPE = 1 << 2;
        /// Ready-interrupt enable.
        const EERIE = 1 << 3;
        /// The 2 programming-mode bits.
        const EEPM = 0b11 << 4;
    }
}

/// Offset of the mode field within the control register.
const EEPM_SHIFT: u8 = 4;

/// Register bank of the on-chip EEPROM controller.
///
/// There is exactly one controller per chip. All accesses are volatile; the
/// value itself holds no state.
pub struct MmioRegisters {
    _private: (),
}

impl MmioRegisters {
    /// Creates a handle to the controller's register bank.
    ///
    /// # Safety
    ///
    /// The caller must be the sole owner of the EEPROM peripheral and of the
    /// global interrupt flag for the lifetime of the value. Two handles
    /// driving programming cycles concurrently defeat the busy-flag
    /// serialization the driver relies on.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }

    fn read_eecr(&self) -> Eecr {
        Eecr::from_bits_truncate(unsafe { EECR.read_volatile() })
    }

    fn modify_eecr(&mut self, f: impl FnOnce(Eecr) -> Eecr) {
        let bits = f(self.read_eecr());
        unsafe { EECR.write_volatile(bits.bits()) }
    }
}

impl EepromRegisters for MmioRegisters {
    fn set_address(&mut self, address: u16) {
        // High byte first; the controller latches the pair on the low write.
        unsafe {
            EEARH.write_volatile((address >> 8) as u8);
            EEARL.write_volatile(address as u8);
        }
    }

    fn set_data(&mut self, data: u8) {
        unsafe { EEDR.write_volatile(data) }
    }

    fn data(&mut self) -> u8 {
        unsafe { EEDR.read_volatile() }
    }

    fn set_mode(&mut self, mode: ProgrammingMode) {
        self.modify_eecr(|mut r| {
            r.remove(Eecr::EEPM);
            r.insert(Eecr::from_bits_truncate(mode.bits() << EEPM_SHIFT));
            r
        });
    }

    fn disable_ready_interrupt(&mut self) {
        self.modify_eecr(|r| r - Eecr::EERIE);
    }

    fn enable_master_write(&mut self) {
        self.modify_eecr(|r| r | Eecr::EEMPE);
    }

    fn trigger_write(&mut self) {
        self.modify_eecr(|r| r | Eecr::EEPE);
    }

    fn trigger_read(&mut self) {
        self.modify_eecr(|r| r | Eecr::EERE);
    }

    fn is_busy(&mut self) -> bool {
        self.read_eecr().contains(Eecr::EEPE)
    }

    fn interrupts_enabled(&self) -> bool {
        (unsafe { SREG.read_volatile() } & SREG_I) != 0
    }

    fn set_interrupts_enabled(&mut self, enabled: bool) {
        let sreg = unsafe { SREG.read_volatile() };
        let sreg = if enabled {
            sreg | SREG_I
        } else {
            sreg & !SREG_I
        };
        unsafe { SREG.write_volatile(sreg) }
    }
}
