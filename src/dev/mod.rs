//! The device module contains the register maps of each of the supported expanders.
//!
//! A chip variant is pure data, a [`ChipProfile`].  All bit addressing and decoding is shared and
//! only depends on the pin count.
use crate::register::{Register, MAX_PINS};

pub mod mcp23s08;
pub mod mcp23s17;

/// Register addresses of one chip variant, for `IOCON.BANK = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterMap {
    pub direction: u8,
    pub polarity: u8,
    pub interrupt_enable: u8,
    pub default_value: u8,
    pub interrupt_control: u8,
    pub config: u8,
    pub pull_up: u8,
    pub interrupt_flag: u8,
    pub captured: u8,
    pub value: u8,
}

impl RegisterMap {
    /// Address of the first byte of `reg`.  Wider registers continue at the following addresses.
    pub const fn address(&self, reg: Register) -> u8 {
        match reg {
            Register::Direction => self.direction,
            Register::Polarity => self.polarity,
            Register::InterruptEnable => self.interrupt_enable,
            Register::DefaultValue => self.default_value,
            Register::InterruptControl => self.interrupt_control,
            Register::Config => self.config,
            Register::PullUp => self.pull_up,
            Register::InterruptFlag => self.interrupt_flag,
            Register::Captured => self.captured,
            Register::Value => self.value,
        }
    }
}

/// A chip variant: its name, number of pins and register map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipProfile {
    name: &'static str,
    pin_count: u8,
    registers: RegisterMap,
}

impl ChipProfile {
    pub const fn new(name: &'static str, pin_count: u8, registers: RegisterMap) -> Self {
        assert!(pin_count > 0 && pin_count as usize <= MAX_PINS);
        Self {
            name,
            pin_count,
            registers,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn pin_count(&self) -> u8 {
        self.pin_count
    }

    pub const fn registers(&self) -> &RegisterMap {
        &self.registers
    }

    pub const fn address(&self, reg: Register) -> u8 {
        self.registers.address(reg)
    }
}
