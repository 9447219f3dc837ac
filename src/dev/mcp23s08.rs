//! Support for the `MCP23S08` "8-Bit I/O Expander with Serial Interface"
//!
//! Datasheet: https://ww1.microchip.com/downloads/en/DeviceDoc/MCP23008-MCP23S08-Data-Sheet-20001919F.pdf
//!
//! The MCP23S08 offers one eight-bit GPIO port.  It has two address pins, so four devices can
//! share a chip-select line once `IOCON.HAEN` is set.
use super::{ChipProfile, RegisterMap};

/// N.B.: The MCP23S08 has a single `IOCON` at 0x05, and `MIRROR`/`BANK` are unimplemented on it.
pub static MCP23S08: ChipProfile = ChipProfile::new(
    "MCP23S08",
    8,
    RegisterMap {
        direction: 0x00,
        polarity: 0x01,
        interrupt_enable: 0x02,
        default_value: 0x03,
        interrupt_control: 0x04,
        config: 0x05,
        pull_up: 0x06,
        interrupt_flag: 0x07,
        captured: 0x08,
        value: 0x09,
    },
);

impl<SPI: crate::SpiBus> crate::ExpanderDevice<SPI> {
    /// Create a new instance of the MCP23S08
    pub fn new_mcp23s08(spi: SPI, a0: bool, a1: bool) -> Result<Self, crate::Error<SPI::BusError>> {
        let hw_addr = ((a1 as u8) << 1) | (a0 as u8);
        Self::new(spi, &MCP23S08, hw_addr)
    }
}
