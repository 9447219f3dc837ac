//! Support for the `MCP23S17` "16-Bit I/O Expander with Serial Interface"
//!
//! Datasheet: https://ww1.microchip.com/downloads/en/devicedoc/20001952c.pdf
//!
//! The MCP23S17 offers two eight-bit GPIO ports.  It has three address pins, so eight devices can
//! share a chip-select line once `IOCON.HAEN` is set.
//!
//! Pins 0..=7 are port A and pins 8..=15 are port B.  Every register is accessed as a two-byte
//! sequential transfer starting at its port A address.
use super::{ChipProfile, RegisterMap};

/// N.B.: These values are for BANK=0, which is the reset state of the chip (and this driver does
/// not change).  `IOCON` is mirrored at 0x0a and 0x0b.
pub static MCP23S17: ChipProfile = ChipProfile::new(
    "MCP23S17",
    16,
    RegisterMap {
        direction: 0x00,
        polarity: 0x02,
        interrupt_enable: 0x04,
        default_value: 0x06,
        interrupt_control: 0x08,
        config: 0x0a,
        pull_up: 0x0c,
        interrupt_flag: 0x0e,
        captured: 0x10,
        value: 0x12,
    },
);

impl<SPI: crate::SpiBus> crate::ExpanderDevice<SPI> {
    /// Create a new instance of the MCP23S17
    pub fn new_mcp23s17(
        spi: SPI,
        a0: bool,
        a1: bool,
        a2: bool,
    ) -> Result<Self, crate::Error<SPI::BusError>> {
        let hw_addr = ((a2 as u8) << 2) | ((a1 as u8) << 1) | (a0 as u8);
        Self::new(spi, &MCP23S17, hw_addr)
    }
}
