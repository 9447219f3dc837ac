//! I/O expander configuration register (`IOCON`).
//!
//! The configuration register is mapped at two addresses on the MCP23S17 (one per port) and at
//! one on the MCP23S08.  The driver always writes the same value to every copy.
use bitflags::bitflags;

bitflags! {
    /// `IOCON` bit layout.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Iocon: u8 {
        /// Register banking.  Must stay 0, every register address in this crate assumes the
        /// interleaved (sequential) map.
        const BANK = 0b1000_0000;
        /// `INT` pins are internally connected (MCP23S17 only).
        const MIRROR = 0b0100_0000;
        /// Disables the address pointer increment.  Must stay 0, multi-byte register access
        /// relies on it.
        const SEQOP = 0b0010_0000;
        /// Slew rate control disabled.
        const DISSLW = 0b0001_0000;
        /// Hardware address pins enabled.
        const HAEN = 0b0000_1000;
        /// `INT` is an open-drain output (overrides `INTPOL`).
        const ODR = 0b0000_0100;
        /// `INT` is active-high.
        const INTPOL = 0b0000_0010;
    }
}

impl Iocon {
    /// Bits which [`ChipConfig`] exposes.
    pub const CONFIGURABLE: Iocon = Iocon::MIRROR
        .union(Iocon::DISSLW)
        .union(Iocon::HAEN)
        .union(Iocon::ODR)
        .union(Iocon::INTPOL);
}

/// Chip-wide options, packed into [`Iocon`].
///
/// `Default` turns every option off, which is also the reset state of the chip.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChipConfig {
    /// Mirror the `INTA`/`INTB` outputs.
    pub mirror_interrupts: bool,
    /// Open-drain interrupt output instead of an active driver.
    pub open_drain_interrupt: bool,
    /// Interrupt output is active-high instead of active-low.
    pub interrupt_active_high: bool,
    /// Use the A2..A0 hardware address pins.
    pub hardware_address: bool,
    /// Disable slew rate control.
    pub disable_slew_rate: bool,
}

impl ChipConfig {
    pub fn to_iocon(&self) -> Iocon {
        let mut iocon = Iocon::empty();
        iocon.set(Iocon::MIRROR, self.mirror_interrupts);
        iocon.set(Iocon::ODR, self.open_drain_interrupt);
        iocon.set(Iocon::INTPOL, self.interrupt_active_high);
        iocon.set(Iocon::HAEN, self.hardware_address);
        iocon.set(Iocon::DISSLW, self.disable_slew_rate);
        iocon
    }
}

impl From<ChipConfig> for u8 {
    fn from(c: ChipConfig) -> u8 {
        c.to_iocon().bits()
    }
}

impl TryFrom<u8> for ChipConfig {
    type Error = crate::InvalidValue;

    /// Decode a raw `IOCON` value.  `BANK`, `SEQOP` and the unimplemented bit 0 are rejected.
    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        let iocon = Iocon::from_bits_retain(raw);
        if !Iocon::CONFIGURABLE.contains(iocon) {
            return Err(crate::InvalidValue::Config(raw));
        }
        Ok(Self {
            mirror_interrupts: iocon.contains(Iocon::MIRROR),
            open_drain_interrupt: iocon.contains(Iocon::ODR),
            interrupt_active_high: iocon.contains(Iocon::INTPOL),
            hardware_address: iocon.contains(Iocon::HAEN),
            disable_slew_rate: iocon.contains(Iocon::DISSLW),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ChipConfig;
    use crate::InvalidValue;

    #[test]
    fn bit_positions() {
        assert_eq!(u8::from(ChipConfig::default()), 0x00);
        let single = [
            (
                ChipConfig {
                    interrupt_active_high: true,
                    ..Default::default()
                },
                1 << 1,
            ),
            (
                ChipConfig {
                    open_drain_interrupt: true,
                    ..Default::default()
                },
                1 << 2,
            ),
            (
                ChipConfig {
                    hardware_address: true,
                    ..Default::default()
                },
                1 << 3,
            ),
            (
                ChipConfig {
                    disable_slew_rate: true,
                    ..Default::default()
                },
                1 << 4,
            ),
            (
                ChipConfig {
                    mirror_interrupts: true,
                    ..Default::default()
                },
                1 << 6,
            ),
        ];
        for (config, bits) in single {
            assert_eq!(u8::from(config), bits);
        }
    }

    #[test]
    fn all_options_never_touch_bank_or_seqop() {
        let all = ChipConfig {
            mirror_interrupts: true,
            open_drain_interrupt: true,
            interrupt_active_high: true,
            hardware_address: true,
            disable_slew_rate: true,
        };
        assert_eq!(u8::from(all), 0b0101_1110);
        assert_eq!(ChipConfig::try_from(0b0101_1110), Ok(all));
    }

    #[test]
    fn reserved_bits_rejected() {
        assert_eq!(ChipConfig::try_from(0x80), Err(InvalidValue::Config(0x80)));
        assert_eq!(ChipConfig::try_from(0x20), Err(InvalidValue::Config(0x20)));
        assert_eq!(ChipConfig::try_from(0x01), Err(InvalidValue::Config(0x01)));
    }
}
