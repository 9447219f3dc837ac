//! Shadow copies of the expander registers and the bit addressing shared by all chip variants.
//!
//! Pin `p` lives in byte `p / 8` of a register at bit `p % 8`, so byte 0 holds pins 0..=7.
use crate::PinStates;

/// Largest pin count a [`RegisterBank`] can address.
pub const MAX_PINS: usize = 32;
/// Largest register width, in bytes.
pub const MAX_REGISTER_BYTES: usize = MAX_PINS / 8;

/// The registers the driver keeps a shadow copy of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// IODIR: 1=input; 0=output
    Direction,
    /// IPOL: 1=GPIO bit reflects the inverted pin level
    Polarity,
    /// GPINTEN: interrupt-on-change enable
    InterruptEnable,
    /// DEFVAL: reference value for default-value compare mode
    DefaultValue,
    /// INTCON: 1=compare against DEFVAL; 0=compare against previous pin value
    InterruptControl,
    /// IOCON: configuration
    Config,
    /// GPPU: pull-up enable
    PullUp,
    /// INTF: which pin raised the pending interrupt
    InterruptFlag,
    /// INTCAP: pin levels latched when the interrupt was raised
    Captured,
    /// GPIO: pin levels; writes go to the output latch
    Value,
}

impl Register {
    pub const COUNT: usize = 10;

    pub const ALL: [Register; Register::COUNT] = [
        Register::Direction,
        Register::Polarity,
        Register::InterruptEnable,
        Register::DefaultValue,
        Register::InterruptControl,
        Register::Config,
        Register::PullUp,
        Register::InterruptFlag,
        Register::Captured,
        Register::Value,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

pub(crate) fn byte_count(pin_count: u8) -> usize {
    (pin_count as usize).div_ceil(8)
}

/// Whether the bit for `pin` is set in `buf`.
pub fn get_bit(buf: &[u8], pin: u8) -> bool {
    buf[pin as usize / 8] & (1 << (pin % 8)) != 0
}

/// Set or clear the bit for `pin` in `buf`.
pub fn set_bit(buf: &mut [u8], pin: u8, value: bool) {
    let mask = 1 << (pin % 8);
    if value {
        buf[pin as usize / 8] |= mask;
    } else {
        buf[pin as usize / 8] &= !mask;
    }
}

/// Flip the bit for `pin` in `buf`.
pub fn toggle_bit(buf: &mut [u8], pin: u8) {
    buf[pin as usize / 8] ^= 1 << (pin % 8);
}

/// Index of the lowest set bit in `buf`, scanning byte 0 first and each byte from its LSB.
///
/// Callers are expected to only decode a flag register once an interrupt is known to be pending.
/// With no bit set at all there is no pin to report, and `None` is returned.
pub fn decode_flag_index(buf: &[u8]) -> Option<usize> {
    buf.iter()
        .enumerate()
        .find(|(_, byte)| **byte != 0)
        .map(|(i, byte)| i * 8 + byte.trailing_zeros() as usize)
}

/// State of each of the first `pin_count` bits of `buf`.
///
/// Returns `None` if `pin_count` exceeds [`MAX_PINS`] or `buf` is too short to hold `pin_count`
/// bits.  Bytes past the last pin are ignored.
pub fn decode_state_map(buf: &[u8], pin_count: u8) -> Option<PinStates> {
    if pin_count as usize > MAX_PINS || buf.len() < byte_count(pin_count) {
        return None;
    }
    Some(pack_states(buf, pin_count))
}

fn pack_states(buf: &[u8], pin_count: u8) -> PinStates {
    let bits = buf
        .iter()
        .take(byte_count(pin_count))
        .enumerate()
        .fold(0u32, |bits, (i, byte)| bits | (*byte as u32) << (i * 8));
    let mask = u32::MAX
        .checked_shr(MAX_PINS.saturating_sub(pin_count as usize) as u32)
        .unwrap_or(0);
    PinStates::new(bits & mask, pin_count)
}

/// Shadow copy of every register of one expander.
///
/// Each register is `byte_count = ceil(pin_count / 8)` bytes wide.  The bank never talks to the
/// device itself, keeping it in sync is the job of [`ExpanderDevice`][crate::ExpanderDevice].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBank {
    pin_count: u8,
    byte_count: usize,
    shadow: [[u8; MAX_REGISTER_BYTES]; Register::COUNT],
}

impl RegisterBank {
    /// Bank with the reset values: every pin an input, everything else zero.
    pub fn new(pin_count: u8) -> Self {
        assert!(pin_count > 0 && pin_count as usize <= MAX_PINS);
        let byte_count = byte_count(pin_count);
        let mut bank = Self {
            pin_count,
            byte_count,
            shadow: [[0x00; MAX_REGISTER_BYTES]; Register::COUNT],
        };
        bank.register_mut(Register::Direction).fill(0xff);
        bank
    }

    pub fn pin_count(&self) -> u8 {
        self.pin_count
    }

    pub fn byte_count(&self) -> usize {
        self.byte_count
    }

    pub fn register(&self, reg: Register) -> &[u8] {
        &self.shadow[reg.index()][..self.byte_count]
    }

    pub fn register_mut(&mut self, reg: Register) -> &mut [u8] {
        &mut self.shadow[reg.index()][..self.byte_count]
    }

    pub fn get_bit(&self, reg: Register, pin: u8) -> bool {
        debug_assert!(pin < self.pin_count);
        get_bit(self.register(reg), pin)
    }

    pub fn set_bit(&mut self, reg: Register, pin: u8, value: bool) {
        debug_assert!(pin < self.pin_count);
        set_bit(self.register_mut(reg), pin, value)
    }

    pub fn toggle_bit(&mut self, reg: Register, pin: u8) {
        debug_assert!(pin < self.pin_count);
        toggle_bit(self.register_mut(reg), pin)
    }

    /// See [`decode_flag_index`].
    pub fn decode_flag_index(&self, reg: Register) -> Option<u8> {
        decode_flag_index(self.register(reg))
            .filter(|pin| *pin < self.pin_count as usize)
            .map(|pin| pin as u8)
    }

    pub fn decode_state_map(&self, reg: Register) -> PinStates {
        pack_states(self.register(reg), self.pin_count)
    }
}

#[cfg(test)]
mod tests {
    use super::{Register, RegisterBank};

    #[test]
    fn reset_values() {
        let bank = RegisterBank::new(16);
        assert_eq!(bank.byte_count(), 2);
        assert_eq!(bank.register(Register::Direction), &[0xff, 0xff]);
        for reg in Register::ALL {
            if reg != Register::Direction {
                assert_eq!(bank.register(reg), &[0x00, 0x00], "{:?}", reg);
            }
        }
        assert_eq!(RegisterBank::new(8).register(Register::PullUp), &[0x00]);
        assert_eq!(RegisterBank::new(12).byte_count(), 2);
    }

    #[test]
    fn bit_isolation() {
        for pin_count in [8u8, 16] {
            for p in 0..pin_count {
                let mut buf = [0x00u8; 2];
                let buf = &mut buf[..super::byte_count(pin_count)];
                super::set_bit(buf, p, true);
                assert!(super::get_bit(buf, p));
                for q in (0..pin_count).filter(|q| *q != p) {
                    super::set_bit(buf, q, true);
                    assert!(super::get_bit(buf, p));
                    super::set_bit(buf, q, false);
                    assert!(super::get_bit(buf, p));
                }
                super::set_bit(buf, p, false);
                assert!(buf.iter().all(|b| *b == 0));
            }
        }
    }

    #[test]
    fn addressing() {
        let mut buf = [0x00u8; 2];
        super::set_bit(&mut buf, 0, true);
        super::set_bit(&mut buf, 9, true);
        super::set_bit(&mut buf, 15, true);
        assert_eq!(buf, [0x01, 0x82]);
        super::toggle_bit(&mut buf, 9);
        super::toggle_bit(&mut buf, 3);
        assert_eq!(buf, [0x09, 0x80]);
    }

    #[test]
    fn flag_index_single_bit() {
        for n in [8u8, 16] {
            for k in 0..n {
                let mut buf = [0x00u8; 2];
                let buf = &mut buf[..super::byte_count(n)];
                super::set_bit(buf, k, true);
                assert_eq!(super::decode_flag_index(buf), Some(k as usize));
            }
        }
    }

    #[test]
    fn flag_index_lowest_wins() {
        assert_eq!(super::decode_flag_index(&[0b0010_1000, 0x01]), Some(3));
        assert_eq!(super::decode_flag_index(&[0x00, 0b1100_0000]), Some(14));
        assert_eq!(super::decode_flag_index(&[0x00, 0x00]), None);
        assert_eq!(super::decode_flag_index(&[0x00]), None);
    }

    #[test]
    fn flag_index_beyond_two_bytes() {
        assert_eq!(super::decode_flag_index(&[0x00, 0x00, 0x04]), Some(18));
        assert_eq!(
            super::decode_flag_index(&[0x00, 0x00, 0x00, 0x80]),
            Some(31)
        );

        let mut wide = [0x00u8; 33];
        wide[32] = 0x01;
        assert_eq!(super::decode_flag_index(&wide), Some(256));
        wide[40 / 8] = 0x02;
        assert_eq!(super::decode_flag_index(&wide), Some(41));
    }

    #[test]
    fn state_map() {
        let cases = [
            (8u8, &[0xff][..], &[0x00][..]),
            (16, &[0xff, 0xff][..], &[0x00, 0x00][..]),
        ];
        for (n, ones, zeros) in cases {
            let states = super::decode_state_map(ones, n).unwrap();
            assert_eq!(states.iter().count(), n as usize);
            assert!(states.iter().all(|(_, s)| s));
            let states = super::decode_state_map(zeros, n).unwrap();
            assert!(states.iter().all(|(_, s)| !s));
        }

        let states = super::decode_state_map(&[0b0000_0101, 0b1000_0000], 16).unwrap();
        assert_eq!(states.get(0), Some(true));
        assert_eq!(states.get(1), Some(false));
        assert_eq!(states.get(2), Some(true));
        assert_eq!(states.get(8), Some(false));
        assert_eq!(states.get(15), Some(true));

        let states = super::decode_state_map(&[0x00, 0x00, 0x01], 24).unwrap();
        assert_eq!(states.get(16), Some(true));
        assert_eq!(states.bits(), 1 << 16);
    }

    #[test]
    fn state_map_ignores_bits_past_pin_count() {
        let states = super::decode_state_map(&[0xff, 0xff], 12).unwrap();
        assert_eq!(states.bits(), 0x0fff);
        assert_eq!(states.get(12), None);

        let states = super::decode_state_map(&[0x01, 0x00, 0xff], 8).unwrap();
        assert_eq!(states.bits(), 0x01);
    }

    #[test]
    fn state_map_rejects_unrepresentable_input() {
        assert_eq!(super::decode_state_map(&[0xff; 5], 40), None);
        assert_eq!(super::decode_state_map(&[0xff], 16), None);
        assert_eq!(super::decode_state_map(&[], 1), None);
        let states = super::decode_state_map(&[0xff; 4], 32).unwrap();
        assert_eq!(states.bits(), u32::MAX);
        assert_eq!(states.get(31), Some(true));
        assert_eq!(states.iter().count(), 32);
    }

    #[test]
    fn bank_bit_access() {
        let mut bank = RegisterBank::new(16);
        bank.set_bit(Register::Value, 10, true);
        assert!(bank.get_bit(Register::Value, 10));
        assert_eq!(bank.register(Register::Value), &[0x00, 0x04]);
        bank.toggle_bit(Register::Value, 10);
        assert!(!bank.get_bit(Register::Value, 10));

        bank.register_mut(Register::InterruptFlag)[1] = 0x20;
        assert_eq!(bank.decode_flag_index(Register::InterruptFlag), Some(13));
    }
}
