use crate::register::MAX_PINS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Pin is an input (direction bit = 1, the reset state).
    Input,
    /// Pin is an output (direction bit = 0).
    Output,
}

impl Direction {
    pub(crate) fn is_input(self) -> bool {
        self == Direction::Input
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidValue;

    /// Decode the raw register encoding, `1` for input and `0` for output.
    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(Direction::Input),
            0 => Ok(Direction::Output),
            other => Err(InvalidValue::Direction(other)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(d: Direction) -> u8 {
        d.is_input() as u8
    }
}

/// A raw value that has no meaning for the field it was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidValue {
    Direction(u8),
    Config(u8),
}

/// Errors reported by the expander driver.
///
/// `E` is the error type of the underlying SPI device.  Validation errors are raised before any
/// shadow register is touched.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// The SPI transfer failed.  Chip-select has already been released.
    #[error("SPI transfer failed: {0:?}")]
    Bus(E),
    #[error("pin {pin} does not exist on a {pin_count}-pin expander")]
    InvalidPinIndex { pin: u8, pin_count: u8 },
    #[error("{0:#04x} is not a valid pin direction")]
    InvalidDirectionValue(u8),
    #[error("{0:#04x} is not a supported configuration value")]
    InvalidConfigValue(u8),
    #[error("register payload has {actual} bytes, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },
}

impl<E> From<InvalidValue> for Error<E> {
    fn from(v: InvalidValue) -> Self {
        match v {
            InvalidValue::Direction(raw) => Error::InvalidDirectionValue(raw),
            InvalidValue::Config(raw) => Error::InvalidConfigValue(raw),
        }
    }
}

impl<E: core::fmt::Debug> embedded_hal::digital::Error for Error<E> {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// State of every pin of an expander, decoded from one register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinStates {
    bits: u32,
    pin_count: u8,
}

impl PinStates {
    pub(crate) fn new(bits: u32, pin_count: u8) -> Self {
        debug_assert!(pin_count as usize <= MAX_PINS);
        Self { bits, pin_count }
    }

    /// State of `pin`, or `None` if the expander has no such pin.
    pub fn get(&self, pin: u8) -> Option<bool> {
        (pin < self.pin_count).then(|| self.bit(pin))
    }

    /// Raw mask, bit `n` is pin `n`.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn pin_count(&self) -> u8 {
        self.pin_count
    }

    /// All `(pin, state)` pairs, lowest pin first.
    pub fn iter(&self) -> impl Iterator<Item = (u8, bool)> + '_ {
        (0..self.pin_count).map(move |pin| (pin, self.bit(pin)))
    }

    fn bit(&self, pin: u8) -> bool {
        (self.bits.checked_shr(pin as u32).unwrap_or(0) & 1) != 0
    }
}

/// Pin Modes
pub mod mode {
    /// Trait for pin-modes which can be used to set a logic level.
    pub trait HasOutput {}
    /// Trait for pin-modes which can be used to read a logic level.
    pub trait HasInput {}

    /// Pin configured as an input.
    pub struct Input;
    impl HasInput for Input {}

    /// Pin configured as an output.
    pub struct Output;
    impl HasOutput for Output {}
}

#[cfg(test)]
mod tests {
    use super::{Direction, Error, InvalidValue, PinStates};

    #[test]
    fn direction_raw_values() {
        assert_eq!(Direction::try_from(1), Ok(Direction::Input));
        assert_eq!(Direction::try_from(0), Ok(Direction::Output));
        assert_eq!(Direction::try_from(2), Err(InvalidValue::Direction(2)));
        assert_eq!(u8::from(Direction::Input), 1);
        assert_eq!(u8::from(Direction::Output), 0);
    }

    #[test]
    fn invalid_value_maps_to_error() {
        let e: Error<()> = InvalidValue::Direction(7).into();
        assert!(matches!(e, Error::InvalidDirectionValue(7)));
        let e: Error<()> = InvalidValue::Config(0x80).into();
        assert!(matches!(e, Error::InvalidConfigValue(0x80)));
    }

    #[test]
    fn pin_states() {
        let states = PinStates::new(0b1000_0000_0000_0101, 16);
        assert_eq!(states.get(0), Some(true));
        assert_eq!(states.get(1), Some(false));
        assert_eq!(states.get(2), Some(true));
        assert_eq!(states.get(15), Some(true));
        assert_eq!(states.get(16), None);
        assert_eq!(states.iter().count(), 16);
        assert_eq!(states.iter().filter(|(_, s)| *s).count(), 3);
    }
}
