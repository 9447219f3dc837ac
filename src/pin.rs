use core::marker::PhantomData;
use embedded_hal::digital::{self as hal_digital, ErrorType};

use crate::{Direction, Error, ExpanderDevice};

/// Representation of an expander pin.
///
/// `Pin` is not constructed directly, this type is created by wrapping an expander into a
/// [`SharedExpander`][crate::SharedExpander] and then requesting pins using the `.pin()` method.
pub struct Pin<'a, MODE, MUTEX> {
    pin: u8,
    device: &'a MUTEX,
    _m: PhantomData<MODE>,
}

impl<'a, MODE, MUTEX, SPI> Pin<'a, MODE, MUTEX>
where
    SPI: crate::SpiBus,
    MUTEX: crate::DeviceMutex<Device = ExpanderDevice<SPI>>,
{
    pub(crate) fn new(pin: u8, device: &'a MUTEX) -> Self {
        Self {
            pin,
            device,
            _m: PhantomData,
        }
    }

    pub fn pin_number(&self) -> u8 {
        self.pin
    }

    fn with_mode<M>(self, dir: Direction) -> Result<Pin<'a, M, MUTEX>, Error<SPI::BusError>> {
        self.device
            .lock(|dev| dev.configure_direction(self.pin, dir))?;
        Ok(Pin {
            pin: self.pin,
            device: self.device,
            _m: PhantomData,
        })
    }

    pub fn into_input(self) -> Result<Pin<'a, crate::mode::Input, MUTEX>, Error<SPI::BusError>> {
        self.with_mode(Direction::Input)
    }

    pub fn into_output(self) -> Result<Pin<'a, crate::mode::Output, MUTEX>, Error<SPI::BusError>> {
        self.with_mode(Direction::Output)
    }

    /// Invert the level reported for this pin.
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<SPI::BusError>> {
        self.device.lock(|dev| dev.set_polarity(self.pin, inverted))
    }
}

impl<'a, MODE: crate::mode::HasInput, MUTEX, SPI> Pin<'a, MODE, MUTEX>
where
    SPI: crate::SpiBus,
    MUTEX: crate::DeviceMutex<Device = ExpanderDevice<SPI>>,
{
    pub fn is_high(&self) -> Result<bool, Error<SPI::BusError>> {
        self.device.lock(|dev| dev.read_input(self.pin, true))
    }

    pub fn is_low(&self) -> Result<bool, Error<SPI::BusError>> {
        self.is_high().map(|b| !b)
    }

    pub fn set_pull_up(&mut self, enable: bool) -> Result<(), Error<SPI::BusError>> {
        self.device.lock(|dev| dev.set_pullup(self.pin, enable))
    }

    /// Raise an interrupt on every change, or, with `Some(level)`, whenever the pin differs
    /// from `level`.
    pub fn enable_interrupt(
        &mut self,
        default_compare: Option<bool>,
    ) -> Result<(), Error<SPI::BusError>> {
        self.device
            .lock(|dev| dev.arm_interrupt(self.pin, true, default_compare))
    }

    pub fn disable_interrupt(&mut self) -> Result<(), Error<SPI::BusError>> {
        self.device
            .lock(|dev| dev.arm_interrupt(self.pin, false, None))
    }
}

impl<'a, MODE: crate::mode::HasOutput, MUTEX, SPI> Pin<'a, MODE, MUTEX>
where
    SPI: crate::SpiBus,
    MUTEX: crate::DeviceMutex<Device = ExpanderDevice<SPI>>,
{
    pub fn set_high(&mut self) -> Result<(), Error<SPI::BusError>> {
        self.device.lock(|dev| dev.write_output(self.pin, true))
    }

    pub fn set_low(&mut self) -> Result<(), Error<SPI::BusError>> {
        self.device.lock(|dev| dev.write_output(self.pin, false))
    }

    /// Output level last written, from the shadow register.
    pub fn is_set_high(&self) -> Result<bool, Error<SPI::BusError>> {
        self.device.lock(|dev| dev.read_input(self.pin, false))
    }

    pub fn is_set_low(&self) -> Result<bool, Error<SPI::BusError>> {
        self.is_set_high().map(|b| !b)
    }

    pub fn toggle(&mut self) -> Result<(), Error<SPI::BusError>> {
        self.device.lock(|dev| dev.toggle(self.pin))
    }
}

impl<'a, MODE, MUTEX, SPI> ErrorType for Pin<'a, MODE, MUTEX>
where
    SPI: crate::SpiBus,
    MUTEX: crate::DeviceMutex<Device = ExpanderDevice<SPI>>,
{
    type Error = Error<SPI::BusError>;
}

impl<'a, MODE: crate::mode::HasInput, MUTEX, SPI> hal_digital::InputPin for Pin<'a, MODE, MUTEX>
where
    SPI: crate::SpiBus,
    MUTEX: crate::DeviceMutex<Device = ExpanderDevice<SPI>>,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Pin::is_high(self)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Pin::is_low(self)
    }
}

impl<'a, MODE: crate::mode::HasOutput, MUTEX, SPI> hal_digital::OutputPin
    for Pin<'a, MODE, MUTEX>
where
    SPI: crate::SpiBus,
    MUTEX: crate::DeviceMutex<Device = ExpanderDevice<SPI>>,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Pin::set_low(self)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Pin::set_high(self)
    }
}

impl<'a, MODE: crate::mode::HasOutput, MUTEX, SPI> hal_digital::StatefulOutputPin
    for Pin<'a, MODE, MUTEX>
where
    SPI: crate::SpiBus,
    MUTEX: crate::DeviceMutex<Device = ExpanderDevice<SPI>>,
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Pin::is_set_high(self)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Pin::is_set_low(self)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Pin::toggle(self)
    }
}
