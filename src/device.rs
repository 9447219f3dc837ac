use crate::dev::ChipProfile;
use crate::register::{Register, RegisterBank};
use crate::{ChipConfig, Direction, Error, PinStates, SpiExt};

/// An MCP23Sxx expander together with a shadow copy of its registers.
///
/// Every setter mutates the shadow register and then writes the whole register to the device
/// before returning, so after a successful call shadow and device agree.  Multi-pin setters apply
/// all of their changes first and then issue a single register write.
///
/// Pin indices are validated before anything is touched; an invalid pin anywhere in a request
/// leaves both shadow and device unchanged.
///
/// The device assumes a single owner.  To share it, wrap it into a [`SharedExpander`].
pub struct ExpanderDevice<SPI> {
    spi: SPI,
    addr: u8,
    profile: &'static ChipProfile,
    bank: RegisterBank,
}

impl<SPI: crate::SpiBus> ExpanderDevice<SPI> {
    /// Create a driver for a chip described by `profile`.
    ///
    /// `hw_addr` is the value of the A2..A0 address pins.  The direction (all inputs) and pull-up
    /// (all disabled) registers are written immediately.
    pub fn new(
        spi: SPI,
        profile: &'static ChipProfile,
        hw_addr: u8,
    ) -> Result<Self, Error<SPI::BusError>> {
        let addr = 0x20 | (hw_addr & 0x07);
        log::debug!(
            "{} at {:#04x}: resetting shadow registers",
            profile.name(),
            addr
        );
        let mut dev = Self {
            spi,
            addr,
            profile,
            bank: RegisterBank::new(profile.pin_count()),
        };
        dev.write_through(Register::Direction)?;
        dev.write_through(Register::PullUp)?;
        Ok(dev)
    }

    /// Give back the SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }

    pub fn profile(&self) -> &'static ChipProfile {
        self.profile
    }

    /// The 7-bit device address used in the control byte.
    pub fn address(&self) -> u8 {
        self.addr
    }

    /// Current shadow registers.
    pub fn registers(&self) -> &RegisterBank {
        &self.bank
    }

    fn check_pin(&self, pin: u8) -> Result<(), Error<SPI::BusError>> {
        let pin_count = self.profile.pin_count();
        if pin < pin_count {
            Ok(())
        } else {
            Err(Error::InvalidPinIndex { pin, pin_count })
        }
    }

    fn check_pins(&self, pins: impl IntoIterator<Item = u8>) -> Result<(), Error<SPI::BusError>> {
        pins.into_iter().try_for_each(|pin| self.check_pin(pin))
    }

    fn write_through(&mut self, reg: Register) -> Result<(), Error<SPI::BusError>> {
        self.spi
            .write_regs(
                self.addr,
                self.profile.address(reg),
                self.bank.register(reg),
            )
            .map_err(Error::Bus)
    }

    fn refresh(&mut self, reg: Register) -> Result<(), Error<SPI::BusError>> {
        self.spi
            .read_regs(
                self.addr,
                self.profile.address(reg),
                self.bank.register_mut(reg),
            )
            .map_err(Error::Bus)
    }

    /// Set `pins[n].1` on the bit of `pins[n].0` in `reg` and write the register once.
    fn update_bits(
        &mut self,
        reg: Register,
        pins: &[(u8, bool)],
    ) -> Result<(), Error<SPI::BusError>> {
        self.check_pins(pins.iter().map(|(pin, _)| *pin))?;
        for (pin, value) in pins {
            self.bank.set_bit(reg, *pin, *value);
        }
        self.write_through(reg)
    }

    pub fn configure_direction(
        &mut self,
        pin: u8,
        direction: Direction,
    ) -> Result<(), Error<SPI::BusError>> {
        self.configure_directions(&[(pin, direction)])
    }

    /// Set the direction of several pins with a single register write.
    pub fn configure_directions(
        &mut self,
        pins: &[(u8, Direction)],
    ) -> Result<(), Error<SPI::BusError>> {
        self.check_pins(pins.iter().map(|(pin, _)| *pin))?;
        for (pin, direction) in pins {
            self.bank
                .set_bit(Register::Direction, *pin, direction.is_input());
        }
        self.write_through(Register::Direction)
    }

    pub fn write_output(&mut self, pin: u8, level: bool) -> Result<(), Error<SPI::BusError>> {
        self.write_outputs(&[(pin, level)])
    }

    /// Set the output level of several pins with a single register write.
    ///
    /// Only the shadow value register is modified, the device is not read first.  Level changes
    /// on input pins are therefore not picked up until the next refreshing read.
    pub fn write_outputs(&mut self, pins: &[(u8, bool)]) -> Result<(), Error<SPI::BusError>> {
        self.update_bits(Register::Value, pins)
    }

    pub fn toggle(&mut self, pin: u8) -> Result<(), Error<SPI::BusError>> {
        self.toggle_pins(&[pin])
    }

    /// Invert the shadow output level of `pins` and write the value register once.
    ///
    /// The pin direction is not checked; toggling an input only changes its output latch.
    pub fn toggle_pins(&mut self, pins: &[u8]) -> Result<(), Error<SPI::BusError>> {
        self.check_pins(pins.iter().copied())?;
        for pin in pins {
            self.bank.toggle_bit(Register::Value, *pin);
        }
        self.write_through(Register::Value)
    }

    /// Level of `pin`.  With `refresh`, the value register is read from the device first,
    /// otherwise the last known shadow value is returned.
    pub fn read_input(&mut self, pin: u8, refresh: bool) -> Result<bool, Error<SPI::BusError>> {
        self.read_inputs([pin], refresh).map(|[level]| level)
    }

    /// Level of several pins, in the order they were requested, from a single register read.
    pub fn read_inputs<const N: usize>(
        &mut self,
        pins: [u8; N],
        refresh: bool,
    ) -> Result<[bool; N], Error<SPI::BusError>> {
        self.check_pins(pins)?;
        if refresh {
            self.refresh(Register::Value)?;
        }
        Ok(pins.map(|pin| self.bank.get_bit(Register::Value, pin)))
    }

    pub fn set_pullup(&mut self, pin: u8, enabled: bool) -> Result<(), Error<SPI::BusError>> {
        self.set_pullups(&[(pin, enabled)])
    }

    pub fn set_pullups(&mut self, pins: &[(u8, bool)]) -> Result<(), Error<SPI::BusError>> {
        self.update_bits(Register::PullUp, pins)
    }

    pub fn set_polarity(&mut self, pin: u8, inverted: bool) -> Result<(), Error<SPI::BusError>> {
        self.set_polarities(&[(pin, inverted)])
    }

    pub fn set_polarities(&mut self, pins: &[(u8, bool)]) -> Result<(), Error<SPI::BusError>> {
        self.update_bits(Register::Polarity, pins)
    }

    /// Enable or disable the interrupt-on-change of `pin`.
    ///
    /// With `default_compare = Some(level)` the pin is switched to default-value compare mode
    /// against `level`.  With `None` the compare mode is left as it is: a pin that was once armed
    /// with `Some(_)` keeps comparing against its default value until
    /// [`use_change_compare()`][Self::use_change_compare] is called.
    ///
    /// The enable, default-value and control registers are always written, in that order.
    pub fn arm_interrupt(
        &mut self,
        pin: u8,
        enabled: bool,
        default_compare: Option<bool>,
    ) -> Result<(), Error<SPI::BusError>> {
        self.check_pin(pin)?;
        log::debug!(
            "pin {}: interrupt {}, default compare {:?}",
            pin,
            enabled,
            default_compare
        );
        self.bank.set_bit(Register::InterruptEnable, pin, enabled);
        if let Some(level) = default_compare {
            self.bank.set_bit(Register::DefaultValue, pin, level);
            self.bank.set_bit(Register::InterruptControl, pin, true);
        }
        self.write_through(Register::InterruptEnable)?;
        self.write_through(Register::DefaultValue)?;
        self.write_through(Register::InterruptControl)
    }

    /// Make `pin` trigger on any change again, instead of comparing against its default value.
    pub fn use_change_compare(&mut self, pin: u8) -> Result<(), Error<SPI::BusError>> {
        self.update_bits(Register::InterruptControl, &[(pin, false)])
    }

    /// Read the interrupt flags and return the lowest pin which has its flag set.
    ///
    /// `None` means no interrupt is pending.
    pub fn read_interrupt_pin(&mut self) -> Result<Option<u8>, Error<SPI::BusError>> {
        self.refresh(Register::InterruptFlag)?;
        Ok(self.bank.decode_flag_index(Register::InterruptFlag))
    }

    /// Read the interrupt flags of all pins.
    pub fn read_interrupt_flags(&mut self) -> Result<PinStates, Error<SPI::BusError>> {
        self.refresh(Register::InterruptFlag)?;
        Ok(self.bank.decode_state_map(Register::InterruptFlag))
    }

    /// Read the pin levels latched when the last interrupt occurred.
    ///
    /// On the chip, reading the capture register also clears the pending interrupt.
    pub fn read_captured_state(&mut self) -> Result<PinStates, Error<SPI::BusError>> {
        self.refresh(Register::Captured)?;
        Ok(self.bank.decode_state_map(Register::Captured))
    }

    /// Write the chip-wide options.
    ///
    /// The same value goes to every copy of the configuration register.  `BANK` and `SEQOP` are
    /// always written as 0.
    pub fn configure_chip(&mut self, config: ChipConfig) -> Result<(), Error<SPI::BusError>> {
        let iocon = u8::from(config);
        log::debug!("{}: IOCON = {:#04x}", self.profile.name(), iocon);
        self.bank.register_mut(Register::Config).fill(iocon);
        self.write_through(Register::Config)
    }

    /// Replace the whole shadow register `reg` by `data` and write it to the device.
    ///
    /// `data` must be exactly one byte per port.  Configuration bytes are checked like
    /// [`ChipConfig::try_from()`] and must all be equal.
    pub fn write_register(
        &mut self,
        reg: Register,
        data: &[u8],
    ) -> Result<(), Error<SPI::BusError>> {
        let expected = self.bank.byte_count();
        if data.len() != expected {
            return Err(Error::InvalidLength {
                expected,
                actual: data.len(),
            });
        }
        if reg == Register::Config {
            // One IOCON, mapped at every configuration address.
            if let Some(byte) = data.iter().find(|b| **b != data[0]) {
                return Err(Error::InvalidConfigValue(*byte));
            }
            ChipConfig::try_from(data[0])?;
        }
        self.bank.register_mut(reg).copy_from_slice(data);
        self.write_through(reg)
    }

    /// Read register `reg` from the device into its shadow copy.
    pub fn read_register(&mut self, reg: Register) -> Result<&[u8], Error<SPI::BusError>> {
        self.refresh(reg)?;
        Ok(self.bank.register(reg))
    }
}

/// An expander behind a mutex, handing out individual [`Pin`][crate::Pin]s.
pub struct SharedExpander<M>(M);

impl<SPI: crate::SpiBus> SharedExpander<core::cell::RefCell<ExpanderDevice<SPI>>> {
    pub fn new(device: ExpanderDevice<SPI>) -> Self {
        Self::with_mutex(device)
    }
}

impl<SPI, M> SharedExpander<M>
where
    SPI: crate::SpiBus,
    M: crate::DeviceMutex<Device = ExpanderDevice<SPI>>,
{
    pub fn with_mutex(device: ExpanderDevice<SPI>) -> Self {
        Self(crate::DeviceMutex::create(device))
    }

    /// A handle for `pin`, in the reset state (input).
    pub fn pin(
        &self,
        pin: u8,
    ) -> Result<crate::Pin<'_, crate::mode::Input, M>, Error<SPI::BusError>> {
        self.0.lock(|dev| dev.check_pin(pin))?;
        Ok(crate::Pin::new(pin, &self.0))
    }

    /// Run `f` with exclusive access to the device.
    pub fn lock<R, F: FnOnce(&mut ExpanderDevice<SPI>) -> R>(&self, f: F) -> R {
        self.0.lock(f)
    }

    /// Take the device back, once all pins are dropped.
    pub fn into_inner(self) -> ExpanderDevice<SPI> {
        self.0.into_inner()
    }
}
