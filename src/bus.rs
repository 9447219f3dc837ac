use embedded_hal::spi::{self as hal_spi, Operation, SpiDevice};

/// Read/write bit of the control byte.
const READ: u8 = 0x01;

/// Blanket trait for types implementing `spi::SpiDevice`
///
/// The `SpiDevice` owns chip-select: it is asserted for the duration of one transaction and
/// released on every exit path, including a failed transfer.
pub trait SpiBus: SpiDevice<u8> {
    type BusError: From<<Self as hal_spi::ErrorType>::Error> + core::fmt::Debug;
}

impl<T, E> SpiBus for T
where
    T: SpiDevice<u8, Error = E>,
    E: core::fmt::Debug,
{
    type BusError = E;
}

/// Control byte preceding the register address in every transaction.
fn control_byte(addr: u8, read: bool) -> u8 {
    (addr << 1) | if read { READ } else { 0 }
}

pub(crate) trait SpiExt {
    type Error;

    fn write_regs(&mut self, addr: u8, reg: u8, data: &[u8]) -> Result<(), Self::Error>;
    fn read_regs(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

impl<SPI: SpiBus> SpiExt for SPI {
    type Error = SPI::BusError;

    fn write_regs(&mut self, addr: u8, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        log::trace!("write {:#04x}@{:#04x}: {:02x?}", reg, addr, data);
        let header = [control_byte(addr, false), reg];
        self.transaction(&mut [Operation::Write(&header), Operation::Write(data)])?;
        Ok(())
    }

    fn read_regs(&mut self, addr: u8, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let header = [control_byte(addr, true), reg];
        self.transaction(&mut [Operation::Write(&header), Operation::Read(buf)])?;
        log::trace!("read {:#04x}@{:#04x}: {:02x?}", reg, addr, buf);
        Ok(())
    }
}
