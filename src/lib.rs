//! Driver for the MCP23Sxx family of SPI GPIO-expanders.
//!
//! The driver keeps a shadow copy of every register it touches.  Setters modify the shadow copy
//! and write the whole register back to the chip, reads refresh the shadow copy from the chip.
//!
//! ```no_run
//! # let spi = embedded_hal_mock::eh1::spi::Mock::<u8>::new(&[]);
//! use mcp23sxx::{Direction, ExpanderDevice};
//!
//! let mut mcp = ExpanderDevice::new_mcp23s17(spi, false, false, false).unwrap();
//! mcp.configure_direction(0, Direction::Output).unwrap();
//! mcp.write_output(0, true).unwrap();
//!
//! mcp.arm_interrupt(8, true, None).unwrap();
//! // ... after the INT line fired:
//! if let Some(pin) = mcp.read_interrupt_pin().unwrap() {
//!     let levels = mcp.read_captured_state().unwrap();
//!     let _ = (pin, levels.get(pin));
//! }
//! ```
#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

mod bus;
mod common;
pub mod config;
pub mod dev;
mod device;
mod mutex;
mod pin;
pub mod register;

pub use bus::SpiBus;
pub use common::mode;
pub use common::{Direction, Error, InvalidValue, PinStates};
pub use config::ChipConfig;
pub use dev::mcp23s08::MCP23S08;
pub use dev::mcp23s17::MCP23S17;
pub use dev::ChipProfile;
pub use device::{ExpanderDevice, SharedExpander};
pub use mutex::DeviceMutex;
pub use pin::Pin;
pub use register::{Register, RegisterBank};

pub(crate) use bus::SpiExt;
