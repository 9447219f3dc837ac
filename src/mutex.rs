/// Lock around an [`ExpanderDevice`][crate::ExpanderDevice] shared by several pin handles.
///
/// Every [`Pin`][crate::Pin] handed out by a [`SharedExpander`][crate::SharedExpander] goes
/// through this lock for each register access, so a read-modify-write of a shadow register and
/// the SPI transaction that follows it are never interleaved with another pin's access.
///
/// | Mutex | Feature | Use |
/// | --- | --- | --- |
/// | [`core::cell::RefCell`] | _always_ | All pins used from one execution context. |
/// | [`std::sync::Mutex`][mutex-std] | `std` | Pins moved to other threads. |
/// | [`critical_section::Mutex`][mutex-cs] | `critical-section` | Pins used in interrupt handlers. |
///
/// [mutex-std]: https://doc.rust-lang.org/std/sync/struct.Mutex.html
/// [mutex-cs]: https://docs.rs/critical-section/latest/critical_section/struct.Mutex.html
///
/// Other locks need a newtype because of the orphan rule:
///
/// ```
/// struct SpinLock<T>(std::sync::Mutex<T>);
///
/// impl<T> mcp23sxx::DeviceMutex for SpinLock<T> {
///     type Device = T;
///
///     fn create(device: T) -> Self {
///         Self(std::sync::Mutex::new(device))
///     }
///
///     fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
///         loop {
///             if let Ok(mut device) = self.0.try_lock() {
///                 return f(&mut device);
///             }
///             core::hint::spin_loop();
///         }
///     }
///
///     fn into_inner(self) -> T {
///         self.0.into_inner().unwrap()
///     }
/// }
/// ```
pub trait DeviceMutex {
    type Device;

    fn create(device: Self::Device) -> Self;

    /// Run `f` with exclusive access to the device.
    fn lock<R, F: FnOnce(&mut Self::Device) -> R>(&self, f: F) -> R;

    /// Take the device back out, once no pin handle borrows the lock anymore.
    fn into_inner(self) -> Self::Device;
}

impl<T> DeviceMutex for core::cell::RefCell<T> {
    type Device = T;

    fn create(device: T) -> Self {
        core::cell::RefCell::new(device)
    }

    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        f(&mut self.borrow_mut())
    }

    fn into_inner(self) -> T {
        core::cell::RefCell::into_inner(self)
    }
}

#[cfg(any(test, feature = "std"))]
impl<T> DeviceMutex for std::sync::Mutex<T> {
    type Device = T;

    fn create(device: T) -> Self {
        std::sync::Mutex::new(device)
    }

    /// A poisoned lock is used as is.
    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        match std::sync::Mutex::lock(self) {
            Ok(mut device) => f(&mut device),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    fn into_inner(self) -> T {
        match std::sync::Mutex::into_inner(self) {
            Ok(device) => device,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(feature = "critical-section")]
impl<T> DeviceMutex for critical_section::Mutex<core::cell::RefCell<T>> {
    type Device = T;

    fn create(device: T) -> Self {
        critical_section::Mutex::new(core::cell::RefCell::new(device))
    }

    fn lock<R, F: FnOnce(&mut T) -> R>(&self, f: F) -> R {
        critical_section::with(|cs| f(&mut self.borrow_ref_mut(cs)))
    }

    fn into_inner(self) -> T {
        critical_section::Mutex::into_inner(self).into_inner()
    }
}
