//! OS event-delivery backends.
//!
//! Each backend implements [`autotype_core::EventSink`] and owns the OS
//! handle for the lifetime of one typing run. The virtual device is torn
//! down on drop, so an aborted run never leaves a phantom keyboard behind.

#[cfg(target_os = "linux")]
pub mod uinput;

use autotype_core::{EventSink, KeySpace, SinkError};

use crate::cli::Backend;

/// Name the virtual device announces to the input subsystem.
pub const DEVICE_NAME: &str = "autotype virtual keyboard";

/// Opens the event sink for the requested backend, registering `keys` as
/// the device's supported key set.
///
/// `Auto` currently resolves to uinput, the only shipped backend. On
/// non-Linux platforms every choice fails with a clear error instead of
/// silently doing nothing.
pub fn create_sink(backend: Backend, keys: &KeySpace) -> Result<Box<dyn EventSink>, SinkError> {
    match backend {
        Backend::Auto | Backend::Uinput => open_uinput(keys),
    }
}

#[cfg(target_os = "linux")]
fn open_uinput(keys: &KeySpace) -> Result<Box<dyn EventSink>, SinkError> {
    Ok(Box::new(uinput::UinputSink::create(DEVICE_NAME, keys)?))
}

#[cfg(not(target_os = "linux"))]
fn open_uinput(_keys: &KeySpace) -> Result<Box<dyn EventSink>, SinkError> {
    Err(SinkError::DeviceUnavailable(
        "the uinput backend is only available on Linux".into(),
    ))
}
