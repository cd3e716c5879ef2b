//! Linux virtual keyboard backed by `/dev/uinput`.
//!
//! The device registers exactly the keys the caller hands over (the
//! resolved mapping's key set plus the engine's service keys), and that
//! set becomes its key space. The kernel destroys the device when the fd
//! is closed, which `VirtualDevice`'s drop handles.

use std::io;
use std::path::Path;

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, EventType, InputEvent, Key};
use tracing::{info, trace};

use autotype_core::{EventSink, KeyName, KeySpace, SinkError};

const UINPUT_PATH: &str = "/dev/uinput";

/// An event sink that injects key events through a uinput virtual device.
pub struct UinputSink {
    device: VirtualDevice,
    key_space: KeySpace,
}

impl UinputSink {
    /// Creates the virtual keyboard with `key_space` as its supported keys.
    ///
    /// Open failures are translated into actionable errors: a missing
    /// `/dev/uinput` points at the kernel module, a permission failure at
    /// the udev/group setup.
    pub fn create(device_name: &str, key_space: &KeySpace) -> Result<Self, SinkError> {
        if !Path::new(UINPUT_PATH).exists() {
            return Err(missing_device());
        }

        let mut keys = AttributeSet::<Key>::new();
        for key in key_space.iter() {
            keys.insert(Key::new(key.code()));
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(map_open_error)?
            .name(device_name)
            .with_keys(&keys)
            .map_err(map_open_error)?
            .build()
            .map_err(map_open_error)?;

        info!(
            device = device_name,
            keys = key_space.len(),
            "virtual keyboard created"
        );
        Ok(Self {
            device,
            key_space: key_space.clone(),
        })
    }

    fn emit(&mut self, key: KeyName, value: i32) -> Result<(), SinkError> {
        let event = InputEvent::new(EventType::KEY, key.code(), value);
        self.device.emit(&[event])?;
        Ok(())
    }
}

impl EventSink for UinputSink {
    fn press(&mut self, key: KeyName) -> Result<(), SinkError> {
        trace!(key = key.name(), "press");
        self.emit(key, 1)
    }

    fn release(&mut self, key: KeyName) -> Result<(), SinkError> {
        trace!(key = key.name(), "release");
        self.emit(key, 0)
    }

    fn key_space(&self) -> &KeySpace {
        &self.key_space
    }
}

fn missing_device() -> SinkError {
    SinkError::DeviceUnavailable(format!(
        "{UINPUT_PATH} does not exist; load the kernel module with `sudo modprobe uinput`"
    ))
}

fn map_open_error(err: io::Error) -> SinkError {
    match err.kind() {
        io::ErrorKind::PermissionDenied => SinkError::PermissionDenied(format!(
            "cannot open {UINPUT_PATH}: {err}; run as root or give your user \
             write access, e.g. a udev rule for the `input` group"
        )),
        io::ErrorKind::NotFound => missing_device(),
        _ => SinkError::DeviceUnavailable(format!("cannot create uinput device: {err}")),
    }
}
