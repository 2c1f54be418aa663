//! `InspectApp` trait definition.

use std::io::{self, Write};

use vkinspect_gpu::{vk, DriverInstance};

/// Trait for vkinspect tools.
///
/// The runner owns instance creation, device enumeration and teardown; an
/// implementation only decides what to query and print for each device.
pub trait InspectApp {
    /// Write the lines that precede the first device.
    ///
    /// Called once, after enumeration found at least one device.
    fn write_header<W: Write>(&mut self, out: &mut W, device_count: usize) -> io::Result<()>;

    /// Query and report one device.
    ///
    /// Called once per device, in enumeration order. Returning an error ends
    /// the run with a failure exit code.
    fn inspect_device<D: DriverInstance, W: Write>(
        &mut self,
        driver: &D,
        device: vk::PhysicalDevice,
        out: &mut W,
    ) -> anyhow::Result<()>;
}
