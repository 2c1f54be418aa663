//! Physical device enumeration and identity.

use crate::driver::DriverInstance;
use crate::enumerate::query_count_then_fill;
use crate::error::{GpuError, Result};
use ash::vk;
use std::fmt;

/// Enumerate all physical devices of an instance.
///
/// Returns [`GpuError::NoDevice`] when the driver reports none.
pub fn enumerate_physical_devices<D: DriverInstance>(
    driver: &D,
) -> Result<Vec<vk::PhysicalDevice>> {
    let devices = query_count_then_fill(|count, out| {
        driver.enumerate_physical_devices_raw(count, out)
    })?;

    if devices.is_empty() {
        return Err(GpuError::NoDevice);
    }

    tracing::debug!("Enumerated {} physical devices", devices.len());
    Ok(devices)
}

/// Packed Vulkan version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion(u32);

impl ApiVersion {
    /// Wrap a packed version as returned by the driver.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Pack a version from its parts.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self(vk::make_api_version(0, major, minor, patch))
    }

    /// The packed value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn variant(self) -> u32 {
        vk::api_version_variant(self.0)
    }

    pub const fn major(self) -> u32 {
        vk::api_version_major(self.0)
    }

    pub const fn minor(self) -> u32 {
        vk::api_version_minor(self.0)
    }

    pub const fn patch(self) -> u32 {
        vk::api_version_patch(self.0)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major(), self.minor(), self.patch())
    }
}

/// GPU vendor identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpuVendor {
    Nvidia,
    Amd,
    Intel,
    Apple,
    Arm,
    Qualcomm,
    Other(u32),
}

impl GpuVendor {
    /// Identify vendor from PCI vendor ID.
    pub const fn from_vendor_id(id: u32) -> Self {
        match id {
            0x10DE => Self::Nvidia,
            0x1002 => Self::Amd,
            0x8086 => Self::Intel,
            0x106B => Self::Apple,
            0x13B5 => Self::Arm,
            0x5143 => Self::Qualcomm,
            other => Self::Other(other),
        }
    }
}

/// Identity of a physical device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Device name
    pub name: String,
    /// PCI vendor ID
    pub vendor_id: u32,
    /// Vendor-specific device ID
    pub device_id: u32,
    /// Highest Vulkan version the device supports
    pub api_version: ApiVersion,
    /// Vendor-specific driver version, left undecoded
    pub driver_version: u32,
}

impl DeviceInfo {
    /// Read the identity properties of a device.
    pub fn query<D: DriverInstance>(driver: &D, device: vk::PhysicalDevice) -> Self {
        let info = Self::from_properties(&driver.device_properties(device));
        tracing::info!(
            "Found GPU: {} ({:?}) - Vulkan {}",
            info.name,
            info.vendor(),
            info.api_version
        );
        info
    }

    /// Copy the identity fields out of raw device properties.
    pub fn from_properties(properties: &vk::PhysicalDeviceProperties) -> Self {
        let name = properties
            .device_name_as_c_str()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name,
            vendor_id: properties.vendor_id,
            device_id: properties.device_id,
            api_version: ApiVersion::from_raw(properties.api_version),
            driver_version: properties.driver_version,
        }
    }

    pub const fn vendor(&self) -> GpuVendor {
        GpuVendor::from_vendor_id(self.vendor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDevice, FakeDriver};

    #[test]
    fn version_decomposes_into_parts() {
        let version = ApiVersion::from_raw(vk::make_api_version(0, 1, 2, 3));
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
        assert_eq!(version.variant(), 0);
        assert_eq!(version.to_string(), "1.2.3");
    }

    #[test]
    fn version_uses_vulkan_bit_layout() {
        // major in bits 22..29, minor in 12..22, patch in 0..12
        let raw = (1 << 22) | (3 << 12) | 275;
        assert_eq!(ApiVersion::from_raw(raw), ApiVersion::new(1, 3, 275));
        assert_eq!(ApiVersion::from_raw(raw).to_string(), "1.3.275");
    }

    #[test]
    fn vendor_identification() {
        assert_eq!(GpuVendor::from_vendor_id(0x10DE), GpuVendor::Nvidia);
        assert_eq!(GpuVendor::from_vendor_id(0x1002), GpuVendor::Amd);
        assert_eq!(GpuVendor::from_vendor_id(0x8086), GpuVendor::Intel);
        assert_eq!(GpuVendor::from_vendor_id(0x1234), GpuVendor::Other(0x1234));
    }

    #[test]
    fn identity_is_copied_from_properties() {
        let driver = FakeDriver::new(vec![FakeDevice::new("Test GPU", 0x10DE, 0x2684)
            .api_version(ApiVersion::new(1, 3, 280))
            .driver_version(0x8a4c_8000)]);
        let devices = enumerate_physical_devices(&driver).unwrap();

        let info = DeviceInfo::query(&driver, devices[0]);
        assert_eq!(info.name, "Test GPU");
        assert_eq!(info.vendor_id, 0x10DE);
        assert_eq!(info.device_id, 0x2684);
        assert_eq!(info.api_version.to_string(), "1.3.280");
        assert_eq!(info.driver_version, 0x8a4c_8000);
        assert_eq!(info.vendor(), GpuVendor::Nvidia);
    }

    #[test]
    fn enumeration_returns_every_device_in_order() {
        let driver = FakeDriver::new(vec![
            FakeDevice::new("first", 1, 1),
            FakeDevice::new("second", 2, 2),
            FakeDevice::new("third", 3, 3),
        ]);
        let devices = enumerate_physical_devices(&driver).unwrap();
        assert_eq!(devices.len(), 3);

        let names: Vec<String> = devices
            .iter()
            .map(|&device| DeviceInfo::query(&driver, device).name)
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn zero_devices_is_reported_distinctly() {
        let driver = FakeDriver::new(vec![]);
        assert!(matches!(
            enumerate_physical_devices(&driver),
            Err(GpuError::NoDevice)
        ));
    }

    #[test]
    fn device_plugged_in_between_calls_is_picked_up() {
        let driver = FakeDriver::new(vec![FakeDevice::new("first", 1, 1)])
            .hotplug_after_count_query(FakeDevice::new("late", 2, 2));
        let devices = enumerate_physical_devices(&driver).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(DeviceInfo::query(&driver, devices[1]).name, "late");
    }
}
