//! Device extension support.

use crate::driver::DriverInstance;
use crate::enumerate::query_count_then_fill;
use crate::error::Result;
use ash::vk;
use std::collections::HashMap;
use std::ffi::CStr;

/// Extensions advertised by one physical device, keyed by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    /// Name to spec version
    extensions: HashMap<String, u32>,
}

impl ExtensionSet {
    /// Enumerate the device-level extensions of a device.
    pub fn query<D: DriverInstance>(driver: &D, device: vk::PhysicalDevice) -> Result<Self> {
        let properties = query_count_then_fill(|count, out| {
            driver.enumerate_device_extensions_raw(device, count, out)
        })?;

        let set: Self = properties.iter().collect();
        tracing::debug!("Device advertises {} extensions", set.len());
        Ok(set)
    }

    /// Whether the device advertises `name`. Case-sensitive.
    pub fn supports(&self, name: &CStr) -> bool {
        name.to_str()
            .is_ok_and(|name| self.extensions.contains_key(name))
    }

    /// Spec version of an advertised extension.
    pub fn spec_version(&self, name: &CStr) -> Option<u32> {
        self.extensions.get(name.to_str().ok()?).copied()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl<'a> FromIterator<&'a vk::ExtensionProperties> for ExtensionSet {
    fn from_iter<I: IntoIterator<Item = &'a vk::ExtensionProperties>>(iter: I) -> Self {
        let extensions = iter
            .into_iter()
            .filter_map(|ext| {
                let name = ext.extension_name_as_c_str().ok()?.to_str().ok()?;
                Some((name.to_owned(), ext.spec_version))
            })
            .collect();
        Self { extensions }
    }
}
