//! The driver surface the inspectors read from.

use ash::vk;

/// Read-only queries against a live driver instance.
///
/// The two enumeration entry points follow the native count/fill contract and
/// are meant to be driven by [`query_count_then_fill`](crate::query_count_then_fill).
/// Every `vk::PhysicalDevice` passed in must have been enumerated from the same
/// instance.
pub trait DriverInstance {
    /// `vkEnumeratePhysicalDevices`.
    fn enumerate_physical_devices_raw(
        &self,
        count: &mut u32,
        out: Option<&mut [vk::PhysicalDevice]>,
    ) -> vk::Result;

    /// `vkEnumerateDeviceExtensionProperties` without a layer filter.
    fn enumerate_device_extensions_raw(
        &self,
        device: vk::PhysicalDevice,
        count: &mut u32,
        out: Option<&mut [vk::ExtensionProperties]>,
    ) -> vk::Result;

    /// `vkGetPhysicalDeviceProperties`.
    fn device_properties(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceProperties;

    /// `vkGetPhysicalDeviceMemoryProperties`.
    fn memory_properties(&self, device: vk::PhysicalDevice)
        -> vk::PhysicalDeviceMemoryProperties;

    /// `vkGetPhysicalDeviceMemoryProperties2` with a chained
    /// `VkPhysicalDeviceMemoryBudgetPropertiesEXT`.
    ///
    /// Only valid when the device advertises `VK_EXT_memory_budget`.
    fn memory_budget_properties(
        &self,
        device: vk::PhysicalDevice,
    ) -> (
        vk::PhysicalDeviceMemoryProperties,
        vk::PhysicalDeviceMemoryBudgetPropertiesEXT<'static>,
    );
}
