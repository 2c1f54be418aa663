//! Memory heap and type layout.

use crate::driver::DriverInstance;
use crate::error::{GpuError, Result};
use ash::vk;

/// Property bits with a printable label, in display order.
const PROPERTY_LABELS: [(vk::MemoryPropertyFlags, &str); 5] = [
    (vk::MemoryPropertyFlags::DEVICE_LOCAL, "Device Local"),
    (vk::MemoryPropertyFlags::HOST_VISIBLE, "Host Visible"),
    (vk::MemoryPropertyFlags::HOST_COHERENT, "Host Coherent"),
    (vk::MemoryPropertyFlags::HOST_CACHED, "Host Cached"),
    (vk::MemoryPropertyFlags::LAZILY_ALLOCATED, "Lazily Allocated"),
];

/// Render memory property flags as a `" | "`-separated label list.
///
/// Bits without a label are ignored; no recognized bit yields an empty string.
pub fn property_flags_label(flags: vk::MemoryPropertyFlags) -> String {
    PROPERTY_LABELS
        .iter()
        .filter(|(bit, _)| flags.contains(*bit))
        .map(|(_, label)| *label)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// A physical memory pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryHeapInfo {
    /// Size in bytes
    pub size: vk::DeviceSize,
    pub flags: vk::MemoryHeapFlags,
}

/// A memory usage pattern bound to one heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryTypeInfo {
    pub property_flags: vk::MemoryPropertyFlags,
    /// Index into [`MemoryLayout::heaps`]
    pub heap_index: u32,
}

impl MemoryTypeInfo {
    pub fn property_label(&self) -> String {
        property_flags_label(self.property_flags)
    }
}

/// Heaps and memory types of one device, in driver order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLayout {
    heaps: Vec<MemoryHeapInfo>,
    types: Vec<MemoryTypeInfo>,
}

impl MemoryLayout {
    /// Read the memory properties of a device.
    pub fn query<D: DriverInstance>(driver: &D, device: vk::PhysicalDevice) -> Result<Self> {
        Self::from_properties(&driver.memory_properties(device))
    }

    /// Copy the populated part of the fixed-size property arrays.
    ///
    /// Fails if a memory type refers to a heap that does not exist.
    pub fn from_properties(properties: &vk::PhysicalDeviceMemoryProperties) -> Result<Self> {
        let heaps: Vec<MemoryHeapInfo> = properties
            .memory_heaps
            .iter()
            .take(properties.memory_heap_count as usize)
            .map(|heap| MemoryHeapInfo {
                size: heap.size,
                flags: heap.flags,
            })
            .collect();

        let types: Vec<MemoryTypeInfo> = properties
            .memory_types
            .iter()
            .take(properties.memory_type_count as usize)
            .map(|ty| MemoryTypeInfo {
                property_flags: ty.property_flags,
                heap_index: ty.heap_index,
            })
            .collect();

        if let Some((type_index, ty)) = types
            .iter()
            .enumerate()
            .find(|(_, ty)| ty.heap_index as usize >= heaps.len())
        {
            return Err(GpuError::InvalidMemoryLayout {
                type_index,
                heap_index: ty.heap_index,
                heap_count: heaps.len(),
            });
        }

        Ok(Self { heaps, types })
    }

    pub fn heaps(&self) -> &[MemoryHeapInfo] {
        &self.heaps
    }

    pub fn types(&self) -> &[MemoryTypeInfo] {
        &self.types
    }

    /// Total size of device-local heaps in bytes.
    pub fn device_local_bytes(&self) -> vk::DeviceSize {
        self.heaps
            .iter()
            .filter(|heap| heap.flags.contains(vk::MemoryHeapFlags::DEVICE_LOCAL))
            .map(|heap| heap.size)
            .sum()
    }
}
