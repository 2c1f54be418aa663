//! Per-heap memory budget via `VK_EXT_memory_budget`.

use crate::driver::DriverInstance;
use crate::error::{GpuError, Result};
use crate::extensions::ExtensionSet;
use ash::vk;
use std::ffi::CStr;

/// Name of the extension that exposes heap budgets.
pub const MEMORY_BUDGET_EXTENSION: &CStr = ash::ext::memory_budget::NAME;

/// Budget and current usage of one heap, in bytes.
///
/// Values are passed through as reported; `usage` may exceed `budget`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeapBudget {
    pub budget: vk::DeviceSize,
    pub usage: vk::DeviceSize,
}

/// Budget snapshot for every heap of a device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryBudget {
    heaps: Vec<HeapBudget>,
}

impl MemoryBudget {
    /// Query heap budgets of a device.
    ///
    /// The driver is only called if `extensions` contains
    /// [`MEMORY_BUDGET_EXTENSION`]; otherwise this returns
    /// [`GpuError::ExtensionNotSupported`].
    pub fn query<D: DriverInstance>(
        driver: &D,
        device: vk::PhysicalDevice,
        extensions: &ExtensionSet,
    ) -> Result<Self> {
        if !extensions.supports(MEMORY_BUDGET_EXTENSION) {
            return Err(GpuError::ExtensionNotSupported(
                MEMORY_BUDGET_EXTENSION.to_string_lossy().into_owned(),
            ));
        }

        let (memory_properties, budget) = driver.memory_budget_properties(device);
        Ok(Self::from_properties(&memory_properties, &budget))
    }

    /// Pair the budget arrays with the populated heaps.
    pub fn from_properties(
        memory_properties: &vk::PhysicalDeviceMemoryProperties,
        budget: &vk::PhysicalDeviceMemoryBudgetPropertiesEXT<'_>,
    ) -> Self {
        let heap_count = (memory_properties.memory_heap_count as usize).min(vk::MAX_MEMORY_HEAPS);
        let heaps = budget.heap_budget[..heap_count]
            .iter()
            .zip(&budget.heap_usage[..heap_count])
            .map(|(&budget, &usage)| HeapBudget { budget, usage })
            .collect();

        Self { heaps }
    }

    pub fn heaps(&self) -> &[HeapBudget] {
        &self.heaps
    }
}
