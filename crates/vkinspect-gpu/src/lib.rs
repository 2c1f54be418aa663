//! Vulkan device inspection for vkinspect.
//!
//! This crate provides:
//! - Vulkan instance creation and teardown
//! - Count-then-fill enumeration of variable-length driver outputs
//! - Device identity and memory layout queries
//! - Extension lookup and `VK_EXT_memory_budget` heap budgets

pub mod budget;
pub mod device;
pub mod driver;
pub mod enumerate;
pub mod error;
pub mod extensions;
pub mod instance;
pub mod memory;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use budget::{HeapBudget, MemoryBudget, MEMORY_BUDGET_EXTENSION};
pub use device::{enumerate_physical_devices, ApiVersion, DeviceInfo, GpuVendor};
pub use driver::DriverInstance;
pub use enumerate::{query_count_then_fill, MAX_ENUMERATION_ATTEMPTS};
pub use error::{GpuError, Result};
pub use extensions::ExtensionSet;
pub use instance::{InstanceConfig, VulkanInstance};
pub use memory::{property_flags_label, MemoryHeapInfo, MemoryLayout, MemoryTypeInfo};

pub use ash::vk;
