//! GPU error types.

use ash::vk;
use thiserror::Error;

/// GPU-related errors.
#[derive(Error, Debug)]
pub enum GpuError {
    /// The loader could not be loaded or the instance could not be created.
    #[error("Failed to create Vulkan instance: {0}")]
    Initialization(String),

    /// Enumeration returned zero physical devices.
    #[error("No Vulkan-compatible GPUs found!")]
    NoDevice,

    /// Device extension not supported.
    #[error("Extension not supported: {0}")]
    ExtensionNotSupported(String),

    /// Vulkan error.
    #[error("Vulkan error: {0}")]
    Vulkan(#[from] vk::Result),

    /// The driver kept changing the element count between count and fill calls.
    #[error("Enumeration did not settle after {0} attempts")]
    EnumerationUnstable(u32),

    /// A memory type points past the end of the heap list.
    #[error(
        "Memory type {type_index} refers to heap {heap_index}, but only {heap_count} heaps exist"
    )]
    InvalidMemoryLayout {
        type_index: usize,
        heap_index: u32,
        heap_count: usize,
    },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, GpuError>;
