//! Vulkan memory budget report
//!
//! Prints each Vulkan device's identity and, where `VK_EXT_memory_budget` is
//! available, the current budget and usage of every memory heap.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p vkinspect-budget -- [--validation]
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod app;

use std::process::ExitCode;

use vkinspect_app::{run_app, AppConfig};
use vkinspect_gpu::vk;

use crate::app::Budget;

fn main() -> ExitCode {
    // vkGetPhysicalDeviceMemoryProperties2 is core in 1.1
    run_app(
        Budget,
        AppConfig::new("vkinspect-budget").with_api_version(vk::API_VERSION_1_1),
    )
}
