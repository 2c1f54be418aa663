//! Vulkan GPU enumeration
//!
//! Prints the identity and memory heap/type layout of every Vulkan device.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p vkinspect-enumerate -- [--validation]
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod app;

use std::process::ExitCode;

use vkinspect_app::{run_app, AppConfig};
use vkinspect_gpu::vk;

use crate::app::Enumerate;

fn main() -> ExitCode {
    run_app(
        Enumerate,
        AppConfig::new("vkinspect-enumerate").with_api_version(vk::API_VERSION_1_0),
    )
}
