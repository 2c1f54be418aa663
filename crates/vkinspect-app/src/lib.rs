//! Application framework for the vkinspect tools.
//!
//! This crate handles the boilerplate every tool shares:
//! - Logging setup
//! - Command line flags
//! - Vulkan instance creation and teardown
//! - Device enumeration and exit codes
//!
//! # Example
//!
//! ```no_run
//! use std::io::{self, Write};
//! use std::process::ExitCode;
//! use vkinspect_app::{run_app, AppConfig, InspectApp};
//! use vkinspect_gpu::{vk, DeviceInfo, DriverInstance};
//!
//! struct Names;
//!
//! impl InspectApp for Names {
//!     fn write_header<W: Write>(&mut self, out: &mut W, count: usize) -> io::Result<()> {
//!         writeln!(out, "{count} GPUs")
//!     }
//!
//!     fn inspect_device<D: DriverInstance, W: Write>(
//!         &mut self,
//!         driver: &D,
//!         device: vk::PhysicalDevice,
//!         out: &mut W,
//!     ) -> anyhow::Result<()> {
//!         writeln!(out, "{}", DeviceInfo::query(driver, device).name)?;
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> ExitCode {
//!     run_app(Names, AppConfig::new("names"))
//! }
//! ```

mod app;
mod runner;

pub use app::InspectApp;
pub use runner::{finish, inspect, parse_args, run_app, run_with_driver, AppConfig, Command};
