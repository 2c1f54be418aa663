//! Text report layout for vkinspect.
//!
//! Formatting only: every function takes already-queried values and writes
//! fixed-label lines to a [`std::io::Write`].

pub mod layout;
pub mod units;

pub use layout::{
    write_budget_unsupported, write_device_info, write_memory_budget, write_memory_layout,
    write_separator, SEPARATOR,
};
pub use units::{bytes_to_mb, BYTES_PER_MB};
