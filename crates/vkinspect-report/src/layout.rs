//! Fixed text blocks of the device report.
//!
//! Every function writes whole lines straight to the given writer.

use std::io::{self, Write};

use vkinspect_gpu::{DeviceInfo, MemoryBudget, MemoryLayout};

use crate::units::bytes_to_mb;

/// Line written between devices.
pub const SEPARATOR: &str = "----------------------------------------";

pub fn write_separator<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{SEPARATOR}")
}

/// Name, versions and PCI IDs of a device.
pub fn write_device_info<W: Write>(out: &mut W, info: &DeviceInfo) -> io::Result<()> {
    writeln!(out, "GPU Name: {}", info.name)?;
    writeln!(out, "  API Version: {}", info.api_version)?;
    writeln!(out, "  Driver Version: {}", info.driver_version)?;
    writeln!(out, "  Vendor ID: {}", info.vendor_id)?;
    writeln!(out, "  Device ID: {}", info.device_id)
}

/// Heap sizes and memory type properties.
pub fn write_memory_layout<W: Write>(out: &mut W, layout: &MemoryLayout) -> io::Result<()> {
    writeln!(out, "Memory Heaps: {}", layout.heaps().len())?;
    for (i, heap) in layout.heaps().iter().enumerate() {
        writeln!(
            out,
            "  Heap {i}: Size = {} MB, Flags = {}",
            bytes_to_mb(heap.size),
            heap.flags.as_raw()
        )?;
    }

    writeln!(out, "Memory Types: {}", layout.types().len())?;
    for (i, ty) in layout.types().iter().enumerate() {
        writeln!(
            out,
            "  Type {i}: Heap Index = {}, Property Flags = {}",
            ty.heap_index,
            ty.property_label()
        )?;
    }
    Ok(())
}

/// Per-heap budget and usage.
pub fn write_memory_budget<W: Write>(out: &mut W, budget: &MemoryBudget) -> io::Result<()> {
    writeln!(out, "Memory Budget Information:")?;
    for (i, heap) in budget.heaps().iter().enumerate() {
        writeln!(out, "Heap {i}:")?;
        writeln!(out, "  Budget: {} MB", bytes_to_mb(heap.budget))?;
        writeln!(out, "  Usage: {} MB", bytes_to_mb(heap.usage))?;
    }
    Ok(())
}

/// Notice printed instead of the budget block.
pub fn write_budget_unsupported<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "  Memory budget extension not supported!")
}
