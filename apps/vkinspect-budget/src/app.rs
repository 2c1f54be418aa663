//! Memory budget report.

use std::io::{self, Write};

use tracing::{debug, warn};
use vkinspect_app::InspectApp;
use vkinspect_gpu::{
    vk, DeviceInfo, DriverInstance, ExtensionSet, MemoryBudget, MEMORY_BUDGET_EXTENSION,
};
use vkinspect_report::{
    write_budget_unsupported, write_device_info, write_memory_budget, write_separator,
};

/// Reports every device's identity followed by its heap budgets.
pub struct Budget;

impl InspectApp for Budget {
    fn write_header<W: Write>(&mut self, out: &mut W, device_count: usize) -> io::Result<()> {
        writeln!(out, "Number of Vulkan-compatible GPUs found: {device_count}")?;
        write_separator(out)
    }

    fn inspect_device<D: DriverInstance, W: Write>(
        &mut self,
        driver: &D,
        device: vk::PhysicalDevice,
        out: &mut W,
    ) -> anyhow::Result<()> {
        let info = DeviceInfo::query(driver, device);
        write_device_info(out, &info)?;

        let extensions = ExtensionSet::query(driver, device)?;
        if extensions.supports(MEMORY_BUDGET_EXTENSION) {
            debug!(
                "{}: {:?} spec version {:?}",
                info.name,
                MEMORY_BUDGET_EXTENSION,
                extensions.spec_version(MEMORY_BUDGET_EXTENSION)
            );
            let budget = MemoryBudget::query(driver, device, &extensions)?;
            for (i, heap) in budget.heaps().iter().enumerate() {
                if heap.usage > heap.budget {
                    warn!("{}: heap {i} usage exceeds its budget", info.name);
                }
            }
            write_memory_budget(out, &budget)?;
        } else {
            debug!("{}: {:?} not advertised", info.name, MEMORY_BUDGET_EXTENSION);
            write_budget_unsupported(out)?;
        }

        write_separator(out)?;
        Ok(())
    }
}
