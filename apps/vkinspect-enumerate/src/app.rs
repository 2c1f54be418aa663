//! Identity and memory layout report.

use std::io::{self, Write};

use tracing::debug;
use vkinspect_app::InspectApp;
use vkinspect_gpu::{vk, DeviceInfo, DriverInstance, MemoryLayout};
use vkinspect_report::{bytes_to_mb, write_device_info, write_memory_layout, write_separator};

/// Reports every device's identity followed by its memory heaps and types.
pub struct Enumerate;

impl InspectApp for Enumerate {
    fn write_header<W: Write>(&mut self, out: &mut W, device_count: usize) -> io::Result<()> {
        writeln!(out, "Number of Vulkan-compatible GPUs: {device_count}")
    }

    fn inspect_device<D: DriverInstance, W: Write>(
        &mut self,
        driver: &D,
        device: vk::PhysicalDevice,
        out: &mut W,
    ) -> anyhow::Result<()> {
        let info = DeviceInfo::query(driver, device);
        write_device_info(out, &info)?;

        let layout = MemoryLayout::query(driver, device)?;
        debug!(
            "{}: {} heaps, {} types, {} MB device-local",
            info.name,
            layout.heaps().len(),
            layout.types().len(),
            bytes_to_mb(layout.device_local_bytes())
        );

        writeln!(out, "  GPU Memory Information:")?;
        write_memory_layout(out, &layout)?;
        write_separator(out)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vkinspect_app::inspect;
    use vkinspect_gpu::testing::{FakeDevice, FakeDriver};
    use vkinspect_gpu::{ApiVersion, GpuError};

    fn discrete_gpu() -> FakeDevice {
        FakeDevice::new("AMD Radeon RX 6800", 0x1002, 0x73bf)
            .api_version(ApiVersion::new(1, 3, 278))
            .driver_version(8_388_919)
            .heap(16 << 30, vk::MemoryHeapFlags::DEVICE_LOCAL)
            .heap(256 << 20, vk::MemoryHeapFlags::DEVICE_LOCAL)
            .memory_type(vk::MemoryPropertyFlags::DEVICE_LOCAL, 0)
            .memory_type(
                vk::MemoryPropertyFlags::DEVICE_LOCAL
                    | vk::MemoryPropertyFlags::HOST_VISIBLE
                    | vk::MemoryPropertyFlags::HOST_COHERENT,
                1,
            )
    }

    fn software_rasterizer() -> FakeDevice {
        FakeDevice::new("llvmpipe (LLVM 17.0.6, 256 bits)", 0x10005, 0)
            .api_version(ApiVersion::new(1, 3, 255))
            .driver_version(1)
            .heap((2 << 30) + 1, vk::MemoryHeapFlags::DEVICE_LOCAL)
            .memory_type(
                vk::MemoryPropertyFlags::DEVICE_LOCAL
                    | vk::MemoryPropertyFlags::HOST_VISIBLE
                    | vk::MemoryPropertyFlags::HOST_COHERENT
                    | vk::MemoryPropertyFlags::HOST_CACHED,
                0,
            )
    }

    fn run(driver: &FakeDriver) -> anyhow::Result<String> {
        let mut out = Vec::new();
        inspect(&mut Enumerate, driver, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn full_report() {
        let driver = FakeDriver::new(vec![discrete_gpu(), software_rasterizer()]);
        let text = run(&driver).unwrap();

        insta::assert_snapshot!(text, @r"
        Number of Vulkan-compatible GPUs: 2
        GPU Name: AMD Radeon RX 6800
          API Version: 1.3.278
          Driver Version: 8388919
          Vendor ID: 4098
          Device ID: 29631
          GPU Memory Information:
        Memory Heaps: 2
          Heap 0: Size = 16384 MB, Flags = 1
          Heap 1: Size = 256 MB, Flags = 1
        Memory Types: 2
          Type 0: Heap Index = 0, Property Flags = Device Local
          Type 1: Heap Index = 1, Property Flags = Device Local | Host Visible | Host Coherent
        ----------------------------------------
        GPU Name: llvmpipe (LLVM 17.0.6, 256 bits)
          API Version: 1.3.255
          Driver Version: 1
          Vendor ID: 65541
          Device ID: 0
          GPU Memory Information:
        Memory Heaps: 1
          Heap 0: Size = 2048 MB, Flags = 1
        Memory Types: 1
          Type 0: Heap Index = 0, Property Flags = Device Local | Host Visible | Host Coherent | Host Cached
        ----------------------------------------
        ");
    }

    #[test]
    fn no_devices_prints_nothing() {
        let driver = FakeDriver::new(vec![]);
        let mut out = Vec::new();
        let err = inspect(&mut Enumerate, &driver, &mut out).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GpuError>(),
            Some(GpuError::NoDevice)
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn broken_memory_layout_is_fatal() {
        let driver = FakeDriver::new(vec![FakeDevice::new("broken", 1, 1)
            .heap(1 << 30, vk::MemoryHeapFlags::DEVICE_LOCAL)
            .memory_type(vk::MemoryPropertyFlags::DEVICE_LOCAL, 3)]);
        let err = run(&driver).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GpuError>(),
            Some(GpuError::InvalidMemoryLayout { heap_index: 3, .. })
        ));
    }
}
