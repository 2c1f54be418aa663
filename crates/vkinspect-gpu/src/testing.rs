//! In-memory driver for tests.
//!
//! [`FakeDriver`] follows the native count/fill contract closely enough to
//! exercise the enumeration helper, including devices that appear between the
//! count and fill calls.

use crate::device::ApiVersion;
use crate::driver::DriverInstance;
use ash::vk::{self, Handle};
use std::cell::{Cell, RefCell};
use std::ffi::c_char;
use std::rc::Rc;

/// Copy `text` into a fixed-size, NUL-terminated C string array.
fn fill_c_chars<const N: usize>(dst: &mut [c_char; N], text: &str) {
    let bytes = text.as_bytes();
    let len = bytes.len().min(N - 1);
    for (slot, &byte) in dst.iter_mut().zip(&bytes[..len]) {
        *slot = byte as c_char;
    }
    dst[len] = 0;
}

/// Build an extension record.
pub fn extension(name: &str, spec_version: u32) -> vk::ExtensionProperties {
    let mut ext = vk::ExtensionProperties {
        spec_version,
        ..Default::default()
    };
    fill_c_chars(&mut ext.extension_name, name);
    ext
}

/// Build memory properties from `(size, flags)` heaps and `(flags, heap)` types.
pub fn memory_properties(
    heaps: &[(vk::DeviceSize, vk::MemoryHeapFlags)],
    types: &[(vk::MemoryPropertyFlags, u32)],
) -> vk::PhysicalDeviceMemoryProperties {
    let mut properties = vk::PhysicalDeviceMemoryProperties {
        memory_heap_count: heaps.len() as u32,
        memory_type_count: types.len() as u32,
        ..Default::default()
    };
    for (slot, &(size, flags)) in properties.memory_heaps.iter_mut().zip(heaps) {
        slot.size = size;
        slot.flags = flags;
    }
    for (slot, &(property_flags, heap_index)) in properties.memory_types.iter_mut().zip(types) {
        slot.property_flags = property_flags;
        slot.heap_index = heap_index;
    }
    properties
}

/// A scripted physical device.
#[derive(Debug, Clone)]
pub struct FakeDevice {
    properties: vk::PhysicalDeviceProperties,
    heaps: Vec<(vk::DeviceSize, vk::MemoryHeapFlags)>,
    types: Vec<(vk::MemoryPropertyFlags, u32)>,
    extensions: Vec<vk::ExtensionProperties>,
    heap_budgets: Vec<(usize, vk::DeviceSize, vk::DeviceSize)>,
}

impl FakeDevice {
    pub fn new(name: &str, vendor_id: u32, device_id: u32) -> Self {
        let mut properties = vk::PhysicalDeviceProperties {
            vendor_id,
            device_id,
            api_version: vk::API_VERSION_1_3,
            ..Default::default()
        };
        fill_c_chars(&mut properties.device_name, name);

        Self {
            properties,
            heaps: Vec::new(),
            types: Vec::new(),
            extensions: Vec::new(),
            heap_budgets: Vec::new(),
        }
    }

    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.properties.api_version = version.raw();
        self
    }

    pub fn driver_version(mut self, version: u32) -> Self {
        self.properties.driver_version = version;
        self
    }

    pub fn heap(mut self, size: vk::DeviceSize, flags: vk::MemoryHeapFlags) -> Self {
        self.heaps.push((size, flags));
        self
    }

    pub fn memory_type(mut self, flags: vk::MemoryPropertyFlags, heap_index: u32) -> Self {
        self.types.push((flags, heap_index));
        self
    }

    pub fn extension(mut self, name: &str, spec_version: u32) -> Self {
        self.extensions.push(extension(name, spec_version));
        self
    }

    /// Budget and usage reported for heap `index`.
    pub fn heap_budget(
        mut self,
        index: usize,
        budget: vk::DeviceSize,
        usage: vk::DeviceSize,
    ) -> Self {
        self.heap_budgets.push((index, budget, usage));
        self
    }

    fn memory_properties(&self) -> vk::PhysicalDeviceMemoryProperties {
        memory_properties(&self.heaps, &self.types)
    }
}

/// Shared counter of instance teardowns, readable after the driver is gone.
#[derive(Debug, Clone, Default)]
pub struct DestroyCounter(Rc<Cell<u32>>);

impl DestroyCounter {
    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

/// Scripted stand-in for a Vulkan instance.
#[derive(Debug)]
pub struct FakeDriver {
    devices: RefCell<Vec<FakeDevice>>,
    hotplug: RefCell<Option<FakeDevice>>,
    budget_queries: Cell<u32>,
    destroyed: DestroyCounter,
}

impl FakeDriver {
    pub fn new(devices: Vec<FakeDevice>) -> Self {
        Self {
            devices: RefCell::new(devices),
            hotplug: RefCell::new(None),
            budget_queries: Cell::new(0),
            destroyed: DestroyCounter::default(),
        }
    }

    /// Append `device` right after the first physical device count query.
    pub fn hotplug_after_count_query(self, device: FakeDevice) -> Self {
        *self.hotplug.borrow_mut() = Some(device);
        self
    }

    /// Number of chained budget queries issued so far.
    pub fn budget_queries(&self) -> u32 {
        self.budget_queries.get()
    }

    /// Handle counting how often this driver was torn down.
    pub fn destroy_counter(&self) -> DestroyCounter {
        self.destroyed.clone()
    }

    fn handle(index: usize) -> vk::PhysicalDevice {
        vk::PhysicalDevice::from_raw(index as u64 + 1)
    }

    fn with_device<R>(&self, device: vk::PhysicalDevice, f: impl FnOnce(&FakeDevice) -> R) -> R {
        let index = device
            .as_raw()
            .checked_sub(1)
            .expect("null physical device handle") as usize;
        let devices = self.devices.borrow();
        f(devices.get(index).expect("unknown physical device handle"))
    }

    fn enumerate<T: Copy>(available: &[T], count: &mut u32, out: Option<&mut [T]>) -> vk::Result {
        match out {
            None => {
                *count = available.len() as u32;
                vk::Result::SUCCESS
            }
            Some(out) => {
                let n = (*count as usize).min(out.len()).min(available.len());
                out[..n].copy_from_slice(&available[..n]);
                *count = n as u32;
                if n < available.len() {
                    vk::Result::INCOMPLETE
                } else {
                    vk::Result::SUCCESS
                }
            }
        }
    }
}

impl Drop for FakeDriver {
    fn drop(&mut self) {
        self.destroyed.0.set(self.destroyed.0.get() + 1);
    }
}

impl DriverInstance for FakeDriver {
    fn enumerate_physical_devices_raw(
        &self,
        count: &mut u32,
        out: Option<&mut [vk::PhysicalDevice]>,
    ) -> vk::Result {
        let is_count_query = out.is_none();
        let handles: Vec<vk::PhysicalDevice> =
            (0..self.devices.borrow().len()).map(Self::handle).collect();
        let result = Self::enumerate(&handles, count, out);

        if is_count_query {
            if let Some(device) = self.hotplug.borrow_mut().take() {
                self.devices.borrow_mut().push(device);
            }
        }
        result
    }

    fn enumerate_device_extensions_raw(
        &self,
        device: vk::PhysicalDevice,
        count: &mut u32,
        out: Option<&mut [vk::ExtensionProperties]>,
    ) -> vk::Result {
        self.with_device(device, |fake| Self::enumerate(&fake.extensions, count, out))
    }

    fn device_properties(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceProperties {
        self.with_device(device, |fake| fake.properties)
    }

    fn memory_properties(
        &self,
        device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceMemoryProperties {
        self.with_device(device, FakeDevice::memory_properties)
    }

    fn memory_budget_properties(
        &self,
        device: vk::PhysicalDevice,
    ) -> (
        vk::PhysicalDeviceMemoryProperties,
        vk::PhysicalDeviceMemoryBudgetPropertiesEXT<'static>,
    ) {
        self.budget_queries.set(self.budget_queries.get() + 1);
        self.with_device(device, |fake| {
            let mut budget = vk::PhysicalDeviceMemoryBudgetPropertiesEXT::default();
            for &(index, heap_budget, heap_usage) in &fake.heap_budgets {
                budget.heap_budget[index] = heap_budget;
                budget.heap_usage[index] = heap_usage;
            }
            (fake.memory_properties(), budget)
        })
    }
}
