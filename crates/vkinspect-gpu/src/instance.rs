//! Vulkan instance creation and teardown.

use crate::driver::DriverInstance;
use crate::error::{GpuError, Result};
use ash::vk;
use std::ffi::{c_char, CStr, CString};
use std::ptr;

/// Application name reported to the driver.
pub const DEFAULT_APP_NAME: &str = "Vulkan GPU Enumeration";

/// Engine name reported to the driver.
pub const DEFAULT_ENGINE_NAME: &str = "No Engine";

/// Validation layers to enable on request.
pub fn validation_layers() -> Vec<&'static CStr> {
    vec![c"VK_LAYER_KHRONOS_validation"]
}

/// Fixed application metadata used to create the instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceConfig {
    /// Application name.
    pub app_name: String,
    /// Packed application version.
    pub app_version: u32,
    /// Engine name.
    pub engine_name: String,
    /// Packed engine version.
    pub engine_version: u32,
    /// Highest Vulkan API version the application uses.
    pub api_version: u32,
    /// Request the Khronos validation layer.
    pub enable_validation: bool,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            app_version: vk::make_api_version(0, 1, 0, 0),
            engine_name: DEFAULT_ENGINE_NAME.to_string(),
            engine_version: vk::make_api_version(0, 1, 0, 0),
            api_version: vk::API_VERSION_1_0,
            enable_validation: false,
        }
    }
}

impl InstanceConfig {
    /// Create a config with the given application name.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Default::default()
        }
    }

    /// Set the API version the instance is created with.
    pub fn api_version(mut self, api_version: u32) -> Self {
        self.api_version = api_version;
        self
    }

    /// Enable or disable validation layers.
    pub fn validation(mut self, enable: bool) -> Self {
        self.enable_validation = enable;
        self
    }
}

/// Application and engine names as C strings.
fn c_names(config: &InstanceConfig) -> Result<(CString, CString)> {
    let app_name = CString::new(config.app_name.as_str())
        .map_err(|e| GpuError::Initialization(format!("invalid application name: {e}")))?;
    let engine_name = CString::new(config.engine_name.as_str())
        .map_err(|e| GpuError::Initialization(format!("invalid engine name: {e}")))?;
    Ok((app_name, engine_name))
}

/// Create a Vulkan instance.
///
/// # Safety
/// The entry must be a valid Vulkan entry point.
pub unsafe fn create_instance(entry: &ash::Entry, config: &InstanceConfig) -> Result<ash::Instance> {
    let (app_name, engine_name) = c_names(config)?;

    let app_info = vk::ApplicationInfo::default()
        .application_name(&app_name)
        .application_version(config.app_version)
        .engine_name(&engine_name)
        .engine_version(config.engine_version)
        .api_version(config.api_version);

    let layers: Vec<&CStr> = if config.enable_validation {
        let available_layers = unsafe { entry.enumerate_instance_layer_properties() }?;
        validation_layers()
            .into_iter()
            .filter(|layer| {
                let found = available_layers
                    .iter()
                    .any(|props| props.layer_name_as_c_str() == Ok(*layer));
                if !found {
                    tracing::warn!("Validation layer {:?} not available", layer);
                }
                found
            })
            .collect()
    } else {
        vec![]
    };

    let layer_names: Vec<*const c_char> = layers.iter().map(|l| l.as_ptr()).collect();

    let create_info = vk::InstanceCreateInfo::default()
        .application_info(&app_info)
        .enabled_layer_names(&layer_names);

    let instance = unsafe { entry.create_instance(&create_info, None) }
        .map_err(|e| GpuError::Initialization(e.to_string()))?;

    tracing::debug!(
        app = %config.app_name,
        api_major = vk::api_version_major(config.api_version),
        api_minor = vk::api_version_minor(config.api_version),
        layers = layer_names.len(),
        "Created Vulkan instance"
    );

    Ok(instance)
}

/// Owned Vulkan instance, destroyed on drop.
pub struct VulkanInstance {
    // Entry must be kept alive for the lifetime of the instance
    #[allow(dead_code)]
    entry: ash::Entry,
    instance: ash::Instance,
}

impl VulkanInstance {
    /// Load the Vulkan loader and create an instance.
    pub fn new(config: &InstanceConfig) -> Result<Self> {
        let entry = unsafe { ash::Entry::load() }
            .map_err(|e| GpuError::Initialization(format!("failed to load Vulkan: {e}")))?;

        let instance = unsafe { create_instance(&entry, config) }?;

        Ok(Self { entry, instance })
    }
}

impl Drop for VulkanInstance {
    fn drop(&mut self) {
        tracing::debug!("Destroying Vulkan instance {:?}", self.instance.handle());
        // SAFETY: no objects derived from the instance outlive it; physical
        // devices need no explicit destruction.
        unsafe { self.instance.destroy_instance(None) };
    }
}

impl DriverInstance for VulkanInstance {
    fn enumerate_physical_devices_raw(
        &self,
        count: &mut u32,
        out: Option<&mut [vk::PhysicalDevice]>,
    ) -> vk::Result {
        let out_ptr = out.map_or(ptr::null_mut(), |items| items.as_mut_ptr());
        // SAFETY: `out_ptr` is null or points to at least `*count` elements.
        unsafe {
            (self.instance.fp_v1_0().enumerate_physical_devices)(
                self.instance.handle(),
                count,
                out_ptr,
            )
        }
    }

    fn enumerate_device_extensions_raw(
        &self,
        device: vk::PhysicalDevice,
        count: &mut u32,
        out: Option<&mut [vk::ExtensionProperties]>,
    ) -> vk::Result {
        let out_ptr = out.map_or(ptr::null_mut(), |items| items.as_mut_ptr());
        // SAFETY: `device` came from this instance; `out_ptr` is null or
        // points to at least `*count` elements.
        unsafe {
            (self.instance.fp_v1_0().enumerate_device_extension_properties)(
                device,
                ptr::null(),
                count,
                out_ptr,
            )
        }
    }

    fn device_properties(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceProperties {
        // SAFETY: `device` came from this instance.
        unsafe { self.instance.get_physical_device_properties(device) }
    }

    fn memory_properties(
        &self,
        device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceMemoryProperties {
        // SAFETY: `device` came from this instance.
        unsafe { self.instance.get_physical_device_memory_properties(device) }
    }

    fn memory_budget_properties(
        &self,
        device: vk::PhysicalDevice,
    ) -> (
        vk::PhysicalDeviceMemoryProperties,
        vk::PhysicalDeviceMemoryBudgetPropertiesEXT<'static>,
    ) {
        let mut budget = vk::PhysicalDeviceMemoryBudgetPropertiesEXT::default();
        let memory_properties = {
            let mut properties2 =
                vk::PhysicalDeviceMemoryProperties2::default().push_next(&mut budget);
            // SAFETY: `device` came from this instance, which was created with
            // API version 1.1 or later by the budget program, and the caller
            // checked that the device supports VK_EXT_memory_budget.
            unsafe {
                self.instance
                    .get_physical_device_memory_properties2(device, &mut properties2);
            }
            properties2.memory_properties
        };

        (memory_properties, budget)
    }
}
