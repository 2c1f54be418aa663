//! Application runner.

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use vkinspect_gpu::{enumerate_physical_devices, DriverInstance, InstanceConfig, VulkanInstance};

use crate::app::InspectApp;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Binary name shown in usage output.
    pub title: String,
    /// Instance metadata and layers.
    pub instance: InstanceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "vkinspect".to_string(),
            instance: InstanceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create a new config with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the Vulkan API version the instance is created with.
    pub fn with_api_version(mut self, api_version: u32) -> Self {
        self.instance = self.instance.api_version(api_version);
        self
    }

    /// Enable or disable validation layers.
    pub fn with_validation(mut self, validation: bool) -> Self {
        self.instance = self.instance.validation(validation);
        self
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(AppConfig),
    Help,
}

/// Apply command line arguments (without the program name) to `config`.
pub fn parse_args<I>(mut config: AppConfig, args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--validation" => config = config.with_validation(true),
            other => return Err(format!("Unrecognized argument: {other}")),
        }
    }
    Ok(Command::Run(config))
}

fn print_help(title: &str) {
    eprintln!(
        "{title}

USAGE:
    {title} [OPTIONS]

OPTIONS:
    --validation            Enable VK_LAYER_KHRONOS_validation if installed
    -h, --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Enumerate devices and let `app` report each of them.
///
/// Fails with [`vkinspect_gpu::GpuError::NoDevice`] before anything is
/// written when the driver reports no devices.
pub fn inspect<A, D, W>(app: &mut A, driver: &D, out: &mut W) -> anyhow::Result<()>
where
    A: InspectApp,
    D: DriverInstance,
    W: Write,
{
    let devices = enumerate_physical_devices(driver)?;

    app.write_header(out, devices.len())?;
    for device in devices {
        app.inspect_device(driver, device, out)?;
    }
    out.flush()?;

    Ok(())
}

/// Run [`inspect`] and tear the driver down afterwards, whatever the outcome.
pub fn run_with_driver<A, D, W>(app: &mut A, driver: D, out: &mut W) -> anyhow::Result<()>
where
    A: InspectApp,
    D: DriverInstance,
    W: Write,
{
    let result = inspect(app, &driver, out);
    drop(driver);
    result
}

/// Process exit status for a finished run.
///
/// Fatal errors are written to `err_out` as a single line.
pub fn finish<W: Write>(result: &anyhow::Result<()>, err_out: &mut W) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            debug!("run failed: {err:?}");
            // Nothing else can be reported if stderr itself is gone.
            let _ = writeln!(err_out, "{err:#}");
            1
        }
    }
}

/// Run an `InspectApp` with the given configuration.
///
/// Initializes logging, applies command line flags, creates the Vulkan
/// instance and reports every device to stdout. Fatal errors are written to
/// stderr as a single line.
pub fn run_app<A: InspectApp>(mut app: A, config: AppConfig) -> ExitCode {
    init_logging();

    let title = config.title.clone();
    let config = match parse_args(config, std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print_help(&title);
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}");
            print_help(&title);
            return ExitCode::FAILURE;
        }
    };

    info!("{} starting...", config.title);

    let result = VulkanInstance::new(&config.instance)
        .map_err(anyhow::Error::from)
        .and_then(|instance| {
            let stdout = io::stdout();
            run_with_driver(&mut app, instance, &mut stdout.lock())
        });

    ExitCode::from(finish(&result, &mut io::stderr().lock()))
}
