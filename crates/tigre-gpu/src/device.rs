//! GPU device enumeration and runtime abstractions.

use crate::error::{GpuError, Result};

/// Trait representing a backend that can enumerate GPU devices.
///
/// This trait abstracts over different GPU backends (CUDA, CPU-only hosts)
/// and provides a unified interface for device discovery.
pub trait Runtime {
    /// Get the name of the runtime.
    fn name() -> &'static str;

    /// Check if the runtime has at least one usable device.
    fn is_available() -> bool {
        matches!(Self::device_count(), Ok(n) if n > 0)
    }

    /// Get the number of available devices.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend driver cannot be queried.
    fn device_count() -> Result<usize>;

    /// Get the name of the device at `ordinal`.
    ///
    /// The default implementation only checks the ordinal and returns a
    /// generic label; backends with a driver override it.
    fn device_name(ordinal: usize) -> Result<String> {
        check_ordinal::<Self>(ordinal)?;
        Ok(format!("GPU Device {}", ordinal))
    }
}

/// Fails with [`GpuError::DeviceNotAvailable`] unless `ordinal < R::device_count()`.
pub(crate) fn check_ordinal<R: Runtime + ?Sized>(ordinal: usize) -> Result<()> {
    let count = R::device_count()?;
    if ordinal >= count {
        return Err(GpuError::DeviceNotAvailable(format!(
            "{} device {} requested, {} present",
            R::name(),
            ordinal,
            count
        )));
    }
    Ok(())
}

/// GPU device handle.
///
/// Represents one entry of a runtime's device enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuDevice {
    device_id: usize,
    name: String,
}

impl GpuDevice {
    /// Open the device with the specified id on runtime `R`.
    ///
    /// # Arguments
    ///
    /// * `device_id` - The device id (typically 0 for the first GPU)
    ///
    /// # Errors
    ///
    /// Returns an error if the device is not present or the driver fails.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use tigre_gpu::{CudaRuntime, GpuDevice};
    ///
    /// let device = GpuDevice::open::<CudaRuntime>(0)?;
    /// ```
    pub fn open<R: Runtime>(device_id: usize) -> Result<Self> {
        check_ordinal::<R>(device_id)?;
        let name = R::device_name(device_id)?;
        log::trace!("opened {} device {} ({})", R::name(), device_id, name);
        Ok(Self { device_id, name })
    }

    /// Get the device id.
    pub fn device_id(&self) -> usize {
        self.device_id
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Runtime for hosts without a GPU backend. Reports zero devices.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuRuntime;

impl Runtime for CpuRuntime {
    fn name() -> &'static str {
        "CPU"
    }

    fn device_count() -> Result<usize> {
        Ok(0)
    }
}

#[cfg(feature = "cuda")]
pub use cuda_runtime::CudaRuntime;

#[cfg(feature = "cuda")]
mod cuda_runtime {
    use super::*;
    use cudarc::driver::{result, CudaDevice};

    /// CUDA runtime implementation.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct CudaRuntime;

    impl Runtime for CudaRuntime {
        fn name() -> &'static str {
            "CUDA"
        }

        fn device_count() -> Result<usize> {
            // CudaDevice::count() panics when cuInit fails; go through the result API instead.
            result::init().map_err(|e| GpuError::Runtime(e.to_string()))?;
            let count = result::device::get_count().map_err(|e| GpuError::Runtime(e.to_string()))?;
            log::trace!("CUDA driver reports {} devices", count);
            usize::try_from(count).map_err(|_| GpuError::Runtime(format!("negative device count {}", count)))
        }

        fn device_name(ordinal: usize) -> Result<String> {
            check_ordinal::<Self>(ordinal)?;
            let device = CudaDevice::new(ordinal).map_err(|e| GpuError::Runtime(e.to_string()))?;
            device.name().map_err(|e| GpuError::Runtime(e.to_string()))
        }
    }
}
