//! GPU device selection for TIGRE reconstruction backends.
//!
//! This crate holds the list of GPU devices a projection or back-projection
//! runs on, and discovers which devices a host offers.
//!
//! # Feature Flags
//!
//! - `cuda`: Enable CUDA device enumeration (NVIDIA GPUs)
//!
//! # Examples
//!
//! ```rust,ignore
//! use tigre_gpu::{CudaRuntime, GpuIds};
//!
//! // Every CUDA device on the host
//! let ids = GpuIds::all::<CudaRuntime>()?;
//!
//! // Only the boards with a given name
//! let ids = GpuIds::with_name::<CudaRuntime>("Tesla V100-SXM2-32GB")?;
//!
//! // Or an explicit selection from TIGRE_GPU_IDS="0,2"
//! let ids = tigre_gpu::config::from_default_env()?.unwrap_or(ids);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod device;
pub mod error;
pub mod ids;


// Re-exports
pub use device::{CpuRuntime, GpuDevice, Runtime};
pub use error::{GpuError, Result};
pub use ids::GpuIds;

#[cfg(feature = "cuda")]
pub use device::CudaRuntime;
