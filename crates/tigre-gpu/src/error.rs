//! Error types for GPU device selection.

use thiserror::Error;

/// Result type for GPU device selection.
pub type Result<T> = std::result::Result<T, GpuError>;

/// Error types that can occur while building or reading a device id list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GpuError {
    /// Empty id list, zero device count or similar bad input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Backing storage for the id list could not be reserved.
    #[error("Failed to allocate storage for {requested} device ids")]
    AllocationFailure {
        /// Number of ids that were requested
        requested: usize,
    },

    /// Indexed access outside `[0, len)`.
    #[error("Index out of range: index {index}, length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Length of the list at the time of access
        len: usize,
    },

    /// GPU device not available or not found.
    #[error("GPU device not available: {0}")]
    DeviceNotAvailable(String),

    /// A token in a textual id list is not a device id.
    #[error("Invalid device id: {0:?}")]
    InvalidDeviceId(String),

    /// Error reported by the device driver.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GpuError::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(err.to_string(), "Index out of range: index 3, length 2");

        let err = GpuError::InvalidDeviceId("gpu0".into());
        assert_eq!(err.to_string(), "Invalid device id: \"gpu0\"");

        let err = GpuError::AllocationFailure { requested: 8 };
        assert!(err.to_string().contains('8'));
    }
}
