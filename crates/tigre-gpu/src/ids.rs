//! Owned list of GPU device ids.
//!
//! [`GpuIds`] is the set of devices a reconstruction runs on. It is either
//! empty or holds a copy of a caller-supplied id list; contents are only
//! ever replaced as a whole.

use std::fmt;
use std::ops::Index;
use std::slice;
use std::str::FromStr;

use crate::device::{GpuDevice, Runtime};
use crate::error::{GpuError, Result};

/// Ordered list of GPU device ids.
///
/// # Examples
///
/// ```
/// use tigre_gpu::GpuIds;
///
/// let mut ids = GpuIds::new();
/// ids.set_ids(&[2, 0])?;
/// assert_eq!(ids.len(), 2);
/// assert_eq!(ids.get(0)?, 2);
/// # Ok::<(), tigre_gpu::GpuError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GpuIds {
    ids: Vec<usize>,
}

impl GpuIds {
    /// Create an empty list. No storage is allocated.
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Replace the contents with a copy of `ids`.
    ///
    /// The new storage is filled before the old one is released, so on
    /// error the list keeps its previous contents.
    ///
    /// # Errors
    ///
    /// * [`GpuError::InvalidArgument`] if `ids` is empty.
    /// * [`GpuError::AllocationFailure`] if the storage cannot be reserved.
    pub fn set_ids(&mut self, ids: &[usize]) -> Result<()> {
        if ids.is_empty() {
            return Err(GpuError::InvalidArgument(
                "device id list must not be empty".into(),
            ));
        }
        self.replace_with(ids.len(), ids.iter().copied())
    }

    /// Replace the contents with every id `0..total_device_count`.
    ///
    /// # Errors
    ///
    /// * [`GpuError::InvalidArgument`] if `total_device_count` is zero.
    /// * [`GpuError::AllocationFailure`] if the storage cannot be reserved.
    pub fn set_all_gpus(&mut self, total_device_count: usize) -> Result<()> {
        if total_device_count == 0 {
            return Err(GpuError::InvalidArgument(
                "total device count must be positive".into(),
            ));
        }
        self.replace_with(total_device_count, 0..total_device_count)
    }

    fn replace_with(&mut self, len: usize, ids: impl Iterator<Item = usize>) -> Result<()> {
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(len)
            .map_err(|_| GpuError::AllocationFailure { requested: len })?;
        fresh.extend(ids);
        log::debug!("device ids replaced: {:?} -> {:?}", self.ids, fresh);
        self.ids = fresh;
        Ok(())
    }

    /// Release the storage. The list is empty afterwards.
    pub fn clear(&mut self) {
        if !self.ids.is_empty() {
            log::debug!("device ids cleared: {:?}", self.ids);
        }
        self.ids = Vec::new();
    }

    /// Number of stored ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if no ids are stored.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Get the id at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GpuError::IndexOutOfRange`] unless `index < self.len()`.
    pub fn get(&self, index: usize) -> Result<usize> {
        self.ids
            .get(index)
            .copied()
            .ok_or(GpuError::IndexOutOfRange {
                index,
                len: self.ids.len(),
            })
    }

    /// Overwrite the id at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GpuError::IndexOutOfRange`] unless `index < self.len()`.
    pub fn set(&mut self, index: usize, id: usize) -> Result<()> {
        let len = self.ids.len();
        let slot = self
            .ids
            .get_mut(index)
            .ok_or(GpuError::IndexOutOfRange { index, len })?;
        *slot = id;
        Ok(())
    }

    /// Stored ids as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.ids
    }

    /// Iterate over the stored ids.
    pub fn iter(&self) -> slice::Iter<'_, usize> {
        self.ids.iter()
    }

    /// Every device `R` reports, i.e. `set_all_gpus(R::device_count())`.
    ///
    /// # Errors
    ///
    /// Returns [`GpuError::DeviceNotAvailable`] if the runtime has no devices,
    /// or the runtime's own error if it cannot be queried.
    pub fn all<R: Runtime>() -> Result<Self> {
        let count = R::device_count()?;
        if count == 0 {
            return Err(GpuError::DeviceNotAvailable(format!(
                "{} runtime reports no devices",
                R::name()
            )));
        }
        let mut ids = Self::new();
        ids.set_all_gpus(count)?;
        Ok(ids)
    }

    /// Every device of `R` whose name equals `name`. An empty `name`
    /// selects every device.
    ///
    /// Returns an empty list when nothing matches.
    pub fn with_name<R: Runtime>(name: &str) -> Result<Self> {
        let count = R::device_count()?;
        let mut matching = Vec::new();
        for ordinal in 0..count {
            if name.is_empty() || R::device_name(ordinal)? == name {
                matching.push(ordinal);
            }
        }
        if matching.is_empty() {
            log::warn!("no {} device named {:?} among {} devices", R::name(), name, count);
            return Ok(Self::new());
        }
        Self::try_from(matching)
    }

    /// Resolve every stored id into a device handle on `R`.
    pub fn devices<R: Runtime>(&self) -> Result<Vec<GpuDevice>> {
        self.ids.iter().map(|&id| GpuDevice::open::<R>(id)).collect()
    }

    /// Names of the stored devices on `R`, in list order.
    ///
    /// Ids past the end of the enumeration are rejected by `R::device_name`.
    pub fn names<R: Runtime>(&self) -> Result<Vec<String>> {
        self.ids.iter().map(|&id| R::device_name(id)).collect()
    }
}

impl Index<usize> for GpuIds {
    type Output = usize;

    /// Panics if `index >= self.len()`; use [`GpuIds::get`] to handle that case.
    fn index(&self, index: usize) -> &usize {
        &self.ids[index]
    }
}

impl<'a> IntoIterator for &'a GpuIds {
    type Item = &'a usize;
    type IntoIter = slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl TryFrom<&[usize]> for GpuIds {
    type Error = GpuError;

    fn try_from(ids: &[usize]) -> Result<Self> {
        let mut list = Self::new();
        list.set_ids(ids)?;
        Ok(list)
    }
}

impl TryFrom<Vec<usize>> for GpuIds {
    type Error = GpuError;

    fn try_from(ids: Vec<usize>) -> Result<Self> {
        if ids.is_empty() {
            return Err(GpuError::InvalidArgument(
                "device id list must not be empty".into(),
            ));
        }
        Ok(Self { ids })
    }
}

impl FromStr for GpuIds {
    type Err = GpuError;

    fn from_str(s: &str) -> Result<Self> {
        crate::config::parse_ids(s)
    }
}

/// Comma-separated ids, e.g. `0,2,3`. An empty list formats as `""`,
/// which [`config::parse_ids`](crate::config::parse_ids) rejects.
impl fmt::Display for GpuIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}
