//! Device selection from text and environment variables.
//!
//! The textual form is a comma-separated list of decimal ids such as
//! `"0,2,3"`. Whitespace around each id is ignored. Ids are plain ASCII
//! digits; signs such as `"+1"` are rejected.

use std::env;

use crate::error::{GpuError, Result};
use crate::ids::GpuIds;

/// Environment variable read by [`from_default_env`].
pub const GPU_IDS_ENV: &str = "TIGRE_GPU_IDS";

/// Parse a comma-separated device id list.
///
/// # Errors
///
/// * [`GpuError::InvalidArgument`] if `text` is blank. The empty list
///   formats as `""`, so it does not parse back.
/// * [`GpuError::InvalidDeviceId`] for the first token that is not a
///   run of decimal digits.
pub fn parse_ids(text: &str) -> Result<GpuIds> {
    let text = text.trim();
    if text.is_empty() {
        return Err(GpuError::InvalidArgument("empty device id list".into()));
    }

    let ids = text
        .split(',')
        .map(|token| {
            let token = token.trim();
            if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
                return Err(GpuError::InvalidDeviceId(token.to_string()));
            }
            token
                .parse::<usize>()
                .map_err(|_| GpuError::InvalidDeviceId(token.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    GpuIds::try_from(ids)
}

/// Read a device id list from the environment variable `var`.
///
/// Returns `Ok(None)` when the variable is not set or blank.
pub fn from_env(var: &str) -> Result<Option<GpuIds>> {
    match env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => {
            let ids = parse_ids(&value)?;
            log::debug!("{}={} selects devices {}", var, value, ids);
            Ok(Some(ids))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(GpuError::InvalidArgument(format!(
            "{} is not valid unicode",
            var
        ))),
    }
}

/// [`from_env`] on [`GPU_IDS_ENV`].
pub fn from_default_env() -> Result<Option<GpuIds>> {
    from_env(GPU_IDS_ENV)
}
