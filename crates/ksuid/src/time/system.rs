use crate::{KSUID_EPOCH, TimeSource};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Wall-clock time source reading [`SystemTime::now`].
///
/// KSUID timestamps have one-second resolution and carry no monotonicity
/// guarantee, so the plain system clock is sufficient; there is no ticker
/// thread or cached offset.
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource<u32> for SystemClock {
    fn current_timestamp(&self) -> u32 {
        timestamp_from_datetime(now())
    }
}

/// Returns the current wall-clock time.
pub(crate) fn now() -> SystemTime {
    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    {
        use web_time::web::SystemTimeExt;
        web_time::SystemTime::now().to_std()
    }
    #[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
    {
        SystemTime::now()
    }
}

/// Converts a wall-clock time to seconds since [`KSUID_EPOCH`].
///
/// Times before the epoch clamp to `0` and times past the end of the 32-bit
/// range clamp to `u32::MAX`.
#[must_use]
pub fn timestamp_from_datetime(datetime: SystemTime) -> u32 {
    let secs = datetime
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .saturating_sub(KSUID_EPOCH)
        .as_secs();
    u32::try_from(secs).unwrap_or(u32::MAX)
}

/// Converts seconds since [`KSUID_EPOCH`] back to wall-clock time.
#[must_use]
pub fn datetime_from_timestamp(timestamp: u32) -> SystemTime {
    UNIX_EPOCH + KSUID_EPOCH + Duration::from_secs(u64::from(timestamp))
}
