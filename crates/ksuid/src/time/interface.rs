use core::time::Duration;

/// KSUID epoch: Tuesday, May 13, 2014 16:53:20 UTC
///
/// Timestamps are stored as seconds since this instant, which moves the
/// 32-bit field's rollover out to the year 2150.
pub const KSUID_EPOCH: Duration = Duration::from_secs(1_400_000_000);

/// A trait for time sources that return a timestamp relative to the KSUID
/// epoch.
///
/// This abstraction allows you to plug in the system clock or a mocked time
/// source in tests.
///
/// The timestamp type `T` is generic (a KSUID uses `u32`), and the unit is
/// expected to be **seconds** since [`KSUID_EPOCH`].
///
/// # Example
///
/// ```
/// use ksuid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<u32> for FixedTime {
///     fn current_timestamp(&self) -> u32 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_timestamp(), 1234);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in seconds since [`KSUID_EPOCH`].
    fn current_timestamp(&self) -> T;
}

impl<T, C: TimeSource<T> + ?Sized> TimeSource<T> for &C {
    fn current_timestamp(&self) -> T {
        (**self).current_timestamp()
    }
}
