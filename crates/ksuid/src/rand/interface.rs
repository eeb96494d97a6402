/// A trait for random sources that fill KSUID payloads.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Payloads are drawn as a `u128` and written out
/// big-endian, so implementors only need to produce one integer per ID.
///
/// Implementations take `&self`: a source shared between threads must
/// synchronize internally (see [`LockRandom`]) so that two concurrent draws
/// never observe overlapping reads of the same underlying stream.
///
/// # Example
/// ```
/// use ksuid::RandSource;
///
/// struct FixedRand;
/// impl RandSource<u128> for FixedRand {
///     fn rand(&self) -> u128 {
///         1234
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand(), 1234);
/// ```
///
/// [`LockRandom`]: crate::LockRandom
pub trait RandSource<T> {
    /// Returns a random value.
    fn rand(&self) -> T;
}

impl<T, R: RandSource<T> + ?Sized> RandSource<T> for &R {
    fn rand(&self) -> T {
        (**self).rand()
    }
}
