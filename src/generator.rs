//! UUIDv7 generator and related types.

use crate::{GenerateError, RandError, Uuid};

pub mod with_rand08;

#[cfg(all(test, feature = "std"))]
mod tests;

/// A trait that defines the secure random byte source used by [`V7Generator`].
///
/// Implementations must produce cryptographically unpredictable bytes or fail; the generator never
/// retries on failure.
pub trait RandSource {
    /// Fills `dest` entirely with secure random bytes.
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<(), RandError>;
}

/// A trait that defines the clock used by [`V7Generator`].
pub trait TimeSource {
    /// Returns the current Unix time in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that reads [`std::time::SystemTime`].
///
/// A system clock set before the Unix epoch reads as zero, which the generator treats like a clock
/// rollback.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64)
    }
}

/// Represents a UUIDv7 generator that keeps the last generated value and guarantees the monotonic
/// order of UUIDs generated within the same millisecond.
///
/// When the clock has advanced past the timestamp of the last value, the generator fills `rand_a`
/// and `rand_b` with fresh random bits. Otherwise, including when the clock has moved backwards, it
/// reuses the last timestamp and increments `rand_a` and `rand_b` as a single 74-bit counter. Once
/// that counter is saturated, generation fails with [`GenerateError::SequenceOverflow`] until the
/// clock moves on to a later millisecond.
///
/// The methods take `&mut self`, so a single instance is ordered by call order. Wrap it in a
/// [`SharedGenerator`](crate::SharedGenerator) to share one instance across threads.
///
/// # Examples
///
/// ```rust
/// use uuidv7::V7Generator;
///
/// let mut g = V7Generator::with_rand08(rand::rngs::OsRng);
/// let x = g.generate()?;
/// let y = g.generate()?;
/// assert!(x < y);
/// # Ok::<(), uuidv7::GenerateError>(())
/// ```
#[derive(Debug, Default)]
pub struct V7Generator<R, T = StdSystemTime> {
    last: Uuid,
    rand_source: R,
    time_source: T,
}

impl<R: RandSource> V7Generator<R> {
    /// Creates a generator instance that reads the system clock.
    pub const fn new(rand_source: R) -> Self {
        Self::with_last(rand_source, Uuid::MIN)
    }

    /// Creates a generator instance that continues from `last` as if it had generated that value.
    pub const fn with_last(rand_source: R, last: Uuid) -> Self {
        Self {
            last,
            rand_source,
            time_source: StdSystemTime,
        }
    }
}

impl<R: RandSource, T: TimeSource> V7Generator<R, T> {
    /// Creates a generator instance with a custom clock.
    pub const fn with_rand_and_time_sources(rand_source: R, time_source: T) -> Self {
        Self::with_sources_and_last(rand_source, time_source, Uuid::MIN)
    }

    /// Creates a generator instance with a custom clock that continues from `last` as if it had
    /// generated that value.
    pub const fn with_sources_and_last(rand_source: R, time_source: T, last: Uuid) -> Self {
        Self {
            last,
            rand_source,
            time_source,
        }
    }

    /// Returns the last generated value, or the seed if nothing has been generated yet.
    pub const fn last_generated(&self) -> Uuid {
        self.last
    }

    /// Generates a new UUIDv7 object from the current timestamp.
    ///
    /// See the [`V7Generator`] type documentation for the description.
    pub fn generate(&mut self) -> Result<Uuid, GenerateError> {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_core(unix_ts_ms)
    }

    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed.
    ///
    /// Only the lower 48 bits of `unix_ts_ms` are used. On error, the generator state is left
    /// unchanged.
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Result<Uuid, GenerateError> {
        const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

        let unix_ts_ms = unix_ts_ms & MAX_TIMESTAMP;
        let last_ts = self.last.unix_ts_ms();

        if unix_ts_ms > last_ts {
            let mut rand = [0u8; 10];
            self.rand_source.fill_random(&mut rand)?;
            log::trace!("uuidv7: new millisecond {}", unix_ts_ms);

            self.last = Uuid::from_fields(
                unix_ts_ms,
                u16::from_be_bytes([rand[0] >> 4, rand[1]]),
                u64::from_be_bytes([
                    rand[2] >> 2,
                    rand[3],
                    rand[4],
                    rand[5],
                    rand[6],
                    rand[7],
                    rand[8],
                    rand[9],
                ]),
            );
        } else {
            if unix_ts_ms < last_ts {
                log::debug!(
                    "uuidv7: clock moved back by {} ms; continuing from {}",
                    last_ts - unix_ts_ms,
                    last_ts
                );
            }

            // increment rand_a:rand_b as a 74-bit counter
            let (rand_a, rand_b) = (self.last.rand_a(), self.last.rand_b());
            let (rand_a, rand_b) = if rand_b < Uuid::MAX_RAND_B {
                (rand_a, rand_b + 1)
            } else if rand_a < Uuid::MAX_RAND_A {
                (rand_a + 1, 0)
            } else {
                return Err(GenerateError::SequenceOverflow);
            };
            self.last = Uuid::from_fields(last_ts, rand_a, rand_b);
        }

        Ok(self.last)
    }
}

/// Supports operations as an infinite iterator that produces the result of
/// [`generate()`](V7Generator::generate) for each call of `next()`.
///
/// # Examples
///
/// ```rust
/// use uuidv7::V7Generator;
///
/// V7Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e.unwrap()));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V7Generator<R, T> {
    type Item = Result<Uuid, GenerateError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> core::iter::FusedIterator for V7Generator<R, T> {}
