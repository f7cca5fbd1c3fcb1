//! Thread-safe wrapper around [`V7Generator`].

#![cfg(feature = "std")]
#![cfg_attr(docsrs, doc(cfg(feature = "std")))]

use core::ops::DerefMut;

use parking_lot::Mutex;

use crate::generator::{RandSource, StdSystemTime, TimeSource, V7Generator};
use crate::{GenerateError, Uuid};

/// A [`V7Generator`] guarded by a mutex so that one instance can be shared by multiple threads.
///
/// The lock is held for the whole of each [`generate()`](SharedGenerator::generate) call,
/// including the random byte fetch, so concurrent callers are serialized and every caller
/// observes a distinct, strictly increasing value.
///
/// # Examples
///
/// ```rust
/// use std::{sync::Arc, thread};
/// use uuidv7::{SharedGenerator, V7Generator};
///
/// let g = Arc::new(SharedGenerator::new(V7Generator::with_rand08(rand::rngs::OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.generate().unwrap(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
#[derive(Debug, Default)]
pub struct SharedGenerator<R, T = StdSystemTime> {
    inner: Mutex<V7Generator<R, T>>,
}

impl<R: RandSource, T: TimeSource> SharedGenerator<R, T> {
    /// Wraps a generator instance.
    pub fn new(generator: V7Generator<R, T>) -> Self {
        Self {
            inner: Mutex::new(generator),
        }
    }

    /// Generates a new UUIDv7 object under the lock.
    ///
    /// See [`V7Generator::generate`] for the description.
    pub fn generate(&self) -> Result<Uuid, GenerateError> {
        self.inner.lock().generate()
    }

    /// Returns the last generated value.
    pub fn last_generated(&self) -> Uuid {
        self.inner.lock().last_generated()
    }

    /// Locks the generator for a sequence of calls that must not interleave with other threads.
    pub fn lock(&self) -> impl DerefMut<Target = V7Generator<R, T>> + '_ {
        self.inner.lock()
    }

    /// Unwraps the generator instance.
    pub fn into_inner(self) -> V7Generator<R, T> {
        self.inner.into_inner()
    }
}

impl<R: RandSource, T: TimeSource> From<V7Generator<R, T>> for SharedGenerator<R, T> {
    fn from(src: V7Generator<R, T>) -> Self {
        Self::new(src)
    }
}
