//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::{GenerateError, Uuid};
use inner::GlobalGenInner;

/// The process-wide generator returned by [`default_generator()`].
///
/// It draws random bytes from [`OsRng`](rand::rngs::OsRng) and reads the system clock. On Unix, it
/// resets its state when the process ID changes (i.e., upon process forks) so that a parent and a
/// child do not continue from the same last value.
#[derive(Debug)]
pub struct GlobalGenerator {
    inner: Mutex<GlobalGenInner>,
}

impl GlobalGenerator {
    /// Generates a new UUIDv7 object under the lock.
    pub fn generate(&self) -> Result<Uuid, GenerateError> {
        self.inner.lock().get_mut().generate()
    }

    /// Returns the last generated value.
    pub fn last_generated(&self) -> Uuid {
        self.inner.lock().get_mut().last_generated()
    }
}

/// Returns the process-wide global generator, creating one on the first call.
pub fn default_generator() -> &'static GlobalGenerator {
    static G: OnceLock<GlobalGenerator> = OnceLock::new();
    G.get_or_init(|| GlobalGenerator {
        inner: Mutex::new(GlobalGenInner::default()),
    })
}

/// Generates a UUIDv7 object.
///
/// This function employs the global generator and guarantees the process-wide monotonic order of
/// UUIDs generated within the same millisecond.
///
/// # Examples
///
/// ```rust
/// let uuid = uuidv7::uuid7()?;
/// println!("{}", uuid); // e.g., "01965347-e56d-7571-a1bb-6120dba3a645"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = uuidv7::uuid7()?.to_hex_string(false);
/// # Ok::<(), uuidv7::GenerateError>(())
/// ```
pub fn uuid7() -> Result<Uuid, GenerateError> {
    default_generator().generate()
}

mod inner {
    use rand::rngs::OsRng;

    use crate::generator::{with_rand08::Adapter, V7Generator};

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: V7Generator<Adapter<OsRng>>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: V7Generator::with_rand08(OsRng),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`V7Generator`] instance, resetting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut V7Generator<Adapter<OsRng>> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                log::debug!("uuidv7: process ID changed; resetting global generator");
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}
