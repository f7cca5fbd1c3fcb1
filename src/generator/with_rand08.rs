//! Integration with `rand` (v0.8) crate.
//!
//! [`OsRng`](rand::rngs::OsRng) is the platform CSPRNG backend (`getrandom(2)`, `BCryptGenRandom`,
//! `arc4random_buf`, and so on, selected by target). Any other [`RngCore`] works as long as it is
//! cryptographically secure.

use super::{RandSource, V7Generator};
use crate::RandError;
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn fill_random(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        self.0
            .try_fill_bytes(dest)
            .map_err(|err| RandError::new("`RngCore::try_fill_bytes` failed", err.code()))
    }
}

impl<T: RngCore> V7Generator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
