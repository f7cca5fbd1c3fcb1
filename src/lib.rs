//! An implementation of RFC 9562 UUID version 7
//!
//! ```rust
//! use uuidv7::{uuid7, Uuid};
//!
//! let uuid = uuid7()?;
//! println!("{}", uuid); // e.g. "01965347-e56d-7571-a1bb-6120dba3a645"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let parsed = Uuid::parse(&uuid.to_hex_string(false))?;
//! assert_eq!(parsed, uuid);
//! # Ok::<(), uuidv7::Error>(())
//! ```
//!
//! See [RFC 9562](https://www.rfc-editor.org/rfc/rfc9562.html#name-uuid-version-7).
//!
//! # Field and bit layout
//!
//! This implementation produces and accepts identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        rand_a         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in
//!   milliseconds.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 2-bit `var` field is set at `10`.
//! - The 12-bit `rand_a` and 62-bit `rand_b` fields are filled with
//!   cryptographically strong random bits whenever `unix_ts_ms` changes.
//!
//! When a generator produces more than one identifier within the same
//! millisecond, it increments `rand_a` and `rand_b` as a single 74-bit counter
//! instead of sampling new random bits, so that the identifiers it returns are
//! strictly increasing. A clock rollback is handled the same way: the generator
//! keeps the larger timestamp of the previous identifier and increments the
//! counter. In the practically unreachable case where the counter is exhausted,
//! generation fails with [`GenerateError::SequenceOverflow`] until the clock
//! reaches the next millisecond.
//!
//! Monotonicity is guaranteed per generator instance only. Use
//! [`SharedGenerator`] or the global generator behind [`uuid7()`] to share one
//! instance between threads.
//!
//! # Crate features
//!
//! - `std`: `std::error::Error`, `String` conversions, the system clock, and
//!   [`SharedGenerator`].
//! - `global_gen` (default): [`uuid7()`] and [`default_generator()`] backed by
//!   the operating system's CSPRNG.
//! - `serde`: `Serialize` and `Deserialize` implementations for [`Uuid`].
//! - `uuid`: conversions between [`Uuid`] and `uuid::Uuid`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{Error, GenerateError, ParseError, ParseErrorKind, RandError};

mod id;
pub use id::Uuid;

pub mod generator;
#[doc(inline)]
pub use generator::{with_rand08, RandSource, StdSystemTime, TimeSource, V7Generator};

#[cfg(feature = "std")]
mod shared;
#[cfg(feature = "std")]
pub use shared::SharedGenerator;

#[cfg(feature = "global_gen")]
mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{default_generator, uuid7, GlobalGenerator};
