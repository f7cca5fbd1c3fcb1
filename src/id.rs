#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, hash, str};

use fstr::FStr;

use crate::{ParseError, ParseErrorKind};

/// Represents a UUID version 7 value.
///
/// Every value of this type carries the version nibble `7` and the variant bits `0b10`; the
/// constructors reject anything else. Equality and ordering are defined over the 16-byte
/// big-endian representation, so sorting values sorts them by creation time.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Version field value.
    pub const VERSION: u8 = 7;

    /// Variant field value.
    pub const VARIANT: u8 = 0b10;

    /// Maximum value of the 12-bit `rand_a` field.
    pub const MAX_RAND_A: u16 = 0x0fff;

    /// Maximum value of the 62-bit `rand_b` field.
    pub const MAX_RAND_B: u64 = 0x3fff_ffff_ffff_ffff;

    /// Smallest UUIDv7 (00000000-0000-7000-8000-000000000000)
    pub const MIN: Self = Self::from_fields(0, 0, 0);

    /// Largest UUIDv7 (ffffffff-ffff-7fff-bfff-ffffffffffff)
    pub const MAX: Self = Self::from_fields((1 << 48) - 1, Self::MAX_RAND_A, Self::MAX_RAND_B);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns a copy of the underlying byte array.
    pub const fn get_bytes(&self) -> [u8; 16] {
        self.0
    }

    /// Creates a UUIDv7 from field values.
    ///
    /// # Panics
    ///
    /// Panics if any argument exceeds the bit width of its field.
    pub const fn from_fields(unix_ts_ms: u64, rand_a: u16, rand_b: u64) -> Self {
        if unix_ts_ms >= 1 << 48 || rand_a > Self::MAX_RAND_A || rand_b > Self::MAX_RAND_B {
            panic!("invalid field value");
        }

        Self([
            (unix_ts_ms >> 40) as u8,
            (unix_ts_ms >> 32) as u8,
            (unix_ts_ms >> 24) as u8,
            (unix_ts_ms >> 16) as u8,
            (unix_ts_ms >> 8) as u8,
            unix_ts_ms as u8,
            (Self::VERSION << 4) | (rand_a >> 8) as u8,
            rand_a as u8,
            (Self::VARIANT << 6) | (rand_b >> 56) as u8,
            (rand_b >> 48) as u8,
            (rand_b >> 40) as u8,
            (rand_b >> 32) as u8,
            (rand_b >> 24) as u8,
            (rand_b >> 16) as u8,
            (rand_b >> 8) as u8,
            rand_b as u8,
        ])
    }

    /// Creates a UUIDv7 from a 16-byte big-endian array, checking the version and variant bits.
    ///
    /// All other bits are accepted as they are.
    pub const fn from_bytes(bytes: [u8; 16]) -> Result<Self, ParseError> {
        if bytes[6] >> 4 != Self::VERSION {
            Err(ParseError::new(ParseErrorKind::InvalidVersion))
        } else if bytes[8] >> 6 != Self::VARIANT {
            Err(ParseError::new(ParseErrorKind::InvalidVariant))
        } else {
            Ok(Self(bytes))
        }
    }

    /// Creates a UUIDv7 from a byte slice that must be exactly 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        <[u8; 16]>::try_from(bytes)
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidFormat))
            .and_then(Self::from_bytes)
    }

    /// Creates a UUIDv7 from a raw pointer to 16 bytes.
    ///
    /// Returns an error of kind [`ParseErrorKind::NullPointer`] if `bytes` is null.
    ///
    /// # Safety
    ///
    /// If non-null, `bytes` must be valid for reads of 16 bytes. No alignment is required.
    pub unsafe fn from_ptr(bytes: *const u8) -> Result<Self, ParseError> {
        if bytes.is_null() {
            return Err(ParseError::new(ParseErrorKind::NullPointer));
        }
        // SAFETY: the caller guarantees 16 readable bytes behind a non-null pointer.
        Self::from_bytes(unsafe { bytes.cast::<[u8; 16]>().read_unaligned() })
    }

    /// Creates a UUIDv7 from its textual representation.
    ///
    /// Accepts the 8-4-4-4-12 hyphenated form (36 characters) and the 32-digit form without
    /// hyphens. Hexadecimal digits are case-insensitive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidv7::Uuid;
    ///
    /// let x = Uuid::parse("01965347-e56d-7571-a1bb-6120dba3a645")?;
    /// let y = Uuid::parse("01965347E56D7571A1BB6120DBA3A645")?;
    /// assert_eq!(x, y);
    /// assert_eq!(x.unix_ts_ms(), 0x0196_5347_e56d);
    /// # Ok::<(), uuidv7::ParseError>(())
    /// ```
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        parse_inner(src.as_bytes())
            .map(Self)
            .map_err(ParseError::new)
    }

    /// Creates a UUIDv7 from its textual representation, returning `None` on failure.
    pub fn try_parse(src: &str) -> Option<Self> {
        parse_inner(src.as_bytes()).ok().map(Self)
    }

    /// Returns the 48-bit `unix_ts_ms` field.
    pub const fn unix_ts_ms(&self) -> u64 {
        let b = &self.0;
        u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]])
    }

    /// Returns the 12-bit `rand_a` field.
    pub const fn rand_a(&self) -> u16 {
        u16::from_be_bytes([self.0[6] & 0x0f, self.0[7]])
    }

    /// Returns the 62-bit `rand_b` field.
    pub const fn rand_b(&self) -> u64 {
        let b = &self.0;
        u64::from_be_bytes([b[8] & 0x3f, b[9], b[10], b[11], b[12], b[13], b[14], b[15]])
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidv7::Uuid;
    ///
    /// let x = "01965347-e56d-7571-a1bb-6120dba3a645".parse::<Uuid>()?;
    /// assert_eq!(&x.encode() as &str, "01965347-e56d-7571-a1bb-6120dba3a645");
    /// assert_eq!(&x.encode_simple() as &str, "01965347e56d7571a1bb6120dba3a645");
    /// # Ok::<(), uuidv7::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        let mut buffer = [0u8; 36];
        self.write_hex(&mut buffer, true);
        // SAFETY: `write_hex` fills the buffer with ASCII digits and hyphens only.
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Returns the 32-digit hexadecimal string representation without hyphens stored in a
    /// stack-allocated string.
    pub fn encode_simple(&self) -> FStr<32> {
        let mut buffer = [0u8; 32];
        self.write_hex(&mut buffer, false);
        // SAFETY: `write_hex` fills the buffer with ASCII digits only.
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }

    /// Returns the lowercase hexadecimal string representation, with or without the four
    /// hyphens.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn to_hex_string(&self, include_hyphens: bool) -> String {
        if include_hyphens {
            self.encode().to_string()
        } else {
            self.encode_simple().to_string()
        }
    }

    /// Returns a hash value folding the 16 bytes in machine-word-sized big-endian chunks with XOR.
    ///
    /// Equal values always produce equal hashes. [`Hash`](hash::Hash) is implemented on top of
    /// this function.
    pub fn get_hash(&self) -> usize {
        const WORD: usize = std::mem::size_of::<usize>();
        self.0.chunks_exact(WORD).fold(0, |hash, chunk| {
            hash ^ chunk.iter().fold(0usize, |acc, e| (acc << 8) | *e as usize)
        })
    }

    /// Writes lowercase hex digits into `dst`, which must be 36 bytes long with `hyphens` or 32
    /// bytes long without.
    fn write_hex(&self, dst: &mut [u8], hyphens: bool) {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        debug_assert_eq!(dst.len(), if hyphens { 36 } else { 32 });

        let mut cursor = 0;
        for (i, e) in self.0.iter().enumerate() {
            if hyphens && matches!(i, 4 | 6 | 8 | 10) {
                dst[cursor] = b'-';
                cursor += 1;
            }
            dst[cursor] = DIGITS[(e >> 4) as usize];
            dst[cursor + 1] = DIGITS[(e & 15) as usize];
            cursor += 2;
        }
    }
}

/// Decodes the textual representation into bytes, checking the format, version, and variant in
/// this order.
fn parse_inner(src: &[u8]) -> Result<[u8; 16], ParseErrorKind> {
    const fn decode_hex(c: u8) -> Option<u8> {
        match c {
            b'0'..=b'9' => Some(c - b'0'),
            b'a'..=b'f' => Some(c - b'a' + 10),
            b'A'..=b'F' => Some(c - b'A' + 10),
            _ => None,
        }
    }

    let (hyphens, version_index, variant_index) = match src.len() {
        36 => {
            if src[8] != b'-' || src[13] != b'-' || src[18] != b'-' || src[23] != b'-' {
                return Err(ParseErrorKind::InvalidFormat);
            }
            (true, 14, 19)
        }
        32 => (false, 12, 16),
        _ => return Err(ParseErrorKind::InvalidFormat),
    };

    if src[version_index] != b'7' {
        return Err(ParseErrorKind::InvalidVersion);
    }

    let variant = decode_hex(src[variant_index]).ok_or(ParseErrorKind::InvalidFormat)?;
    if variant >> 2 != Uuid::VARIANT {
        return Err(ParseErrorKind::InvalidVariant);
    }

    let mut dst = [0u8; 16];
    let mut cursor = 0;
    for e in dst.iter_mut() {
        if hyphens && matches!(cursor, 8 | 13 | 18 | 23) {
            cursor += 1;
        }
        let hi = decode_hex(src[cursor]).ok_or(ParseErrorKind::InvalidFormat)?;
        let lo = decode_hex(src[cursor + 1]).ok_or(ParseErrorKind::InvalidFormat)?;
        *e = (hi << 4) | lo;
        cursor += 2;
    }
    Ok(dst)
}

impl Default for Uuid {
    /// Returns [`Uuid::MIN`].
    fn default() -> Self {
        Self::MIN
    }
}

impl hash::Hash for Uuid {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.get_hash());
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse(src)
    }
}

impl TryFrom<&str> for Uuid {
    type Error = ParseError;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        Self::parse(src)
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl TryFrom<[u8; 16]> for Uuid {
    type Error = ParseError;

    fn try_from(src: [u8; 16]) -> Result<Self, Self::Error> {
        Self::from_bytes(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl TryFrom<u128> for Uuid {
    type Error = ParseError;

    fn try_from(src: u128) -> Result<Self, Self::Error> {
        Self::from_bytes(src.to_be_bytes())
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            Self::parse(&src)
        }
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::{ParseError, Uuid};

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl TryFrom<uuid::Uuid> for Uuid {
        type Error = ParseError;

        fn try_from(src: uuid::Uuid) -> Result<Self, Self::Error> {
            Self::from_bytes(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUIDv7 representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Self::Value::parse(value).map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::from_slice(value).map_err(de::Error::custom)
        }
    }

}
