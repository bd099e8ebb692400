use std::fmt::{Display, LowerHex, UpperHex};
use std::str::FromStr;

use crate::error::ParseDigestError;

/// Size in bytes of an MD5 digest.
pub const DIGEST_SIZE_BYTES: usize = 16;

/// The 128-bit digest computed by the [Md5Hasher](crate::Md5Hasher).
///
/// `Display` renders 32 lowercase hex characters; use the `{:X}` format or
/// [to_hex_upper_string](Digest::to_hex_upper_string) for uppercase.
///
/// The all-zero value is the sentinel returned by
/// [calculate_file](crate::Md5Hasher::calculate_file) when the file cannot be read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest {
    value: [u8; DIGEST_SIZE_BYTES],
}

impl Digest {
    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE_BYTES] {
        &self.value
    }

    /// Consumes the digest and returns its raw bytes.
    pub fn into_bytes(self) -> [u8; DIGEST_SIZE_BYTES] {
        self.value
    }

    /// Whether this is the all-zero "file unreadable" sentinel.
    pub fn is_zero(&self) -> bool {
        self.value.iter().all(|byte| *byte == 0)
    }

    /// 32 lowercase hex characters.
    pub fn to_hex_string(&self) -> String {
        format!("{:x}", self)
    }

    /// 32 uppercase hex characters.
    pub fn to_hex_upper_string(&self) -> String {
        format!("{:X}", self)
    }
}

impl From<[u8; DIGEST_SIZE_BYTES]> for Digest {
    fn from(value: [u8; DIGEST_SIZE_BYTES]) -> Digest {
        Digest { value }
    }
}

impl From<Digest> for [u8; DIGEST_SIZE_BYTES] {
    fn from(digest: Digest) -> Self {
        digest.value
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.value
    }
}

impl LowerHex for Digest {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for value in self.value.iter() {
            write!(formatter, "{:02x}", value)?
        }
        Ok(())
    }
}

impl UpperHex for Digest {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for value in self.value.iter() {
            write!(formatter, "{:02X}", value)?
        }
        Ok(())
    }
}

impl Display for Digest {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        LowerHex::fmt(self, formatter)
    }
}

impl FromStr for Digest {
    type Err = ParseDigestError;

    /// Parses exactly 32 hex characters, in either case.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.len() != DIGEST_SIZE_BYTES * 2 {
            return Err(ParseDigestError::InvalidLength(text.len()));
        }
        let mut value = [0u8; DIGEST_SIZE_BYTES];
        hex::decode_to_slice(text, &mut value)?;
        Ok(Digest { value })
    }
}
