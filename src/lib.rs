#![warn(missing_docs)]

//! A streaming implementation of the [MD5] message digest, plus a [CRC-32](crc32)
//! checksum, for byte slices, [std::io::Read] implementations and files.
//!
//! ## Example
//! ```rust
//! use mini_digest::{DigestError, Md5Hasher};
//!
//! fn example() -> Result<(), DigestError> {
//!     let path = std::env::temp_dir().join("mini_digest_doc_example.txt");
//!     std::fs::write(&path, b"hello world")?;
//!     let digest = Md5Hasher::try_calculate_file(&path)?;
//!     std::fs::remove_file(&path)?;
//!     assert_eq!(digest.to_string(), "5eb63bbbe01eeed093cb22bb8f5acdc3");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! [MD5]: https://www.ietf.org/rfc/rfc1321.txt

mod chunk;
mod chunk_processor;
mod conversions;
pub mod crc32;
mod digest;
mod digest_state;
mod error;

pub use crate::digest::{Digest, DIGEST_SIZE_BYTES};
pub use crate::error::{DigestError, ParseDigestError};

use crate::chunk_processor::ChunkProcessor;

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Size of each read when hashing files and readers.
pub const FILE_READ_CHUNK_SIZE: usize = 4096;

/// A streaming MD5 engine.
///
/// Data is fed with any number of [update](Md5Hasher::update) calls, whatever their
/// sizes; the result only depends on the concatenation of the fed bytes. After the last
/// update call [finalize](Md5Hasher::finalize) once, then read the [digest](Md5Hasher::digest).
///
/// Feeding more data after `finalize`, or finalizing twice, gives a meaningless digest
/// (debug builds panic instead). Call [reset](Md5Hasher::reset) to start a new message.
///
/// ```
/// use mini_digest::Md5Hasher;
///
/// let digest = Md5Hasher::new()
///     .update("Hello ")
///     .update("World!")
///     .finalize()
///     .digest();
/// assert_eq!(digest.to_string(), "ed076287532e86365e841e92bfc50d8c");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Md5Hasher {
    processor: ChunkProcessor,
}

impl Md5Hasher {
    /// Creates an engine ready to receive the first bytes of a message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards everything fed so far and starts a new message.
    pub fn reset(&mut self) -> &mut Self {
        self.processor.reset();
        self
    }

    /// Feeds `data` into the engine. Empty input is allowed.
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.processor.update(data);
        self
    }

    /// Pads the message and compresses the remaining bytes. Call exactly once per message.
    pub fn finalize(&mut self) -> &mut Self {
        self.processor.finalize();
        self
    }

    /// The digest of the accumulators as they stand; meaningful after
    /// [finalize](Md5Hasher::finalize).
    pub fn digest(&self) -> Digest {
        self.processor.digest()
    }

    /// Computes and returns the digest of `data` in one call.
    ///
    /// # Examples
    /// ```
    /// use mini_digest::Md5Hasher;
    ///
    /// let digest = Md5Hasher::calculate(b"");
    /// assert_eq!(digest.to_string(), "d41d8cd98f00b204e9800998ecf8427e");
    /// ```
    pub fn calculate(data: impl AsRef<[u8]>) -> Digest {
        Self::new().update(data).finalize().digest()
    }

    /// Computes and returns the digest of the string slice.
    pub fn hash_str(data: &str) -> Digest {
        Self::calculate(data.as_bytes())
    }

    /// Computes and returns the digest of the data that can be read from the `input`.
    ///
    /// # Errors
    ///
    /// If there's any I/O error while reading the `input` an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use mini_digest::Md5Hasher;
    ///
    /// let digest = Md5Hasher::hash(&mut Cursor::new("hello world".as_bytes()))
    ///     .expect("Unexpected error reading from a cursor");
    /// assert_eq!(digest.to_string(), "5eb63bbbe01eeed093cb22bb8f5acdc3");
    /// ```
    pub fn hash(input: &mut dyn Read) -> Result<Digest, DigestError> {
        let mut hasher = Self::new();
        let mut buffer = [0; FILE_READ_CHUNK_SIZE];
        loop {
            let readed = match input.read(&mut buffer) {
                Ok(0) => break,
                Ok(readed) => readed,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(DigestError::ReadError(err)),
            };
            hasher.update(&buffer[..readed]);
        }
        Ok(hasher.finalize().digest())
    }

    /// Computes the digest of the contents of the file at `path`.
    ///
    /// # Errors
    ///
    /// [DigestError::OpenError] if the file cannot be opened, [DigestError::ReadError]
    /// if reading it fails midway.
    pub fn try_calculate_file(path: impl AsRef<Path>) -> Result<Digest, DigestError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|source| DigestError::OpenError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::hash(&mut file)
    }

    /// Computes the digest of the contents of the file at `path`, returning the all-zero
    /// digest if the file cannot be read.
    ///
    /// Check the result with [Digest::is_zero]; no input hashes to zero in practice. Use
    /// [try_calculate_file](Md5Hasher::try_calculate_file) to get the I/O error instead.
    ///
    /// ```
    /// use mini_digest::Md5Hasher;
    ///
    /// let digest = Md5Hasher::calculate_file("/this/path/does/not/exist");
    /// assert!(digest.is_zero());
    /// ```
    pub fn calculate_file(path: impl AsRef<Path>) -> Digest {
        match Self::try_calculate_file(path) {
            Ok(digest) => digest,
            Err(err) => {
                log::warn!("Returning zero digest: {0}", err);
                Digest::default()
            }
        }
    }
}
