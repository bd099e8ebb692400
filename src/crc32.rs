//! CRC-32 (IEEE 802.3) checksums.
//!
//! ```
//! use mini_digest::crc32;
//!
//! assert_eq!(crc32::calculate(b"Hello World!"), 0x1c291ca3);
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::DigestError;
use crate::FILE_READ_CHUNK_SIZE;

/// Streaming CRC-32 over any number of `update` calls.
#[derive(Debug, Clone, Default)]
pub struct Crc32 {
    hasher: crc32fast::Hasher,
}

impl Crc32 {
    /// A checksum over zero bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds `data` into the checksum.
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.hasher.update(data.as_ref());
        self
    }

    /// The checksum of everything fed so far.
    pub fn finalize(&self) -> u32 {
        self.hasher.clone().finalize()
    }
}

/// Checksum of `data` in one call.
pub fn calculate(data: impl AsRef<[u8]>) -> u32 {
    crc32fast::hash(data.as_ref())
}

/// Checksum of the contents of the file at `path`.
///
/// # Errors
///
/// Fails when the file cannot be opened or read.
pub fn calculate_file(path: impl AsRef<Path>) -> Result<u32, DigestError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| DigestError::OpenError {
        path: path.to_path_buf(),
        source,
    })?;
    let mut checksum = Crc32::new();
    let mut buffer = [0; FILE_READ_CHUNK_SIZE];
    loop {
        let readed = file.read(&mut buffer)?;
        if readed == 0 {
            break;
        }
        checksum.update(&buffer[..readed]);
    }
    log::debug!("CRC-32 of {0:?}: {1:08x}", path, checksum.finalize());
    Ok(checksum.finalize())
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case("", 0x00000000)]
    #[case("Hello World!", 0x1c291ca3)]
    #[case("123456789", 0xcbf43926)]
    #[case("The quick brown fox jumps over the lazy dog", 0x414fa339)]
    fn test_calculate(#[case] data: &str, #[case] expected: u32) {
        assert_eq!(calculate(data), expected);
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let mut checksum = Crc32::new();
        checksum.update("Hello").update(" ").update("World!");
        assert_eq!(checksum.finalize(), 0x1c291ca3);
        // finalize does not consume the running state
        checksum.update("");
        assert_eq!(checksum.finalize(), 0x1c291ca3);
    }

    #[test]
    fn test_calculate_file() -> Result<(), DigestError> {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 128 + 1) as u8).collect();
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(&data)?;
        file.flush()?;
        assert_eq!(calculate_file(file.path())?, 0x5547db1c);
        assert_eq!(calculate(&data), 0x5547db1c);
        Ok(())
    }

    #[test]
    fn test_calculate_file_missing() -> Result<(), DigestError> {
        let dir = tempfile::tempdir()?;
        let result = calculate_file(dir.path().join("missing.dat"));
        assert!(matches!(result, Err(DigestError::OpenError { .. })));
        Ok(())
    }
}
