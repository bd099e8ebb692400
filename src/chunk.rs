use std::fmt::Display;
use std::ops::{Index, IndexMut};
use std::slice::SliceIndex;
use thiserror::Error;

use crate::conversions::le_bytes_to_words;

pub const CHUNK_SIZE_BYTES: usize = 64; // 512 / 8
pub const CHUNK_SIZE_WORDS: usize = CHUNK_SIZE_BYTES / 4;

pub type RawChunk = [u8; CHUNK_SIZE_BYTES];

/// The 16 little-endian message words of a chunk.
pub type Block = [u32; CHUNK_SIZE_WORDS];

/// A single 512-bit block, the unit the compression function consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk(pub RawChunk);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkTryFromSliceError {
    #[error("Invalid slice length: {0}")]
    InvalidSize(usize),
}

impl Chunk {
    pub fn words(&self) -> Block {
        le_bytes_to_words(&self.0)
    }
}

impl From<RawChunk> for Chunk {
    fn from(value: RawChunk) -> Self {
        Chunk(value)
    }
}

impl Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (index, byte) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        write!(f, "]")
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Chunk([0; CHUNK_SIZE_BYTES])
    }
}

impl<I: SliceIndex<[u8]>> Index<I> for Chunk {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        &self.0.as_slice()[index]
    }
}

impl<I: SliceIndex<[u8]>> IndexMut<I> for Chunk {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.0.as_mut_slice()[index]
    }
}

impl TryFrom<&[u8]> for Chunk {
    type Error = ChunkTryFromSliceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != CHUNK_SIZE_BYTES {
            return Err(ChunkTryFromSliceError::InvalidSize(value.len()));
        }
        let mut chunk = Chunk::default();
        chunk.0.copy_from_slice(value);
        Ok(chunk)
    }
}
