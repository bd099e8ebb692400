use crate::chunk::{Chunk, RawChunk, CHUNK_SIZE_BYTES};
use crate::conversions::bit_length_to_le;
use crate::digest::Digest;
use crate::digest_state::DigestState;

const INITIAL_BIT: u8 = 0x80; // 1 in big endian.
const LENGTH_SIZE_BYTES: usize = 8; // 64 / 8
const LENGTH_OFFSET: usize = CHUNK_SIZE_BYTES - LENGTH_SIZE_BYTES;

/// Bytes waiting for a full chunk. Never holds a complete chunk between calls.
#[derive(Debug, Clone, Copy)]
struct PendingBuffer {
    bytes: RawChunk,
    len: usize,
}

impl Default for PendingBuffer {
    fn default() -> Self {
        PendingBuffer {
            bytes: [0; CHUNK_SIZE_BYTES],
            len: 0,
        }
    }
}

impl PendingBuffer {
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Copies as much of `data` as fits and returns what did not.
    fn fill<'a>(&mut self, data: &'a [u8]) -> &'a [u8] {
        let taken = data.len().min(CHUNK_SIZE_BYTES - self.len);
        let (head, rest) = data.split_at(taken);
        self.bytes[self.len..self.len + taken].copy_from_slice(head);
        self.len += taken;
        rest
    }

    fn is_full(&self) -> bool {
        self.len == CHUNK_SIZE_BYTES
    }

    fn take_chunk(&mut self) -> Chunk {
        self.len = 0;
        Chunk::from(self.bytes)
    }
}

/// Block buffering and padding on top of [DigestState].
#[derive(Debug, Clone, Default)]
pub struct ChunkProcessor {
    buffer: PendingBuffer,
    state: DigestState,
    finalized: bool,
}

impl ChunkProcessor {
    pub fn reset(&mut self) {
        *self = ChunkProcessor::default();
    }

    pub fn update(&mut self, data: impl AsRef<[u8]>) {
        debug_assert!(!self.finalized, "update called after finalize");
        let mut data = data.as_ref();
        if !self.buffer.is_empty() {
            data = self.buffer.fill(data);
            if !self.buffer.is_full() {
                return;
            }
            log::debug!(
                "Buffer filled: processed={0}, content={1:?}",
                self.state.processed_bytes(),
                self.buffer.as_slice()
            );
            let chunk = self.buffer.take_chunk();
            self.state = self.state.process_chunk(&chunk);
        }
        let chunks_iter = data.chunks_exact(CHUNK_SIZE_BYTES);
        let remainder = chunks_iter.remainder();
        for raw_chunk in chunks_iter {
            let mut chunk = Chunk::default();
            chunk[0..CHUNK_SIZE_BYTES].copy_from_slice(raw_chunk);
            self.state = self.state.process_chunk(&chunk);
        }
        self.buffer.fill(remainder);
    }

    /// Pads the pending bytes and compresses the last one or two chunks.
    pub fn finalize(&mut self) {
        debug_assert!(!self.finalized, "finalize called twice");
        self.finalized = true;
        let pending = self.buffer.len;
        let length = bit_length_to_le(self.state.processed_bytes().wrapping_add(pending as u64));
        let mut chunk = self.buffer.take_chunk();
        chunk[pending] = INITIAL_BIT;
        chunk[pending + 1..CHUNK_SIZE_BYTES].fill(0);
        if pending >= LENGTH_OFFSET {
            log::debug!(
                "Buffer cannot hold padding: length={0}, content={1}",
                pending,
                chunk
            );
            self.state = self.state.process_chunk(&chunk);
            chunk = Chunk::default();
        }
        chunk[LENGTH_OFFSET..CHUNK_SIZE_BYTES].copy_from_slice(&length);
        log::debug!("Last chunk: {0}", chunk);
        self.state = self.state.process_chunk(&chunk);
    }

    pub fn digest(&self) -> Digest {
        Digest::from(self.state.to_raw())
    }
}
