use crate::chunk::{Block, Chunk, CHUNK_SIZE_BYTES};
use crate::conversions::words_to_le_bytes;

use log::trace;
use std::fmt::Display;

const STEPS_PER_ROUND: usize = 16;
const STEP_COUNT: usize = STEPS_PER_ROUND * 4;

// Precomputed table for T[i] = floor(2^32 * abs(sin(i))) for i = 1..64
const SINE_TABLE: [u32; STEP_COUNT] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

// Left-rotate amounts, indexed by round and by step modulo 4.
const SHIFT_TABLE: [[u32; 4]; 4] = [
    [7, 12, 17, 22],
    [5, 9, 14, 20],
    [4, 11, 16, 23],
    [6, 10, 15, 21],
];

// Message word for step i of round r is (OFFSET[r] + STRIDE[r] * i) mod 16.
const WORD_STRIDE: [usize; 4] = [1, 5, 3, 7];
const WORD_OFFSET: [usize; 4] = [0, 1, 5, 0];

const INITIAL_WORD_A: u32 = 0x67452301;
const INITIAL_WORD_B: u32 = 0xefcdab89;
const INITIAL_WORD_C: u32 = 0x98badcfe;
const INITIAL_WORD_D: u32 = 0x10325476;

const fn aux_fun_f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

const fn aux_fun_g(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & !z)
}

const fn aux_fun_h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

const fn aux_fun_i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}

const fn message_index(step: usize) -> usize {
    let round = step / STEPS_PER_ROUND;
    (WORD_OFFSET[round] + WORD_STRIDE[round] * step) % STEPS_PER_ROUND
}

/// Accumulators A, B, C, D plus the count of bytes already compressed.
///
/// The byte count only ever grows by [CHUNK_SIZE_BYTES], in
/// [process_chunk](DigestState::process_chunk).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DigestState {
    words: [u32; 4],
    processed_bytes: u64,
}

impl Display for DigestState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let [a, b, c, d] = self.words;
        write!(
            f,
            "DigestState {{ a: {:08x}, b: {:08x}, c: {:08x}, d: {:08x}, processed: {} }}",
            a, b, c, d, self.processed_bytes
        )
    }
}

impl Default for DigestState {
    fn default() -> Self {
        DigestState {
            words: [INITIAL_WORD_A, INITIAL_WORD_B, INITIAL_WORD_C, INITIAL_WORD_D],
            processed_bytes: 0,
        }
    }
}

impl DigestState {
    pub fn processed_bytes(&self) -> u64 {
        self.processed_bytes
    }

    /// Applies one of the 64 operations; `step` is zero based.
    ///
    /// The register being written rotates A, D, C, B; the other three are
    /// read in the order that follows it.
    pub fn advance_step(self, block: &Block, step: usize) -> Self {
        let round = step / STEPS_PER_ROUND;
        let target = (4 - step % 4) % 4;
        let x = self.words[(target + 1) % 4];
        let y = self.words[(target + 2) % 4];
        let z = self.words[(target + 3) % 4];
        let mixed = match round {
            0 => aux_fun_f(x, y, z),
            1 => aux_fun_g(x, y, z),
            2 => aux_fun_h(x, y, z),
            3 => aux_fun_i(x, y, z),
            _ => unreachable!("step {step} is out of range"),
        };
        let mut words = self.words;
        words[target] = words[target]
            .wrapping_add(mixed)
            .wrapping_add(block[message_index(step)])
            .wrapping_add(SINE_TABLE[step])
            .rotate_left(SHIFT_TABLE[round][step % 4])
            .wrapping_add(x);
        DigestState { words, ..self }
    }

    pub fn process_chunk(self, chunk: &Chunk) -> Self {
        let block = chunk.words();
        let mut result = self;
        for step in 0..STEP_COUNT {
            result = result.advance_step(&block, step);
            trace!("State at step {:0>2}: {}", step + 1, result);
        }
        let mut words = self.words;
        for (word, mixed) in words.iter_mut().zip(result.words) {
            *word = word.wrapping_add(mixed);
        }
        DigestState {
            words,
            processed_bytes: self.processed_bytes.wrapping_add(CHUNK_SIZE_BYTES as u64),
        }
    }

    pub fn to_raw(self) -> [u8; 16] {
        words_to_le_bytes(&self.words)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    const EMPTY_MESSAGE_BLOCK: Block = [0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

    #[rstest]
    #[case(0, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15])]
    #[case(16, [1, 6, 11, 0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12])]
    #[case(32, [5, 8, 11, 14, 1, 4, 7, 10, 13, 0, 3, 6, 9, 12, 15, 2])]
    #[case(48, [0, 7, 14, 5, 12, 3, 10, 1, 8, 15, 6, 13, 4, 11, 2, 9])]
    fn test_message_index_permutation(#[case] first_step: usize, #[case] expected: [usize; 16]) {
        let result: Vec<usize> = (first_step..first_step + 16).map(message_index).collect();
        assert_eq!(result, expected);
    }

    // Example values taken from https://rosettacode.org/wiki/MD5/Implementation_Debug
    #[rstest]
    #[case(1, [0xa5202774, 0xefcdab89, 0x98badcfe, 0x10325476])]
    #[case(2, [0xa5202774, 0xefcdab89, 0x98badcfe, 0xf59592dd])]
    #[case(3, [0xa5202774, 0xefcdab89, 0xe7f06b23, 0xf59592dd])]
    #[case(4, [0xa5202774, 0x1b163203, 0xe7f06b23, 0xf59592dd])]
    #[case(5, [0x32033344, 0x1b163203, 0xe7f06b23, 0xf59592dd])]
    #[case(6, [0x32033344, 0x1b163203, 0xe7f06b23, 0x2f35d494])]
    #[case(7, [0x32033344, 0x1b163203, 0xf5b158db, 0x2f35d494])]
    #[case(8, [0x32033344, 0x9bc13ce9, 0xf5b158db, 0x2f35d494])]
    #[case(12, [0x3893b991, 0x70768a29, 0xe1ef0576, 0xfce4a312])]
    #[case(16, [0xf56c7cf1, 0xd6819c6a, 0x5aa53f75, 0x374943a7])]
    #[case(20, [0x1c7d7513, 0xbd782e17, 0xc095f13a, 0x7bd57a3a])]
    #[case(24, [0x3d1e3e6c, 0xe422531a, 0xeb41643e, 0x68b7b3e3])]
    #[case(64, [0x7246fad3, 0x14e45506, 0xff4ea3eb, 0x6e10a476])]
    fn test_advance_empty_message(#[case] steps: usize, #[case] expected: [u32; 4]) {
        let mut instance = DigestState::default();
        for step in 0..steps {
            instance = instance.advance_step(&EMPTY_MESSAGE_BLOCK, step);
        }
        assert_eq!(instance.words, expected);
        assert_eq!(instance.processed_bytes(), 0);
    }

    #[test]
    fn test_process_chunk_feeds_forward() {
        let mut chunk = Chunk::default();
        chunk[0] = 0x80;
        let instance = DigestState::default().process_chunk(&chunk);
        assert_eq!(
            instance.words,
            [0xd98c1dd4, 0x04b2008f, 0x980980e9, 0x7e42f8ec]
        );
        assert_eq!(instance.processed_bytes(), CHUNK_SIZE_BYTES as u64);
    }

    #[test]
    fn test_to_raw_is_little_endian() {
        let raw = DigestState::default().to_raw();
        assert_eq!(&raw[..4], &[0x01, 0x23, 0x45, 0x67]);
        assert_eq!(&raw[12..], &[0x76, 0x54, 0x32, 0x10]);
    }

    #[test]
    fn test_display() {
        let rendered = DigestState::default().to_string();
        assert_eq!(
            rendered,
            "DigestState { a: 67452301, b: efcdab89, c: 98badcfe, d: 10325476, processed: 0 }"
        );
    }
}
