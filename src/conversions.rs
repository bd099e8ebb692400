use crate::chunk::{Block, RawChunk, CHUNK_SIZE_WORDS};

pub fn le_bytes_to_words(source: &RawChunk) -> Block {
    let mut block: Block = [0; CHUNK_SIZE_WORDS];
    for (word, bytes) in block.iter_mut().zip(source.chunks_exact(4)) {
        *word = u8_to_u32(&[bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    block
}

pub fn u8_to_u32(source: &[u8; 4]) -> u32 {
    u32::from_le_bytes(*source)
}

/// Serializes the accumulators in order, each one as 4 little-endian bytes.
pub fn words_to_le_bytes(words: &[u32; 4]) -> [u8; 16] {
    let mut buffer: [u8; 16] = [0; 16];
    for (target, word) in buffer.chunks_exact_mut(4).zip(words.iter()) {
        target.copy_from_slice(&word.to_le_bytes());
    }
    buffer
}

/// Message length field appended by the padding: bits, modulo 2^64.
pub fn bit_length_to_le(byte_count: u64) -> [u8; 8] {
    byte_count.wrapping_mul(8).to_le_bytes()
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0x1fffffffffffffff, [0xf8, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff])]
    #[case(0x2000000000000000, [0; 8])]
    #[case(3, [0x18, 0, 0, 0, 0, 0, 0, 0])]
    #[case(0x0123456789abcdef >> 3, [0xe8, 0xcd, 0xab, 0x89, 0x67, 0x45, 0x23, 0x01])]
    fn test_bit_length_to_le(#[case] byte_count: u64, #[case] expected: [u8; 8]) {
        assert_eq!(bit_length_to_le(byte_count), expected);
    }

    #[rstest]
    #[case([0xff; 4], 0xffffffff)]
    #[case([0, 0, 0xff, 0xff], 0xffff0000)]
    #[case([0x67, 0x45, 0x23, 0x01], 0x01234567)]
    fn test_u8_to_u32(#[case] input: [u8; 4], #[case] expected: u32) {
        assert_eq!(u8_to_u32(&input), expected);
    }

    #[test]
    fn test_words_to_le_bytes() {
        let bytes = words_to_le_bytes(&[0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476]);
        assert_eq!(
            bytes,
            [
                0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76,
                0x54, 0x32, 0x10
            ]
        );
    }

    #[test]
    fn test_le_bytes_to_words() {
        let mut raw: RawChunk = [0; 64];
        raw[60..64].copy_from_slice(&[0x78, 0x56, 0x34, 0x12]);
        let block = le_bytes_to_words(&raw);
        assert_eq!(block[15], 0x12345678);
        assert!(block[..15].iter().all(|word| *word == 0));
    }
}
