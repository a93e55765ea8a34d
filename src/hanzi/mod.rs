//! Random Simplified-Chinese text built from GB2312 row/cell positions.
//!
//! A character is synthesised as four hex nibbles. The first two form the
//! high byte (`0xB0..=0xD6`, rows 16-54 of the level-one hanzi block, where
//! row 55 is left out because it is only partly assigned). The last two form
//! the low byte (`0xA1..=0xFE`), skipping the unassigned cells `0xA0` and
//! `0xFF`. Every pair drawn this way is an assigned character, so decoding
//! cannot fail for tables that agree with GB2312.

pub mod codec;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::errors::{Result, SampleError};

pub use codec::{EncodingRsCodec, LegacyCodec};

const ROW_NIBBLE_FIRST: u8 = 0xB;
const ROW_NIBBLE_LAST: u8 = 0xD;
/// Row nibble `0xD` only reaches `0xD6`.
const LAST_ROW_CELL_NIBBLE_MAX: u8 = 0x6;
const CELL_NIBBLE_FIRST: u8 = 0xA;
const CELL_NIBBLE_LAST: u8 = 0xF;

/// The two raw bytes of one legacy double-byte character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodePointPair {
    high: u8,
    low: u8,
}

impl CodePointPair {
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let r1 = rng.gen_range(ROW_NIBBLE_FIRST..=ROW_NIBBLE_LAST);
        let r2 = if r1 == ROW_NIBBLE_LAST {
            rng.gen_range(0..=LAST_ROW_CELL_NIBBLE_MAX)
        } else {
            rng.gen_range(0..=0xF)
        };

        let r3 = rng.gen_range(CELL_NIBBLE_FIRST..=CELL_NIBBLE_LAST);
        let r4 = match r3 {
            CELL_NIBBLE_FIRST => rng.gen_range(0x1..=0xF),
            CELL_NIBBLE_LAST => rng.gen_range(0x0..=0xE),
            _ => rng.gen_range(0x0..=0xF),
        };

        Self {
            high: (r1 << 4) | r2,
            low: (r3 << 4) | r4,
        }
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn as_bytes(&self) -> [u8; 2] {
        [self.high, self.low]
    }
}

/// Reject a negative length before any work is done.
pub fn checked_length(length: i64) -> Result<usize> {
    usize::try_from(length)
        .map_err(|_| SampleError::InvalidArgument(format!("length must be non-negative, got {length}")))
}

/// Generate `length` characters with a freshly seeded generator.
pub fn generate(length: usize) -> Result<String> {
    HanziGenerator::new()?.generate(length)
}

#[derive(Debug)]
pub struct HanziGenerator<C = EncodingRsCodec, R = StdRng> {
    codec: C,
    rng: R,
}

impl HanziGenerator {
    /// GB2312 codec and a generator seeded once from OS entropy.
    pub fn new() -> Result<Self> {
        Ok(Self::with_parts(EncodingRsCodec::gb2312()?, StdRng::from_entropy()))
    }
}

impl<C: LegacyCodec, R: Rng> HanziGenerator<C, R> {
    pub fn with_parts(codec: C, rng: R) -> Self {
        Self { codec, rng }
    }

    /// Random source shared with callers that need extra draws (ages, flags)
    /// alongside the generated text.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn generate(&mut self, length: usize) -> Result<String> {
        if length == 0 {
            return Ok(String::new());
        }

        let mut text = String::with_capacity(length * 3);
        for _ in 0..length {
            let pair = CodePointPair::draw(&mut self.rng);
            text.push(self.codec.decode(pair.as_bytes())?);
        }

        let utf8 = self.codec.transcode_to_utf8(&text)?;
        let out = String::from_utf8(utf8)?;
        debug!("generated {length} characters via {}", self.codec.name());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> HanziGenerator {
        HanziGenerator::with_parts(EncodingRsCodec::gb2312().unwrap(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn zero_length_is_empty() {
        assert_eq!(seeded(1).generate(0).unwrap(), "");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut generator = seeded(7);
        for len in [1usize, 2, 5, 64] {
            let s = generator.generate(len).unwrap();
            assert_eq!(s.chars().count(), len);
            assert_eq!(s.len(), len * 3);
        }
    }

    #[test]
    fn same_seed_same_text() {
        assert_eq!(seeded(42).generate(16).unwrap(), seeded(42).generate(16).unwrap());
    }

    #[test]
    fn negative_length_rejected() {
        assert!(matches!(checked_length(-1), Err(SampleError::InvalidArgument(_))));
        assert_eq!(checked_length(0).unwrap(), 0);
        assert_eq!(checked_length(5).unwrap(), 5);
    }

    #[test]
    fn pair_bytes_stay_in_level_one_block() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20_000 {
            let pair = CodePointPair::draw(&mut rng);
            assert!((0xB0..=0xD6).contains(&pair.high()), "high {:#x}", pair.high());
            assert!((0xA1..=0xFE).contains(&pair.low()), "low {:#x}", pair.low());
        }
    }

    struct RejectingCodec;

    impl LegacyCodec for RejectingCodec {
        fn name(&self) -> &'static str {
            "rejecting"
        }

        fn decode(&self, pair: [u8; 2]) -> Result<char> {
            Err(SampleError::Unmapped {
                encoding: "rejecting",
                high: pair[0],
                low: pair[1],
            })
        }

        fn transcode_to_utf8(&self, text: &str) -> Result<Vec<u8>> {
            Ok(text.as_bytes().to_vec())
        }
    }

    #[test]
    fn codec_failure_surfaces_unchanged() {
        let mut generator = HanziGenerator::with_parts(RejectingCodec, StdRng::seed_from_u64(0));
        assert!(matches!(generator.generate(1), Err(SampleError::Unmapped { .. })));
        // Zero length never touches the codec.
        assert_eq!(generator.generate(0).unwrap(), "");
    }
}
