use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Piece;

/// Draws new pieces uniformly at random.
///
/// Every draw is independent: there is no bag, so droughts and repeats happen.
///
/// # Example
///
/// ```
/// use tetris_engine::{PieceGenerator, PieceSeed};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
///
/// assert_eq!(a.draw(), b.draw());
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws a piece of a random kind at its spawn position.
    pub fn draw(&mut self) -> Piece {
        Piece::spawn(self.rng.random())
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed. Its text form, used by serde and by
/// [`FromStr`]/[`Display`](fmt::Display), is 32 hexadecimal digits.
///
/// # Example
///
/// ```
/// use tetris_engine::PieceSeed;
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let text = seed.to_string();
/// assert_eq!(text.parse::<PieceSeed>().unwrap(), seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PieceSeedParseError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid hex: {text} (non-hex character at index {index})")]
    InvalidDigit { text: String, index: usize },
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = PieceSeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(PieceSeedParseError::InvalidLength { len: s.len() });
        }
        // Every character must be a hex digit, so no sign prefix is accepted
        let num = s.char_indices().try_fold(0_u128, |num, (index, ch)| {
            ch.to_digit(16)
                .map(|digit| (num << 4) | u128::from(digit))
                .ok_or_else(|| PieceSeedParseError::InvalidDigit {
                    text: s.to_owned(),
                    index,
                })
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            // Big-endian: the first byte appears first in the hex string
            let seed = PieceSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_leading_zeros_are_kept() {
            let seed = PieceSeed::from_bytes([0; 16]);
            assert_eq!(seed.to_string(), "00000000000000000000000000000000");
        }

        #[test]
        fn test_parse_uppercase_hex() {
            let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed.as_bytes()[..2], [0x01, 0x23]);
        }

        #[test]
        fn test_error_invalid_hex_characters() {
            let json = "\"ghijklmnopqrstuvwxyzghijklmnopqr\""; // 32 chars but not hex
            let result: Result<PieceSeed, _> = serde_json::from_str(json);
            let err_msg = result.unwrap_err().to_string();
            assert!(err_msg.contains("invalid hex"));
        }

        #[test]
        fn test_error_sign_prefix() {
            for text in ["+123456789abcdef0123456789abcdef", "-123456789abcdef0123456789abcdef"] {
                let err = text.parse::<PieceSeed>().unwrap_err();
                assert_eq!(
                    err,
                    PieceSeedParseError::InvalidDigit {
                        text: text.to_owned(),
                        index: 0,
                    }
                );
            }
        }

        #[test]
        fn test_error_reports_first_bad_index() {
            let err = "0123456789abcdefXX23456789abcdef"
                .parse::<PieceSeed>()
                .unwrap_err();
            assert!(matches!(err, PieceSeedParseError::InvalidDigit { index: 16, .. }));
            assert!(err.to_string().contains("invalid hex"));
        }

        #[test]
        fn test_error_wrong_length() {
            for text in ["", "0123456789abcdef0123456789abcde", "0123456789abcdef0123456789abcdef0"] {
                let err = text.parse::<PieceSeed>().unwrap_err();
                assert_eq!(err, PieceSeedParseError::InvalidLength { len: text.len() });
                assert!(err.to_string().contains("invalid hex"));
            }
        }
    }

    mod generation {
        use super::*;

        const SEED: PieceSeed = PieceSeed::from_bytes([
            0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
            0x77, 0x88,
        ]);

        #[test]
        fn test_deterministic_piece_generation() {
            let mut generator1 = PieceGenerator::with_seed(SEED);
            let mut generator2 = PieceGenerator::with_seed(SEED);
            for _ in 0..50 {
                assert_eq!(generator1.draw(), generator2.draw());
            }
        }

        #[test]
        fn test_drawn_pieces_are_at_spawn() {
            let mut generator = PieceGenerator::with_seed(SEED);
            for _ in 0..50 {
                let piece = generator.draw();
                assert_eq!(piece, Piece::spawn(piece.kind()));
            }
        }

        #[test]
        fn test_clone_continues_same_sequence() {
            let mut generator = PieceGenerator::with_seed(SEED);
            let _ = generator.draw();
            let mut cloned = generator.clone();
            for _ in 0..20 {
                assert_eq!(generator.draw(), cloned.draw());
            }
        }
    }
}
