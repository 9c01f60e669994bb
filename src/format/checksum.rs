/// Initial accumulator state (the FNV offset basis)
pub const CHECKSUM_SEED: u32 = 2_166_136_261;

/// Per-byte multiplier (the 32-bit FNV prime)
pub const CHECKSUM_PRIME: u32 = 16_777_619;

/// Rolling 32-bit checksum over the sample data region
///
/// Each byte multiplies the state by [`CHECKSUM_PRIME`] and then XORs the
/// byte in, wrapping at 32 bits. This is the exact update the firmware runs
/// over the payload when it copies a file into flash, so the order of bytes
/// fed in must match the order they are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Checksum {
    state: u32,
}

impl Checksum {
    pub fn new() -> Self {
        Self {
            state: CHECKSUM_SEED,
        }
    }

    /// Resume from a previously captured state
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// The accumulator after absorbing one more byte
    #[inline]
    pub fn advanced(self, byte: u8) -> Self {
        Self {
            state: self.state.wrapping_mul(CHECKSUM_PRIME) ^ u32::from(byte),
        }
    }

    /// Absorb a run of bytes in order
    pub fn update(&mut self, bytes: &[u8]) {
        *self = bytes.iter().fold(*self, |acc, &byte| acc.advanced(byte));
    }

    pub fn value(self) -> u32 {
        self.state
    }

    /// Checksum of a complete byte slice
    pub fn of(bytes: &[u8]) -> u32 {
        let mut checksum = Self::new();
        checksum.update(bytes);
        checksum.value()
    }
}

impl Default for Checksum {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_keeps_seed() {
        assert_eq!(Checksum::of(&[]), CHECKSUM_SEED);
        assert_eq!(Checksum::new().value(), 0x811C_9DC5);
    }

    #[test]
    fn test_known_values() {
        assert_eq!(Checksum::of(b"a"), 0x050C_5D7E);
        assert_eq!(Checksum::of(&[0, 1, 2, 3]), 0x2793_7DD1);
    }

    #[test]
    fn test_chunked_update_matches_single_pass() {
        let data: Vec<u8> = (0..=255u8).cycle().take(5000).collect();

        let mut chunked = Checksum::new();
        for chunk in data.chunks(333) {
            chunked.update(chunk);
        }

        assert_eq!(chunked.value(), Checksum::of(&data));
    }

    #[test]
    fn test_advance_replay() {
        let replayed = [0u8, 1, 2, 3]
            .iter()
            .fold(Checksum::new(), |acc, &b| acc.advanced(b));
        assert_eq!(replayed.value(), 0x2793_7DD1);

        // Resuming from a captured state continues the same stream
        let half = Checksum::new().advanced(0).advanced(1);
        let resumed = Checksum::from_state(half.value()).advanced(2).advanced(3);
        assert_eq!(resumed, replayed);
    }
}
