use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::key::EntryKey;

/// Produces fresh [`EntryKey`]s from an entropy source.
///
/// Each key carries 122 random bits (a UUIDv4 minus its version and variant
/// markers). Generation never fails: an entropy source that cannot deliver
/// bytes panics inside `fill_bytes`, which is treated as a fatal
/// environment problem rather than a per-call error.
#[derive(Debug)]
pub struct KeyGenerator<R = OsRng> {
    rng: R,
}

impl KeyGenerator<OsRng> {
    /// Generator backed by the operating system's CSPRNG.
    pub fn os() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for KeyGenerator<OsRng> {
    fn default() -> Self {
        Self::os()
    }
}

impl<R: RngCore + CryptoRng> KeyGenerator<R> {
    /// Generator over a caller-supplied RNG (seeded RNGs make tests deterministic).
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Mint a new key.
    pub fn generate(&mut self) -> EntryKey {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
        EntryKey::from_canonical(uuid.hyphenated().to_string())
    }
}
