use crate::rng::splitmix64;

const SEED: u64 = 0xA2_0100_5EED_F00D;

#[inline]
fn mix(h: &mut u64, x: u64) {
    *h = splitmix64(*h ^ x);
}

/// 64-bit hash of a byte string, folded 8 bytes at a time.
///
/// Deterministic across runs and platforms, unlike `DefaultHasher`.
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut h = SEED;
    let mut chunks = bytes.chunks_exact(8);
    for c in &mut chunks {
        let mut w = [0u8; 8];
        w.copy_from_slice(c);
        mix(&mut h, u64::from_le_bytes(w));
    }
    let rest = chunks.remainder();
    let mut w = [0u8; 8];
    w[..rest.len()].copy_from_slice(rest);
    mix(&mut h, u64::from_le_bytes(w));
    // length keeps zero-padded tails distinct
    mix(&mut h, bytes.len() as u64);
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_and_sensitive() {
        let a = hash_bytes(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(a, hash_bytes(&[1, 2, 3, 4, 5, 6, 7, 8, 9]));
        assert_ne!(a, hash_bytes(&[1, 2, 3, 4, 5, 6, 7, 8, 10]));
        assert_ne!(hash_bytes(&[0]), hash_bytes(&[0, 0]));
    }
}
