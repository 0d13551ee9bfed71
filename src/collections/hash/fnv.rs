use std::hash::{BuildHasher, Hasher};

const OFFSET_BASIS: u32 = 2_166_136_261;
const PRIME: u32 = 16_777_619;

/// The 32-bit FNV-1a hash. Fast and deterministic for short keys such as identifiers, but with no
/// resistance to deliberately colliding input.
///
/// [`Hash`](std::hash::Hash) implementations may write more than the raw bytes of a value (`str`
/// appends a `0xff` terminator), so `Fnv1a` only matches reference FNV-1a values when fed through
/// [`Hasher::write`] directly.
///
/// # Examples
/// ```
/// # use bricks::collections::hash::Fnv1a;
/// # use std::hash::Hasher;
/// let mut hasher = Fnv1a::new();
/// hasher.write(b"a");
/// assert_eq!(hasher.finish(), 0xe40c292c);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fnv1a {
    state: u32,
}

impl Fnv1a {
    /// Creates a hasher in the initial FNV-1a state.
    pub const fn new() -> Fnv1a {
        Fnv1a {
            state: OFFSET_BASIS,
        }
    }
}

impl Default for Fnv1a {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1a {
    fn finish(&self) -> u64 {
        self.state as u64
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.state ^= *byte as u32;
            self.state = self.state.wrapping_mul(PRIME);
        }
    }
}

/// A [`BuildHasher`] producing [`Fnv1a`] hashers, for use with
/// [`Table::with_hasher`](super::Table::with_hasher).
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildFnv1a;

impl BuildHasher for BuildFnv1a {
    type Hasher = Fnv1a;

    fn build_hasher(&self) -> Self::Hasher {
        Fnv1a::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fnv(bytes: &[u8]) -> u64 {
        let mut hasher = Fnv1a::new();
        hasher.write(bytes);
        hasher.finish()
    }

    #[test]
    fn test_reference_values() {
        assert_eq!(fnv(b""), 0x811c9dc5, "The empty input should hash to the offset basis.");
        assert_eq!(fnv(b"a"), 0xe40c292c);
        assert_eq!(fnv(b"foobar"), 0xbf9cf968);
    }

    #[test]
    fn test_builder_is_deterministic() {
        assert_eq!(
            BuildFnv1a.hash_one("key"),
            BuildFnv1a.hash_one("key"),
            "Separate hashers should agree on the same input."
        );
        assert_ne!(BuildFnv1a.hash_one("key"), BuildFnv1a.hash_one("kez"));
    }
}
