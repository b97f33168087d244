//! Word-packed atomic bitset.
//!
//! A dense alternative to `Vec<AtomicBool>`, used by [`crate::model::part`] to
//! guard each centroid part with a single bit instead of a full cache line.

use core::sync::atomic::Ordering;

use super::AtomicCounter;

/// A word-packed atomic bitset.
pub struct AtomicBitset {
    bits: usize,
    words: Vec<AtomicCounter>,
}

impl AtomicBitset {
    /// Creates a new bitset with `bits` bits, all cleared.
    pub fn new(bits: usize) -> Self {
        let word_bits = usize::BITS as usize;
        let words_len = bits.div_ceil(word_bits);
        let words = (0..words_len).map(|_| AtomicCounter::new(0)).collect();
        Self { bits, words }
    }

    /// Number of bits.
    pub fn len_bits(&self) -> usize {
        self.bits
    }

    /// Clears all bits.
    pub fn clear_all(&self) {
        for w in &self.words {
            w.store(0, Ordering::Relaxed);
        }
    }

    /// Returns whether `bit` is set.
    ///
    /// # Panics
    /// Panics if `bit >= len_bits()`.
    pub fn is_set(&self, bit: usize) -> bool {
        assert!(bit < self.bits);
        let (word, mask) = bit_word_mask(bit);
        (self.words[word].load(Ordering::Relaxed) & mask) != 0
    }

    /// Sets `bit` and returns `true` iff this call observed it previously cleared
    /// (i.e. this call "won" the race to acquire it).
    ///
    /// # Panics
    /// Panics if `bit >= len_bits()`.
    pub fn test_and_set(&self, bit: usize, order: Ordering) -> bool {
        assert!(bit < self.bits);
        let (word, mask) = bit_word_mask(bit);
        let prev = self.words[word].fetch_or(mask, order);
        (prev & mask) == 0
    }

    /// Clears `bit`, releasing it for the next acquirer.
    ///
    /// # Panics
    /// Panics if `bit >= len_bits()`.
    pub fn clear_bit(&self, bit: usize, order: Ordering) {
        assert!(bit < self.bits);
        let (word, mask) = bit_word_mask(bit);
        self.words[word].fetch_and(!mask, order);
    }
}

#[inline(always)]
fn bit_word_mask(bit: usize) -> (usize, usize) {
    // `usize::BITS` is always a power-of-two (32 or 64), so use shifts/masks.
    #[cfg(target_pointer_width = "64")]
    {
        let word = bit >> 6;
        let shift = bit & 63;
        return (word, 1usize << shift);
    }
    #[cfg(target_pointer_width = "32")]
    {
        let word = bit >> 5;
        let shift = bit & 31;
        return (word, 1usize << shift);
    }
}
