//! Set-bit iteration shared by the [`BitSet`][super::BitSet] iterators.
//!
//! Walks a stream of [`Word`]s and yields the index of every set bit, skipping zero words whole.

use std::marker::PhantomData;

use super::{BitValue, Word};

pub struct IterImpl<V: BitValue, N> {
    words: N,
    word: Word,
    bits_left: u32,     // unconsumed bits in `word`
    base_index: usize,  // element index of the lowest unconsumed bit in `word`
    _p: PhantomData<V>,
}

impl<V: BitValue, N: Clone> Clone for IterImpl<V, N> {
    fn clone(&self) -> Self {
        Self {
            words: self.words.clone(),
            word: self.word,
            bits_left: self.bits_left,
            base_index: self.base_index,
            _p: PhantomData,
        }
    }
}

impl<V: BitValue, N> IterImpl<V, N> {
    pub fn new(words: N) -> Self {
        Self {
            words,
            word: 0,
            bits_left: 0,
            base_index: 0,
            _p: PhantomData,
        }
    }
}

impl<V: BitValue, N: Iterator<Item = Word>> Iterator for IterImpl<V, N> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.word == 0 {
            // Nothing left in the current word; account for its remaining bits.
            self.base_index += self.bits_left as usize;
            self.bits_left = 0;

            loop {
                self.word = self.words.next()?;
                if self.word != 0 {
                    break;
                }
                self.base_index += Word::BITS as usize;
            }
            self.bits_left = Word::BITS;
        }

        let zeroes = self.word.trailing_zeros();
        debug_assert_ne!(zeroes, Word::BITS);
        let index = self.base_index + zeroes as usize;

        // Two shifts, since shifting by `Word::BITS` at once would overflow.
        self.word >>= zeroes;
        self.word >>= 1;
        self.base_index += zeroes as usize + 1;
        self.bits_left -= zeroes + 1;

        Some(V::from_index(index))
    }
}
