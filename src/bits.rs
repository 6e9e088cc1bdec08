//! A [`BitSet`] for capability bitmaps reported by `evdev`.
//!
//! `evdev` reports the event types a device supports, and the codes it supports for each type, as
//! bit sets. [`BitSet`] wraps that data so that callers can test single values or walk every set
//! bit without doing word/shift arithmetic themselves.

mod iter;

use sealed::Array;
pub(crate) use sealed::BitValueImpl;

use std::{ffi::c_ulong, fmt, slice};

mod sealed {
    use super::Word;

    pub trait BitValueImpl {
        #[doc(hidden)]
        type __PrivateArray: AsRef<[Word]>
            + AsMut<[Word]>
            + Copy
            + IntoIterator<Item = Word, IntoIter: Clone>;
        #[doc(hidden)]
        const __PRIVATE_ZERO: Self::__PrivateArray;

        // `index` must fit in the native integer type
        fn from_index(index: usize) -> Self;
        fn into_index(self) -> usize;
    }

    pub(crate) type Array<V> = <V as BitValueImpl>::__PrivateArray;
}

/// The underlying word type used by [`BitSet`]s.
///
/// This is an `unsigned long` in C, which is what the `EVIOCGBIT` ioctl writes.
pub type Word = c_ulong;

/// Types that can be stored in a [`BitSet`].
///
/// This is a sealed trait. It is implemented for [`EventType`] (the root capability bitmap) and
/// [`Code`] (the per-type code bitmaps).
///
/// [`EventType`]: crate::event::EventType
/// [`Code`]: crate::event::Code
pub trait BitValue: Copy + sealed::BitValueImpl {
    /// The largest value that can be stored in a [`BitSet`].
    const MAX: Self;
}

/// A set of `V`, stored as a bit set.
pub struct BitSet<V: BitValue> {
    pub(crate) words: Array<V>,
}

impl<V: BitValue> Copy for BitSet<V> {}
impl<V: BitValue> Clone for BitSet<V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<V: BitValue> Default for BitSet<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: BitValue> BitSet<V> {
    /// Creates an empty bit set.
    pub const fn new() -> Self {
        Self {
            words: V::__PRIVATE_ZERO,
        }
    }

    /// Returns a mutable reference to the underlying [`Word`]s, for ioctls to fill in.
    pub(crate) fn words_mut(&mut self) -> &mut [Word] {
        self.words.as_mut()
    }

    /// Returns the number of set bits.
    pub fn len(&self) -> usize {
        self.words
            .as_ref()
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum::<usize>()
    }

    /// Returns whether no bit is set.
    pub fn is_empty(&self) -> bool {
        self.words.as_ref().iter().all(|&w| w == 0)
    }

    /// Returns whether the bit for `value` is set.
    ///
    /// Values above [`BitValue::MAX`] are never contained.
    pub fn contains(&self, value: V) -> bool {
        let index = value.into_index();
        if index > V::MAX.into_index() {
            return false;
        }
        let wordpos = index / Word::BITS as usize;
        let bitpos = index % Word::BITS as usize;

        self.words.as_ref()[wordpos] & (1 << bitpos) != 0
    }

    /// Sets the bit for `value`.
    ///
    /// Returns `true` if `value` was newly inserted, or `false` if it was already present.
    ///
    /// # Panics
    ///
    /// Panics if `value` is larger than [`BitValue::MAX`].
    pub fn insert(&mut self, value: V) -> bool {
        assert!(
            value.into_index() <= V::MAX.into_index(),
            "value out of range for `BitSet` storage (value's index is {}, max is {})",
            value.into_index(),
            V::MAX.into_index(),
        );

        let present = self.contains(value);

        let index = value.into_index();
        let wordpos = index / Word::BITS as usize;
        let bitpos = index % Word::BITS as usize;
        self.words.as_mut()[wordpos] |= 1 << bitpos;
        !present
    }

    /// Clears the bit for `value`.
    ///
    /// Returns `true` if it was set.
    pub fn remove(&mut self, value: V) -> bool {
        if value.into_index() > V::MAX.into_index() {
            return false;
        }
        let present = self.contains(value);

        let index = value.into_index();
        let wordpos = index / Word::BITS as usize;
        let bitpos = index % Word::BITS as usize;
        self.words.as_mut()[wordpos] &= !(1 << bitpos);
        present
    }

    /// Returns an iterator over all set values, in ascending order.
    ///
    /// All-zero words are skipped without testing their bits individually.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            imp: iter::IterImpl::new(self.words.as_ref().iter().copied()),
        }
    }
}

impl<V: BitValue + fmt::Debug> fmt::Debug for BitSet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<V: BitValue> PartialEq for BitSet<V> {
    fn eq(&self, other: &Self) -> bool {
        self.words.as_ref() == other.words.as_ref()
    }
}
impl<V: BitValue> Eq for BitSet<V> {}

impl<V: BitValue> FromIterator<V> for BitSet<V> {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}
impl<V: BitValue> Extend<V> for BitSet<V> {
    fn extend<T: IntoIterator<Item = V>>(&mut self, iter: T) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, V: BitValue> IntoIterator for &'a BitSet<V> {
    type Item = V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the values stored in a [`BitSet`].
pub struct Iter<'a, V: BitValue> {
    imp: iter::IterImpl<V, std::iter::Copied<slice::Iter<'a, Word>>>,
}

impl<V: BitValue> Iterator for Iter<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.imp.next()
    }
}

impl<V: BitValue + fmt::Debug> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.imp.clone()).finish()
    }
}
