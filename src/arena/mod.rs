pub mod scratch;

pub use scratch::{ScratchBits, ScratchFrame};

use std::marker::PhantomData;
use std::ops::Range;

/// Index type handed out by an [`Arena`].
pub trait ArenaKey: Copy {
    /// Builds a key from a raw slot index.
    fn from_index(index: usize) -> Self;

    /// Returns the raw slot index.
    fn index(self) -> usize;
}

impl ArenaKey for usize {
    fn from_index(index: usize) -> Self {
        index
    }

    fn index(self) -> usize {
        self
    }
}

/// Declares a typed `u32` index usable as an [`ArenaKey`].
macro_rules! new_key_type {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $name(u32);

        impl $name {
            /// Raw index of this key.
            #[must_use]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl $crate::arena::ArenaKey for $name {
            fn from_index(index: usize) -> Self {
                Self($crate::arena::narrow(index))
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

pub(crate) use new_key_type;

/// Converts a slot index or length to the stored `u32`.
///
/// Arenas never hold more than `u32::MAX` records, so an index past that
/// saturates and never matches a live slot.
pub(crate) fn narrow(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// A contiguous run of records inside an [`Arena`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    start: u32,
    len: u32,
}

impl Span {
    fn new(start: usize, len: usize) -> Self {
        Self {
            start: narrow(start),
            len: narrow(len),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot indices covered by this span.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = self.start as usize;
        start..start + self.len as usize
    }

    /// A sub-run starting `offset` records into this span.
    ///
    /// The result is clamped to this span.
    #[must_use]
    pub fn sub(&self, offset: usize, len: usize) -> Self {
        let offset = offset.min(self.len());
        let len = len.min(self.len() - offset);
        Self::new(self.start as usize + offset, len)
    }
}

/// Linear pool of fixed-size records.
///
/// Records are only ever appended; there is no per-record free. `reset`
/// forgets every record at once and keeps the backing storage for the next
/// build. Records are `Copy`, so forgetting them runs no destructors.
#[derive(Debug)]
pub struct Arena<K, T> {
    items: Vec<T>,
    _key: PhantomData<fn() -> K>,
}

impl<K, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            _key: PhantomData,
        }
    }
}

impl<K: ArenaKey, T: Copy> Arena<K, T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            _key: PhantomData,
        }
    }

    /// Appends one record and returns its key.
    ///
    /// The arena holds at most `u32::MAX` records.
    pub fn alloc(&mut self, item: T) -> K {
        let key = K::from_index(self.items.len());
        self.items.push(item);
        debug_assert!(narrow(self.items.len()) < u32::MAX, "arena key space exhausted");
        key
    }

    /// Appends records contiguously and returns the run they occupy.
    pub fn alloc_span<I: IntoIterator<Item = T>>(&mut self, items: I) -> Span {
        let start = self.items.len();
        self.items.extend(items);
        debug_assert!(narrow(self.items.len()) < u32::MAX, "arena key space exhausted");
        Span::new(start, self.items.len() - start)
    }

    #[must_use]
    pub fn get(&self, key: K) -> Option<&T> {
        self.items.get(key.index())
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.items.get_mut(key.index())
    }

    /// Records covered by `span`, or an empty slice for a stale span.
    #[must_use]
    pub fn span(&self, span: Span) -> &[T] {
        self.items.get(span.range()).unwrap_or(&[])
    }

    /// Run of every record appended since the arena held `start` records.
    #[must_use]
    pub fn span_since(&self, start: usize) -> Span {
        let start = start.min(self.items.len());
        Span::new(start, self.items.len() - start)
    }

    /// Keys of the records covered by `span`.
    pub fn span_keys(&self, span: Span) -> impl Iterator<Item = K> {
        span.range().map(K::from_index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (K::from_index(i), item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut T)> {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(i, item)| (K::from_index(i), item))
    }

    /// Forgets every record. Keys and spans handed out before are stale.
    pub fn reset(&mut self) {
        self.items.clear();
    }
}
