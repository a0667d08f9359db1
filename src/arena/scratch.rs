/// Stack of scratch bit ranges reused across builds.
///
/// A traversal reserves a range with [`ScratchBits::frame`], works on it,
/// and releases it by dropping the frame. Further ranges can only be
/// reserved *through* the live frame ([`ScratchFrame::push`]), which
/// borrows it mutably, so scratch regions always nest in strict LIFO order.
/// Two sibling regions can never be live at the same time.
#[derive(Debug, Default)]
pub struct ScratchBits {
    words: Vec<u64>,
    top: usize,
}

impl ScratchBits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `len` cleared bits on top of the stack.
    pub fn frame(&mut self, len: usize) -> ScratchFrame<'_> {
        let base = self.top;
        self.top += len;
        let needed = self.top.div_ceil(64);
        if self.words.len() < needed {
            self.words.resize(needed, 0);
        }
        for bit in base..self.top {
            self.words[bit / 64] &= !(1u64 << (bit % 64));
        }
        ScratchFrame {
            bits: self,
            base,
            len,
        }
    }

    /// Number of bits currently reserved by live frames.
    #[must_use]
    pub fn in_use(&self) -> usize {
        self.top
    }
}

/// A reserved range of scratch bits, released on drop.
#[derive(Debug)]
pub struct ScratchFrame<'a> {
    bits: &'a mut ScratchBits,
    base: usize,
    len: usize,
}

impl ScratchFrame<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "scratch bit {index} out of {}", self.len);
        let bit = self.base + index;
        self.bits.words[bit / 64] & (1u64 << (bit % 64)) != 0
    }

    pub fn set(&mut self, index: usize) {
        debug_assert!(index < self.len, "scratch bit {index} out of {}", self.len);
        let bit = self.base + index;
        self.bits.words[bit / 64] |= 1u64 << (bit % 64);
    }

    /// Reserves a nested range above this one.
    pub fn push(&mut self, len: usize) -> ScratchFrame<'_> {
        self.bits.frame(len)
    }
}

impl Drop for ScratchFrame<'_> {
    fn drop(&mut self) {
        self.bits.top = self.base;
    }
}
