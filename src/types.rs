//! Fixed-width value types shared by the controller and the host side

use std::fmt;
use std::ops::Range;

/// 8-bit value on the data bus
pub type Byte = u8;

/// 16-bit value on the address bus
pub type Word = u16;

/// Address of the width byte
pub const WIDTH_ADDR: Word = 0;

/// Address of the height byte
pub const HEIGHT_ADDR: Word = 1;

/// Size of the image header (width, height)
pub const HEADER_LEN: Word = 2;

/// First address of the original pixels
pub const PIXEL_BASE: Word = HEADER_LEN;

/// Bytes addressable through a 16-bit pointer
pub const MEMORY_SIZE: usize = 1 << 16;

const DELTA_MASK: u16 = 0x1FF;

/// Image dimensions as stored in the two header bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: Byte,
    pub height: Byte,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: Byte, height: Byte) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// End-of-image address, `width * height + 2`, wrapped to 16 bits
    #[inline]
    #[must_use]
    pub fn end_address(&self) -> Word {
        Word::from(self.width)
            .wrapping_mul(Word::from(self.height))
            .wrapping_add(HEADER_LEN)
    }

    /// Addresses of the original pixels
    #[must_use]
    pub fn input_range(&self) -> Range<usize> {
        let base = usize::from(PIXEL_BASE);
        base..base + self.pixel_count()
    }

    /// Addresses the stretched pixels are written to
    #[must_use]
    pub fn output_range(&self) -> Range<usize> {
        let base = usize::from(PIXEL_BASE) + self.pixel_count();
        base..base + self.pixel_count()
    }

    /// Bytes of memory a full pass touches (header, input, output)
    #[inline]
    #[must_use]
    pub fn footprint(&self) -> usize {
        usize::from(HEADER_LEN) + 2 * self.pixel_count()
    }

    #[inline]
    #[must_use]
    pub fn fits_memory(&self) -> bool {
        self.footprint() <= MEMORY_SIZE
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{width}x{height}", width = self.width, height = self.height)
    }
}

/// Observed dynamic range plus one, held in 9 bits so that 256 is representable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Delta(u16);

impl Delta {
    /// `max - min + 1`, wrapped to 9 bits
    #[inline]
    #[must_use]
    pub fn from_range(max: Byte, min: Byte) -> Self {
        let raw = u16::from(max)
            .wrapping_sub(u16::from(min))
            .wrapping_add(1);
        Self(raw & DELTA_MASK)
    }

    #[inline]
    #[must_use]
    pub fn new(raw: u16) -> Self {
        Self(raw & DELTA_MASK)
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Left-shift applied to every pixel during the write phase, range [0, 8]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShiftLevel(u8);

impl ShiftLevel {
    pub const MAX: Self = Self(8);

    /// Returns `None` for values outside [0, 8]
    #[must_use]
    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX.0).then_some(Self(level))
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    pub(crate) const fn from_band(level: u8) -> Self {
        Self(level)
    }
}

impl fmt::Display for ShiftLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
