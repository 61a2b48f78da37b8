//! External memory
//!
//! The controller sees memory through a narrow contract: it drives an
//! address, enable, write-enable and data byte after each tick, and the byte
//! stored at that address comes back on `data_in` during the next tick.
//! [`MemoryPort`] enforces that one-tick latency on top of any [`MemoryBus`].

use crate::controller::Outputs;
use crate::types::{Byte, Dimensions, HEIGHT_ADDR, MEMORY_SIZE, PIXEL_BASE, WIDTH_ADDR, Word};
use std::ops::Range;

/// Byte-addressable store behind the controller's address bus
pub trait MemoryBus {
    /// Read a byte from the given address
    fn read(&self, address: Word) -> Byte;

    /// Write a byte to the given address
    fn write(&mut self, address: Word, value: Byte);
}

/// Flat 64 KiB store covering the whole 16-bit address space
#[derive(Debug, Clone)]
pub struct Ram {
    bytes: Box<[Byte]>,
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}

impl Ram {
    /// Create a new RAM with all memory zeroed
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }

    /// Create a RAM holding an image laid out as header followed by pixels.
    ///
    /// Pixels beyond the address space are dropped; callers check
    /// [`Dimensions::fits_memory`] first.
    #[must_use]
    pub fn with_image(dimensions: Dimensions, pixels: &[Byte]) -> Self {
        let mut ram = Self::new();
        ram.load_image(dimensions, pixels);
        ram
    }

    pub fn load_image(&mut self, dimensions: Dimensions, pixels: &[Byte]) {
        self.bytes[usize::from(WIDTH_ADDR)] = dimensions.width;
        self.bytes[usize::from(HEIGHT_ADDR)] = dimensions.height;

        let base = usize::from(PIXEL_BASE);
        let len = pixels.len().min(MEMORY_SIZE - base);
        self.bytes[base..base + len].copy_from_slice(&pixels[..len]);
    }

    /// Bytes in `range`, clipped to the address space
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> &[Byte] {
        let end = range.end.min(MEMORY_SIZE);
        let start = range.start.min(end);
        &self.bytes[start..end]
    }

    /// Header dimensions as currently stored
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(
            self.bytes[usize::from(WIDTH_ADDR)],
            self.bytes[usize::from(HEIGHT_ADDR)],
        )
    }
}

impl MemoryBus for Ram {
    #[inline]
    fn read(&self, address: Word) -> Byte {
        self.bytes[usize::from(address)]
    }

    #[inline]
    fn write(&mut self, address: Word, value: Byte) {
        self.bytes[usize::from(address)] = value;
    }
}

/// One-tick latency wrapper between the controller and a [`MemoryBus`]
#[derive(Debug, Clone)]
pub struct MemoryPort<M> {
    bus: M,
    latched: Byte,
    writes: u64,
}

impl<M: MemoryBus> MemoryPort<M> {
    pub fn new(bus: M) -> Self {
        let latched = bus.read(0);
        Self {
            bus,
            latched,
            writes: 0,
        }
    }

    /// Byte for the address driven during the previous tick
    #[inline]
    #[must_use]
    pub fn data(&self) -> Byte {
        self.latched
    }

    /// Apply the controller's outputs at the end of a tick.
    ///
    /// A write lands when both enable and write-enable are set. The read is
    /// free-running: the byte at the driven address, after any write, is
    /// latched for the next tick.
    pub fn clock(&mut self, outputs: &Outputs) {
        let address = outputs.address();
        if outputs.is_write() {
            self.bus.write(address, outputs.data_out);
            self.writes += 1;
        }
        self.latched = self.bus.read(address);
    }

    /// Writes performed since creation
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    #[must_use]
    pub fn bus(&self) -> &M {
        &self.bus
    }
}
