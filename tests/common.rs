#![allow(dead_code)]

use hstretch::memory::{MemoryBus, Ram};
use hstretch::testbench::Testbench;
use hstretch::types::{Byte, Dimensions, Word};
use std::cell::RefCell;

pub fn bench(width: Byte, height: Byte, pixels: &[Byte]) -> Testbench<Ram> {
    Testbench::new(Ram::with_image(Dimensions::new(width, height), pixels))
}

/// RAM that remembers every address written and read
#[derive(Default)]
pub struct RecordingRam {
    pub ram: Ram,
    pub writes: Vec<(Word, Byte)>,
    pub reads: RefCell<Vec<Word>>,
}

impl RecordingRam {
    pub fn with_image(width: Byte, height: Byte, pixels: &[Byte]) -> Self {
        Self {
            ram: Ram::with_image(Dimensions::new(width, height), pixels),
            ..Self::default()
        }
    }
}

impl MemoryBus for RecordingRam {
    fn read(&self, address: Word) -> Byte {
        self.reads.borrow_mut().push(address);
        self.ram.read(address)
    }

    fn write(&mut self, address: Word, value: Byte) {
        self.writes.push((address, value));
        self.ram.write(address, value);
    }
}
