//! Boundary signals sampled and driven once per tick

use crate::types::{Byte, Word};

/// Inputs sampled at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inputs {
    pub reset: bool,
    pub start: bool,
    /// Byte at the address driven during the previous tick
    pub data_in: Byte,
}

impl Inputs {
    #[must_use]
    pub fn new(reset: bool, start: bool, data_in: Byte) -> Self {
        Self {
            reset,
            start,
            data_in,
        }
    }
}

/// Which pointer owns the shared address bus this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusPhase {
    Read(Word),
    Write(Word),
}

impl BusPhase {
    /// Select the phase from the write-mode flag
    #[inline]
    #[must_use]
    pub fn select(write_mode: bool, read_ptr: Word, write_ptr: Word) -> Self {
        if write_mode {
            Self::Write(write_ptr)
        } else {
            Self::Read(read_ptr)
        }
    }

    /// Resolve the phase into the single address output
    #[inline]
    #[must_use]
    pub fn address(&self) -> Word {
        match *self {
            Self::Read(ptr) | Self::Write(ptr) => ptr,
        }
    }
}

/// Outputs driven for the tick that just ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outputs {
    pub phase: BusPhase,
    pub done: bool,
    pub enable: bool,
    pub write_enable: bool,
    pub data_out: Byte,
}

impl Outputs {
    #[inline]
    #[must_use]
    pub fn address(&self) -> Word {
        self.phase.address()
    }

    /// True when the memory should store `data_out` at `address`
    #[inline]
    #[must_use]
    pub fn is_write(&self) -> bool {
        self.enable && self.write_enable
    }
}

impl Default for Outputs {
    fn default() -> Self {
        Self {
            phase: BusPhase::Read(0),
            done: false,
            enable: false,
            write_enable: false,
            data_out: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_selects_pointer() {
        assert_eq!(BusPhase::select(false, 5, 900), BusPhase::Read(5));
        assert_eq!(BusPhase::select(true, 5, 900), BusPhase::Write(900));
        assert_eq!(BusPhase::Write(900).address(), 900);
        assert_eq!(BusPhase::Read(5).address(), 5);
    }

    #[test]
    fn test_write_needs_both_lines() {
        let mut out = Outputs::default();
        out.write_enable = true;
        assert!(!out.is_write());
        out.enable = true;
        assert!(out.is_write());
    }
}
