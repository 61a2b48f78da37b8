//! Control states of the stretch controller

use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum State {
    #[default]
    Idle,
    ReadWidth,
    ComputeEnd,
    ScanMinMax,
    ComputeShift,
    ComputePixel,
    WaitWrite,
    Finished,
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "IDLE",
            Self::ReadWidth => "READ_WIDTH",
            Self::ComputeEnd => "COMPUTE_END",
            Self::ScanMinMax => "SCAN_MIN_MAX",
            Self::ComputeShift => "COMPUTE_SHIFT",
            Self::ComputePixel => "COMPUTE_PIXEL",
            Self::WaitWrite => "WAIT_WRITE",
            Self::Finished => "FINISHED",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(State::default(), State::Idle);
    }

    #[test]
    fn test_display() {
        assert_eq!(State::ComputePixel.to_string(), "COMPUTE_PIXEL");
        assert_eq!(State::Idle.to_string(), "IDLE");
        assert_eq!(format!("{:<6}|", State::Idle), "IDLE  |");
    }
}
