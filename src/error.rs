use crate::controller::State;
use crate::types::{Byte, Dimensions, MEMORY_SIZE};
use thiserror::Error;

/// Failures of the host-side harness around the controller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("controller did not signal done within {ticks} ticks (stuck in {state})")]
    TickBudgetExhausted { ticks: u64, state: State },

    #[error("controller is not idle (in {0}), a pass can only start from IDLE")]
    NotIdle(State),

    #[error("image is empty ({0})")]
    EmptyImage(Dimensions),

    #[error("image {width}x{height} does not fit the 8-bit width/height header")]
    HeaderOverflow { width: u32, height: u32 },

    #[error(
        "image {dimensions} needs {needed} bytes of memory, only {max} are addressable",
        max = MEMORY_SIZE
    )]
    ImageTooLarge { dimensions: Dimensions, needed: usize },
}

/// Error type for one input file, tagged by the stage that failed
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Input could not be opened or decoded as an image
    #[error("{0:#}")]
    LoadFailed(anyhow::Error),

    /// Image decoded but cannot be laid out in controller memory
    #[error(transparent)]
    Layout(SimError),

    /// Simulation did not complete
    #[error("simulation failed on pass {pass}: {error}")]
    SimulationFailed { pass: u32, error: SimError },

    /// Controller output disagrees with the reference model
    #[error("pixel {index} mismatch: expected {expected}, controller wrote {actual}")]
    Mismatch {
        index: usize,
        expected: Byte,
        actual: Byte,
    },

    /// Controller produced a different number of pixels than the image holds
    #[error("output has {actual} pixels, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Result could not be written
    #[error("{0:#}")]
    SaveFailed(anyhow::Error),

    /// Result ready but display failed
    #[error("{0:#}")]
    DisplayFailed(anyhow::Error),
}

impl ProcessError {
    /// True when the controller ran but produced something wrong
    #[must_use]
    pub fn is_simulation_fault(&self) -> bool {
        matches!(
            self,
            Self::SimulationFailed { .. } | Self::Mismatch { .. } | Self::LengthMismatch { .. }
        )
    }
}
