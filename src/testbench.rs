//! Clock driver wiring the controller to a memory
//!
//! The testbench plays the host environment: it owns the start and reset
//! lines, counts ticks, and moves bytes between the controller and the
//! memory with the one-tick latency the controller expects.

use crate::controller::{Controller, Inputs, Outputs, State};
use crate::error::SimError;
use crate::memory::{MemoryBus, MemoryPort};
use crate::types::{Byte, Delta, Dimensions, HEIGHT_ADDR, ShiftLevel, WIDTH_ADDR, Word};

/// Default tick budget for one pass
pub const DEFAULT_MAX_TICKS: u64 = 1_000_000;

/// What one completed pass looked like from the outside
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub dimensions: Dimensions,
    pub max: Byte,
    pub min: Byte,
    pub delta: Delta,
    pub shift: ShiftLevel,
    pub end_address: Word,
    /// Ticks from the first start tick until done was seen
    pub ticks_to_done: u64,
    /// Ticks including the one that returned the controller to idle
    pub ticks: u64,
    pub writes: u64,
}

pub struct Testbench<M> {
    controller: Controller,
    port: MemoryPort<M>,
    ticks: u64,
    trace: bool,
}

impl<M: MemoryBus> Testbench<M> {
    pub fn new(memory: M) -> Self {
        Self {
            controller: Controller::new(),
            port: MemoryPort::new(memory),
            ticks: 0,
            trace: false,
        }
    }

    /// Print one line per tick to stdout
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    #[must_use]
    pub fn memory(&self) -> &M {
        self.port.bus()
    }

    /// Advance one tick with the given control lines
    pub fn step(&mut self, start: bool, reset: bool) -> Outputs {
        let inputs = Inputs::new(reset, start, self.port.data());
        let outputs = self.controller.tick(inputs);
        self.port.clock(&outputs);
        self.ticks += 1;

        if self.trace {
            print_trace_line(self.ticks, &inputs, self.controller.state(), &outputs);
        }
        outputs
    }

    /// Hold reset for one tick
    pub fn reset(&mut self) -> Outputs {
        self.step(false, true)
    }

    /// Run one pass: hold start until done, then release it so the
    /// controller returns to idle.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotIdle`] if a previous pass was left unfinished
    /// or still holds done, and [`SimError::TickBudgetExhausted`] if done is
    /// not seen within `max_ticks` ticks.
    pub fn run_pass(&mut self, max_ticks: u64) -> Result<PassReport, SimError> {
        if !self.is_idle() {
            return Err(SimError::NotIdle(self.controller.state()));
        }

        let started_at = self.ticks;
        let writes_before = self.port.writes();

        loop {
            if self.ticks - started_at >= max_ticks {
                return Err(SimError::TickBudgetExhausted {
                    ticks: max_ticks,
                    state: self.controller.state(),
                });
            }
            if self.step(true, false).done {
                break;
            }
        }

        let ticks_to_done = self.ticks - started_at;
        let ctrl = &self.controller;
        let (max, min) = (ctrl.max(), ctrl.min());
        let shift = ctrl.shift_level();
        let end_address = ctrl.end_address();

        self.step(false, false);

        let memory = self.port.bus();
        Ok(PassReport {
            dimensions: Dimensions::new(memory.read(WIDTH_ADDR), memory.read(HEIGHT_ADDR)),
            max,
            min,
            delta: Delta::from_range(max, min),
            shift,
            end_address,
            ticks_to_done,
            ticks: self.ticks - started_at,
            writes: self.port.writes() - writes_before,
        })
    }

    /// Bytes of the output region for the image currently in memory
    #[must_use]
    pub fn output_pixels(&self) -> Vec<Byte> {
        let memory = self.port.bus();
        let dims = Dimensions::new(memory.read(WIDTH_ADDR), memory.read(HEIGHT_ADDR));
        // Addresses past 0xFFFF wrap the same way the write pointer does
        dims.output_range()
            .map(|addr| memory.read(addr as Word))
            .collect()
    }

    /// True when the controller is idle and not signalling done
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.controller.state() == State::Idle && !self.controller.outputs().done
    }
}

fn print_trace_line(tick: u64, inputs: &Inputs, state: State, outputs: &Outputs) {
    println!(
        "{tick:>8} {state:<14} in={data_in:02X} addr={addr:04X} en={en} we={we} out={out:02X} done={done}",
        data_in = inputs.data_in,
        addr = outputs.address(),
        en = u8::from(outputs.enable),
        we = u8::from(outputs.write_enable),
        out = outputs.data_out,
        done = u8::from(outputs.done),
    );
}
