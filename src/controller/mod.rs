//! Tick-driven contrast stretch controller
//!
//! The controller reads a width byte, a height byte and `width * height`
//! pixels from an external memory, tracks the pixel range, and writes the
//! stretched pixels right after the original image. Everything happens one
//! clock tick at a time through [`Controller::tick`].
//!
//! Register updates computed during a tick are committed at its clock edge,
//! so the outputs returned by `tick` are the ones the memory sees before the
//! next tick. Data presented on `data_in` during tick N+1 belongs to the
//! address driven after tick N.

mod register;
mod signals;
mod state;

pub use register::{
    Deferred, DeferredRegister, Immediate, ImmediateRegister, Register, ResetPolicy,
};
pub use signals::{BusPhase, Inputs, Outputs};
pub use state::State;

use crate::stretch::{MAX_INIT, MIN_INIT, scale_pixel, shift_level};
use crate::types::{Byte, Delta, HEADER_LEN, PIXEL_BASE, ShiftLevel, Word};

#[derive(Debug, Clone)]
pub struct Controller {
    state: ImmediateRegister<State>,
    read_ptr: ImmediateRegister<Word>,
    write_ptr: ImmediateRegister<Word>,
    max: ImmediateRegister<Byte>,
    min: ImmediateRegister<Byte>,
    shift: ImmediateRegister<ShiftLevel>,

    // Output lines, re-driven from inactive every tick
    enable: ImmediateRegister<bool>,
    write_enable: ImmediateRegister<bool>,
    data_out: ImmediateRegister<Byte>,
    done: ImmediateRegister<bool>,

    // Feeds the multiplier in COMPUTE_END; reset lands one tick late
    end_address: DeferredRegister<Word>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    /// Create a controller in its reset state
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Register::new(State::Idle),
            read_ptr: Register::new(0),
            write_ptr: Register::new(0),
            max: Register::new(MAX_INIT),
            min: Register::new(MIN_INIT),
            shift: Register::new(ShiftLevel::default()),
            enable: Register::new(false),
            write_enable: Register::new(false),
            data_out: Register::new(0),
            done: Register::new(false),
            end_address: Register::new(0),
        }
    }

    /// Evaluate one clock tick and return the outputs driven after its edge
    pub fn tick(&mut self, inputs: Inputs) -> Outputs {
        if inputs.reset {
            self.observe_reset();
        } else {
            self.evaluate(inputs);
        }
        self.clock();
        self.outputs()
    }

    /// Outputs as a pure function of the committed registers
    #[must_use]
    pub fn outputs(&self) -> Outputs {
        Outputs {
            phase: BusPhase::select(
                self.write_enable.get(),
                self.read_ptr.get(),
                self.write_ptr.get(),
            ),
            done: self.done.get(),
            enable: self.enable.get(),
            write_enable: self.write_enable.get(),
            data_out: self.data_out.get(),
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> State {
        self.state.get()
    }

    #[inline]
    #[must_use]
    pub fn read_pointer(&self) -> Word {
        self.read_ptr.get()
    }

    #[inline]
    #[must_use]
    pub fn write_pointer(&self) -> Word {
        self.write_ptr.get()
    }

    #[inline]
    #[must_use]
    pub fn max(&self) -> Byte {
        self.max.get()
    }

    #[inline]
    #[must_use]
    pub fn min(&self) -> Byte {
        self.min.get()
    }

    #[inline]
    #[must_use]
    pub fn shift_level(&self) -> ShiftLevel {
        self.shift.get()
    }

    /// Committed end-of-image address
    #[inline]
    #[must_use]
    pub fn end_address(&self) -> Word {
        self.end_address.get()
    }

    fn observe_reset(&mut self) {
        self.state.reset();
        self.read_ptr.reset();
        self.write_ptr.reset();
        self.max.reset();
        self.min.reset();
        self.shift.reset();
        self.enable.reset();
        self.write_enable.reset();
        self.data_out.reset();
        self.done.reset();
        self.end_address.reset();
    }

    fn evaluate(&mut self, inputs: Inputs) {
        let Inputs { start, data_in, .. } = inputs;

        self.enable.set(false);
        self.write_enable.set(false);
        self.data_out.set(0);
        self.done.set(false);

        let read_ptr = self.read_ptr.get();
        let end = self.end_address.get();

        let next = match self.state.get() {
            State::Idle if start => {
                self.enable.set(true);
                self.read_ptr.set(0);
                self.max.set(MAX_INIT);
                self.min.set(MIN_INIT);
                State::ReadWidth
            }
            State::Idle => State::Idle,
            State::ReadWidth => {
                self.end_address.set(Word::from(data_in));
                self.read_ptr.set(read_ptr.wrapping_add(1));
                State::ComputeEnd
            }
            State::ComputeEnd => {
                // Only the low byte of the committed value carries the width
                let width = end & 0x00FF;
                self.end_address
                    .set(width.wrapping_mul(Word::from(data_in)).wrapping_add(HEADER_LEN));
                self.read_ptr.set(read_ptr.wrapping_add(1));
                State::ScanMinMax
            }
            State::ScanMinMax if read_ptr < end => {
                self.max.set(self.max.get().max(data_in));
                self.min.set(self.min.get().min(data_in));
                self.read_ptr.set(read_ptr.wrapping_add(1));
                State::ScanMinMax
            }
            State::ScanMinMax => State::ComputeShift,
            State::ComputeShift => {
                let delta = Delta::from_range(self.max.get(), self.min.get());
                self.shift.set(shift_level(delta));
                self.read_ptr.set(PIXEL_BASE);
                self.write_ptr.set(end);
                State::ComputePixel
            }
            State::ComputePixel if read_ptr < end => {
                self.data_out
                    .set(scale_pixel(data_in, self.min.get(), self.shift.get()));
                self.enable.set(true);
                self.write_enable.set(true);
                self.read_ptr.set(read_ptr.wrapping_add(1));
                State::WaitWrite
            }
            State::ComputePixel => State::Finished,
            State::WaitWrite => {
                self.write_ptr.set(self.write_ptr.get().wrapping_add(1));
                State::ComputePixel
            }
            State::Finished if start => {
                self.done.set(true);
                State::Finished
            }
            State::Finished => State::Idle,
        };

        self.state.set(next);
    }

    fn clock(&mut self) {
        self.state.clock();
        self.read_ptr.clock();
        self.write_ptr.clock();
        self.max.clock();
        self.min.clock();
        self.shift.clock();
        self.enable.clock();
        self.write_enable.clock();
        self.data_out.clock();
        self.done.clock();
        self.end_address.clock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ctrl: &mut Controller, start: bool, data_in: Byte) -> Outputs {
        ctrl.tick(Inputs::new(false, start, data_in))
    }

    /// Drive the controller through the header of a `width x height` image
    fn enter_scan(ctrl: &mut Controller, width: Byte, height: Byte) {
        run(ctrl, true, 0);
        run(ctrl, true, width);
        run(ctrl, true, height);
        assert_eq!(ctrl.state(), State::ScanMinMax);
    }

    #[test]
    fn test_idle_waits_for_start() {
        let mut ctrl = Controller::new();
        for _ in 0..5 {
            let out = run(&mut ctrl, false, 0xAA);
            assert_eq!(out, Outputs::default());
        }
        assert_eq!(ctrl.state(), State::Idle);
    }

    #[test]
    fn test_start_pulses_enable_for_one_tick() {
        let mut ctrl = Controller::new();
        let out = run(&mut ctrl, true, 0);
        assert_eq!(ctrl.state(), State::ReadWidth);
        assert!(out.enable);
        assert!(!out.write_enable);
        assert_eq!(out.address(), 0);

        let out = run(&mut ctrl, true, 3);
        assert!(!out.enable);
        assert_eq!(out.address(), 1);
        assert_eq!(ctrl.state(), State::ComputeEnd);
    }

    #[test]
    fn test_end_address_commits_one_tick_after_compute_end() {
        let mut ctrl = Controller::new();
        run(&mut ctrl, true, 0);
        run(&mut ctrl, true, 4);
        // after READ_WIDTH only the width is committed
        assert_eq!(ctrl.end_address(), 4);
        assert_eq!(ctrl.state(), State::ComputeEnd);

        run(&mut ctrl, true, 3);
        assert_eq!(ctrl.end_address(), 4 * 3 + 2);
        assert_eq!(ctrl.state(), State::ScanMinMax);
    }

    #[test]
    fn test_scan_tracks_range() {
        let mut ctrl = Controller::new();
        enter_scan(&mut ctrl, 2, 2);
        for px in [40, 7, 90, 12] {
            run(&mut ctrl, true, px);
        }
        assert_eq!(ctrl.max(), 90);
        assert_eq!(ctrl.min(), 7);
        assert_eq!(ctrl.read_pointer(), 6);
        assert_eq!(ctrl.state(), State::ScanMinMax);

        // exit tick leaves the read pointer alone
        run(&mut ctrl, true, 255);
        assert_eq!(ctrl.state(), State::ComputeShift);
        assert_eq!(ctrl.read_pointer(), 6);
        assert_eq!(ctrl.max(), 90);
    }

    #[test]
    fn test_compute_shift_prepares_write_phase() {
        let mut ctrl = Controller::new();
        enter_scan(&mut ctrl, 2, 1);
        run(&mut ctrl, true, 10);
        run(&mut ctrl, true, 200);
        run(&mut ctrl, true, 0);
        assert_eq!(ctrl.state(), State::ComputeShift);

        let out = run(&mut ctrl, true, 0);
        assert_eq!(ctrl.state(), State::ComputePixel);
        assert_eq!(ctrl.shift_level().value(), 1);
        assert_eq!(ctrl.read_pointer(), PIXEL_BASE);
        assert_eq!(ctrl.write_pointer(), 4);
        assert_eq!(out.phase, BusPhase::Read(PIXEL_BASE));
    }

    #[test]
    fn test_pixel_write_switches_bus_to_write_pointer() {
        let mut ctrl = Controller::new();
        enter_scan(&mut ctrl, 2, 1);
        for data in [10, 200, 0, 0] {
            run(&mut ctrl, true, data);
        }

        let out = run(&mut ctrl, true, 10);
        assert_eq!(ctrl.state(), State::WaitWrite);
        assert_eq!(out.phase, BusPhase::Write(4));
        assert!(out.is_write());
        assert_eq!(out.data_out, 0);

        let out = run(&mut ctrl, true, 0);
        assert_eq!(ctrl.state(), State::ComputePixel);
        assert_eq!(out.phase, BusPhase::Read(3));
        assert!(!out.enable && !out.write_enable);
        assert_eq!(out.data_out, 0);
        assert_eq!(ctrl.write_pointer(), 5);

        let out = run(&mut ctrl, true, 200);
        assert_eq!(out.phase, BusPhase::Write(5));
        assert_eq!(out.data_out, 255);
    }

    #[test]
    fn test_reset_during_scan_discards_progress() {
        let mut ctrl = Controller::new();
        enter_scan(&mut ctrl, 4, 4);
        for px in [50, 3, 250] {
            run(&mut ctrl, true, px);
        }

        let out = ctrl.tick(Inputs::new(true, true, 17));
        assert_eq!(ctrl.state(), State::Idle);
        assert_eq!(ctrl.max(), MAX_INIT);
        assert_eq!(ctrl.min(), MIN_INIT);
        assert_eq!(ctrl.read_pointer(), 0);
        assert_eq!(ctrl.write_pointer(), 0);
        assert_eq!(out, Outputs::default());

        // end address drops one tick later
        assert_eq!(ctrl.end_address(), 18);
        run(&mut ctrl, false, 0);
        assert_eq!(ctrl.end_address(), 0);
    }

    #[test]
    fn test_empty_image_still_finishes() {
        let mut ctrl = Controller::new();
        enter_scan(&mut ctrl, 0, 7);
        assert_eq!(ctrl.end_address(), 2);

        run(&mut ctrl, true, 0);
        assert_eq!(ctrl.state(), State::ComputeShift);
        run(&mut ctrl, true, 0);
        assert_eq!(ctrl.state(), State::ComputePixel);
        let out = run(&mut ctrl, true, 0);
        assert_eq!(ctrl.state(), State::Finished);
        assert!(!out.write_enable);

        let out = run(&mut ctrl, true, 0);
        assert!(out.done);
    }

    #[test]
    fn test_done_follows_start() {
        let mut ctrl = Controller::new();
        enter_scan(&mut ctrl, 1, 1);
        // scan one pixel, exit, shift, one pixel + wait, then finish
        for data in [5, 0, 0, 5, 0, 0] {
            run(&mut ctrl, true, data);
        }
        assert_eq!(ctrl.state(), State::Finished);

        for _ in 0..4 {
            assert!(run(&mut ctrl, true, 0).done);
            assert_eq!(ctrl.state(), State::Finished);
        }

        let out = run(&mut ctrl, false, 0);
        assert!(!out.done);
        assert_eq!(ctrl.state(), State::Idle);
    }
}
