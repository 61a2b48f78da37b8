//! Clocked registers with an explicit reset policy
//!
//! A [`Register`] holds a committed value that the rest of the controller
//! reads, and a staged value that becomes committed on [`Register::clock`].
//! The staged value defaults to the committed one every tick, so a register
//! nobody writes simply holds.
//!
//! Two reset policies exist:
//! - [`Immediate`]: reset is visible the moment it is observed, before the
//!   tick's clock edge.
//! - [`Deferred`]: reset is latched and replaces the staged value at the clock
//!   edge of the following tick. Used for the end-address register, whose
//!   output feeds a multiplier.

use std::marker::PhantomData;

/// How a register reacts to an observed reset
pub trait ResetPolicy {
    /// Whether the reset waits for the next tick's clock edge
    const DEFERRED: bool;
}

/// Reset applies on observation
#[derive(Debug, Clone, Copy)]
pub enum Immediate {}

/// Reset applies one tick after observation
#[derive(Debug, Clone, Copy)]
pub enum Deferred {}

impl ResetPolicy for Immediate {
    const DEFERRED: bool = false;
}

impl ResetPolicy for Deferred {
    const DEFERRED: bool = true;
}

#[derive(Debug, Clone)]
pub struct Register<T, P> {
    value: T,
    next: T,
    init: T,
    /// Reset observed during the current tick (deferred policy only)
    reset_requested: bool,
    /// Reset observed during the previous tick, due at this clock edge
    reset_due: bool,
    _policy: PhantomData<P>,
}

impl<T: Copy, P: ResetPolicy> Register<T, P> {
    #[must_use]
    pub fn new(init: T) -> Self {
        Self {
            value: init,
            next: init,
            init,
            reset_requested: false,
            reset_due: false,
            _policy: PhantomData,
        }
    }

    /// Committed value
    #[inline]
    #[must_use]
    pub fn get(&self) -> T {
        self.value
    }

    #[inline]
    pub fn set(&mut self, value: T) {
        self.next = value;
    }

    /// Observe a reset according to the register's policy
    pub fn reset(&mut self) {
        if P::DEFERRED {
            self.reset_requested = true;
        } else {
            self.value = self.init;
            self.next = self.init;
        }
    }

    /// Clock edge: commit the staged value (or a due reset) and go back to holding
    pub fn clock(&mut self) {
        self.value = if self.reset_due { self.init } else { self.next };
        self.next = self.value;
        self.reset_due = self.reset_requested;
        self.reset_requested = false;
    }
}

pub type ImmediateRegister<T> = Register<T, Immediate>;
pub type DeferredRegister<T> = Register<T, Deferred>;
