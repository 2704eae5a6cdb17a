//! Tape instructions for rules.
//!
//! An [`Op`] is a deferred call against the machine that will run it. The
//! plain constructors target whichever tape is active when the op fires; the
//! `_at` variants pin a tape index.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::machine::Machine;
use crate::Symbol;

/// A single write or move instruction.
pub struct Op<I, O>(Rc<dyn Fn(&mut Machine<I, O>) -> Result<()>>);

impl<I, O> Op<I, O> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Machine<I, O>) -> Result<()> + 'static,
    {
        Op(Rc::new(f))
    }

    pub fn apply(&self, machine: &mut Machine<I, O>) -> Result<()> {
        (self.0)(machine)
    }
}

impl<I, O> Clone for Op<I, O> {
    fn clone(&self) -> Self {
        Op(Rc::clone(&self.0))
    }
}

impl<I, O> fmt::Debug for Op<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Op(..)")
    }
}

pub fn move_input_left<I: Symbol, O: Symbol>() -> Op<I, O> {
    Op::new(|m: &mut Machine<I, O>| m.move_input_left())
}

pub fn move_input_right<I: Symbol, O: Symbol>() -> Op<I, O> {
    Op::new(|m: &mut Machine<I, O>| m.move_input_right())
}

pub fn move_output_left<I: Symbol, O: Symbol>() -> Op<I, O> {
    Op::new(|m: &mut Machine<I, O>| m.move_output_left())
}

pub fn move_output_right<I: Symbol, O: Symbol>() -> Op<I, O> {
    Op::new(|m: &mut Machine<I, O>| m.move_output_right())
}

pub fn move_input_left_at<I: Symbol, O: Symbol>(tape: usize) -> Op<I, O> {
    Op::new(move |m: &mut Machine<I, O>| m.move_input_left_at(tape))
}

pub fn move_input_right_at<I: Symbol, O: Symbol>(tape: usize) -> Op<I, O> {
    Op::new(move |m: &mut Machine<I, O>| m.move_input_right_at(tape))
}

pub fn move_output_left_at<I: Symbol, O: Symbol>(tape: usize) -> Op<I, O> {
    Op::new(move |m: &mut Machine<I, O>| m.move_output_left_at(tape))
}

pub fn move_output_right_at<I: Symbol, O: Symbol>(tape: usize) -> Op<I, O> {
    Op::new(move |m: &mut Machine<I, O>| m.move_output_right_at(tape))
}

/// Write `value` to the active input tape.
pub fn write_input<I: Symbol, O: Symbol>(value: I) -> Op<I, O> {
    Op::new(move |m: &mut Machine<I, O>| m.write_input(value.clone()))
}

/// Write `value` to the active output tape.
pub fn write_output<I: Symbol, O: Symbol>(value: O) -> Op<I, O> {
    Op::new(move |m: &mut Machine<I, O>| m.write_output(value.clone()))
}

/// Run `first`, then `second`.
pub fn then<I: Symbol, O: Symbol>(first: Op<I, O>, second: Op<I, O>) -> Op<I, O> {
    Op::new(move |m: &mut Machine<I, O>| {
        first.apply(m)?;
        second.apply(m)
    })
}
