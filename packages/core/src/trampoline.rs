//! Stack-safe continuation driver.
//!
//! An action returns a [`Bounce`]: either the next action and its argument,
//! or a finished value. [`trampoline`] keeps swapping the pair in a loop, so
//! a chain of any length runs at constant call-stack depth.
//!
//! # Example
//!
//! ```rust
//! use tapeworks_core::trampoline::{trampoline, Bounce, Outcome, Thunk};
//!
//! fn sum_down() -> Thunk<(u64, u64), u64> {
//!     Thunk::new(|(n, total): (u64, u64)| {
//!         if n == 0 {
//!             Bounce::Done(total)
//!         } else {
//!             Bounce::Continue(Some(sum_down()), (n - 1, total + n))
//!         }
//!     })
//! }
//!
//! let outcome = trampoline(Some(sum_down()), (10, 0));
//! assert_eq!(outcome.into_value(), Some(55));
//! ```

/// What an action hands back to the trampoline.
pub enum Bounce<F, A, T> {
    /// Invoke the action with the argument next. An absent action ends the
    /// run, and the argument becomes the result.
    Continue(Option<F>, A),
    /// Stop with a final value.
    Done(T),
}

/// How a trampoline run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<A, T> {
    /// The chain reached an absent action; this is the last argument.
    Argument(A),
    /// An action returned [`Bounce::Done`].
    Value(T),
}

impl<A, T> Outcome<A, T> {
    /// The finished value, if the run ended with one.
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Value(value) => Some(value),
            Outcome::Argument(_) => None,
        }
    }

    /// Whether the run ended on an absent action.
    pub fn is_argument(&self) -> bool {
        matches!(self, Outcome::Argument(_))
    }
}

/// Something the trampoline can call.
///
/// Implementors consume themselves on each call and name their successor in
/// the returned [`Bounce`].
pub trait Invoke<A, T>: Sized {
    fn invoke(self, argument: A) -> Bounce<Self, A, T>;
}

/// Drive `action` until it finishes.
///
/// Never recurses: each iteration replaces the current action/argument pair
/// with the one the action returned.
pub fn trampoline<F, A, T>(action: Option<F>, argument: A) -> Outcome<A, T>
where
    F: Invoke<A, T>,
{
    let mut action = action;
    let mut argument = argument;
    loop {
        let Some(current) = action else {
            return Outcome::Argument(argument);
        };
        match current.invoke(argument) {
            Bounce::Continue(next, next_argument) => {
                action = next;
                argument = next_argument;
            }
            Bounce::Done(value) => return Outcome::Value(value),
        }
    }
}

/// A boxed one-shot action for ad hoc continuation chains.
pub struct Thunk<A, T>(Box<dyn FnOnce(A) -> Bounce<Thunk<A, T>, A, T>>);

impl<A, T> Thunk<A, T> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(A) -> Bounce<Thunk<A, T>, A, T> + 'static,
    {
        Thunk(Box::new(f))
    }
}

impl<A, T> Invoke<A, T> for Thunk<A, T> {
    fn invoke(self, argument: A) -> Bounce<Self, A, T> {
        (self.0)(argument)
    }
}

impl<A, T> std::fmt::Debug for Thunk<A, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Thunk(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts down, recording every invocation in `calls`.
    fn countdown(calls: Rc<Cell<u64>>) -> Thunk<u64, &'static str> {
        Thunk::new(move |remaining: u64| {
            calls.set(calls.get() + 1);
            if remaining <= 1 {
                Bounce::Done("landed")
            } else {
                Bounce::Continue(Some(countdown(calls)), remaining - 1)
            }
        })
    }

    #[test]
    fn absent_action_returns_argument() {
        let outcome: Outcome<i32, ()> = trampoline(None::<Thunk<i32, ()>>, 7);
        assert_eq!(outcome, Outcome::Argument(7));
        assert!(outcome.is_argument());
    }

    #[test]
    fn continue_with_none_returns_last_argument() {
        let first = Thunk::new(|n: i32| Bounce::Continue(None, n * 2));
        assert_eq!(trampoline(Some(first), 21), Outcome::<i32, ()>::Argument(42));
    }

    #[test]
    fn done_stops_immediately() {
        let calls = Rc::new(Cell::new(0));
        let outcome = trampoline(Some(countdown(calls.clone())), 1);
        assert_eq!(outcome, Outcome::Value("landed"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn deep_chain_runs_without_recursion() {
        const DEPTH: u64 = 100_000;
        let calls = Rc::new(Cell::new(0));
        let outcome = trampoline(Some(countdown(calls.clone())), DEPTH);
        assert_eq!(outcome.into_value(), Some("landed"));
        assert_eq!(calls.get(), DEPTH);
    }

    #[test]
    fn argument_threads_through_chain() {
        fn step(limit: u32) -> Thunk<Vec<u32>, Vec<u32>> {
            Thunk::new(move |mut seen: Vec<u32>| {
                let next = seen.len() as u32;
                seen.push(next);
                if next + 1 == limit {
                    Bounce::Done(seen)
                } else {
                    Bounce::Continue(Some(step(limit)), seen)
                }
            })
        }
        let outcome = trampoline(Some(step(4)), Vec::new());
        assert_eq!(outcome.into_value(), Some(vec![0, 1, 2, 3]));
    }
}
