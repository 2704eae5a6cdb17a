//! Plain trampoline chains, no machine involved.

use std::convert::Infallible;

use tapeworks_core::trampoline::{trampoline, Bounce, Outcome, Thunk};

type Step = Thunk<(u64, u64), Infallible>;

// Two thunks hand the countdown back and forth; the pair is
// (remaining, invocations so far).
fn ping() -> Step {
    Thunk::new(|(remaining, calls): (u64, u64)| {
        if remaining == 0 {
            Bounce::Continue(None, (0, calls + 1))
        } else {
            Bounce::Continue(Some(pong()), (remaining - 1, calls + 1))
        }
    })
}

fn pong() -> Step {
    Thunk::new(|(remaining, calls): (u64, u64)| {
        if remaining == 0 {
            Bounce::Continue(None, (0, calls + 1))
        } else {
            Bounce::Continue(Some(ping()), (remaining - 1, calls + 1))
        }
    })
}

/// Count `start` down to zero across two alternating thunks and return how
/// many thunks ran (`start + 1`).
pub fn countdown(start: u64) -> u64 {
    match trampoline(Some(ping()), (start, 0)) {
        Outcome::Argument((_, calls)) => calls,
        Outcome::Value(never) => match never {},
    }
}

/// A fixed three-step chain. The first step passes `[start]` along, the
/// other two each append one more than the last value, and the third
/// finishes with the list.
pub fn chain(start: i64) -> Vec<i64> {
    let last = Thunk::new(|mut seen: Vec<i64>| {
        let n = seen.last().map_or(0, |n| n + 1);
        seen.push(n);
        Bounce::Done(seen)
    });
    let middle = Thunk::new(move |mut seen: Vec<i64>| {
        let n = seen.last().map_or(0, |n| n + 1);
        seen.push(n);
        Bounce::Continue(Some(last), seen)
    });
    let first = Thunk::new(move |seen: Vec<i64>| Bounce::Continue(Some(middle), seen));

    match trampoline(Some(first), vec![start]) {
        Outcome::Value(seen) | Outcome::Argument(seen) => seen,
    }
}
