//! Reducer transitions for invariant checking.
//!
//! A transition captures one reduction step. Snapshots share their large
//! fields through `Arc`, so holding the prior and next state is cheap and
//! invariants can compare them by pointer as well as by value.

use dialtone_app::{Event, State, reduce};

/// One reduction step: `next == reduce(prior, event)` for the real reducer.
///
/// Transitions can also be built by hand with an arbitrary `next` to verify
/// that invariants catch broken reducers.
#[derive(Debug, Clone)]
pub struct Transition {
    /// State before the event.
    pub prior: State,
    /// Event that was applied.
    pub event: Event,
    /// State after the event.
    pub next: State,
}

impl Transition {
    /// Create a transition from its parts.
    pub fn new(prior: State, event: Event, next: State) -> Self {
        Self { prior, event, next }
    }

    /// Apply `event` to `prior` with the real reducer.
    pub fn apply(prior: &State, event: Event) -> Self {
        let next = reduce(prior, &event);
        Self { prior: prior.clone(), event, next }
    }
}

/// Fold `events` over `initial`, returning every step in order.
///
/// Each transition's `prior` is the previous transition's `next`.
pub fn replay(initial: State, events: impl IntoIterator<Item = Event>) -> Vec<Transition> {
    let mut state = initial;
    events
        .into_iter()
        .map(|event| {
            let transition = Transition::apply(&state, event);
            state = transition.next.clone();
            transition
        })
        .collect()
}
