//! Invariant harness for the dialtone reducer.
//!
//! Every reduction step is captured as a [`Transition`] (prior state, event,
//! next state) and checked against registered [`Invariant`]s. Invariants
//! verify WHAT must be true for any event sequence, not specific scenarios.
//! Use [`InvariantRegistry::standard()`] for the reducer's field guarantees.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;

pub use invariants::{
    ChatActiveGating, IdentityDefault, ImageCleared, InputReset, InputSanitized, Invariant,
    InvariantKind, InvariantRegistry, InvariantResult, TranscriptAppendOnly, Transition,
    Violation, replay,
};
