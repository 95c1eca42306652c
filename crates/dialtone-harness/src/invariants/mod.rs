//! Invariant checking for reducer transitions.
//!
//! Invariants are properties that must always hold while the client runs.
//! Unlike example-based tests that check specific sessions, invariants
//! verify behavioral properties across all possible event sequences.
//!
//! # Architecture
//!
//! Each reduction step is captured as a [`Transition`], then every
//! registered [`Invariant`] is run against it. Checks only see the prior
//! snapshot, the event and the next snapshot, so they work equally on
//! transitions produced by the reducer, the event loop or a fuzzer.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! for transition in replay(State::default(), events) {
//!     registry.check_all(&transition)?;
//! }
//! ```

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{
    ChatActiveGating, IdentityDefault, ImageCleared, InputReset, InputSanitized,
    TranscriptAppendOnly,
};
pub use snapshot::{Transition, replay};

/// Identifies which invariant a [`Violation`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantKind {
    /// Transcript only ever grows by at most one entry at the tail.
    TranscriptAppendOnly,
    /// Input buffer never holds escape or non-printable characters.
    InputSanitized,
    /// New connections and sent messages clear the input buffer.
    InputReset,
    /// Page changes and skips drop the partner frame.
    ImageCleared,
    /// Typing only edits the input while the chat channel is open.
    ChatActiveGating,
    /// Fields not addressed by an event keep their prior value.
    IdentityDefault,
}

impl InvariantKind {
    /// Stable name for reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::TranscriptAppendOnly => "transcript_append_only",
            Self::InputSanitized => "input_sanitized",
            Self::InputReset => "input_reset",
            Self::ImageCleared => "image_cleared",
            Self::ChatActiveGating => "chat_active_gating",
            Self::IdentityDefault => "identity_default",
        }
    }
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Which invariant was violated.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

impl Violation {
    pub(crate) fn new(invariant: InvariantKind, message: impl Into<String>) -> Self {
        Self { invariant, message: message.into() }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// An invariant that can be checked against a reducer transition.
///
/// Invariants are behavioral properties that must always hold.
/// They capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Which invariant this is, for error reporting.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against one transition.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, transition: &Transition) -> InvariantResult;
}

/// Registry of invariants to check.
///
/// Collects multiple invariants and runs them all against a transition.
/// Use [`InvariantRegistry::standard()`] for the reducer's guarantees.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InvariantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.invariants.iter().map(|inv| inv.kind())).finish()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with every reducer invariant.
    ///
    /// Includes:
    /// - [`TranscriptAppendOnly`]: transcript grows by at most one entry
    /// - [`InputSanitized`]: input holds printable text only
    /// - [`InputReset`]: connect and send clear the input
    /// - [`ImageCleared`]: page change and skip drop the frame
    /// - [`ChatActiveGating`]: typing needs an open chat channel
    /// - [`IdentityDefault`]: unrelated events leave fields alone
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(TranscriptAppendOnly);
        registry.add(InputSanitized);
        registry.add(InputReset);
        registry.add(ImageCleared);
        registry.add(ChatActiveGating);
        registry.add(IdentityDefault);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given transition.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, transition: &Transition) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(transition).err()).collect();

        if violations.is_empty() {
            return Ok(());
        }
        tracing::debug!(
            event = transition.event.name(),
            count = violations.len(),
            "invariant violations"
        );
        Err(violations)
    }

    /// Check all invariants, panicking with every violation found.
    ///
    /// Use this in tests where you want immediate failure with context.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, transition: &Transition, context: &str) {
        if let Err(violations) = self.check_all(transition) {
            let messages: Vec<_> = violations.iter().map(|v| v.to_string()).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use dialtone_app::{Event, State};

    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn initial_transition_passes_invariants() {
        let registry = InvariantRegistry::standard();
        let transition = Transition::apply(&State::default(), Event::Skip);
        assert!(registry.check_all(&transition).is_ok());
    }

    #[test]
    fn violation_display_names_invariant() {
        let violation = Violation::new(InvariantKind::InputReset, "input not cleared");
        assert_eq!(violation.to_string(), "input_reset: input not cleared");
    }
}
