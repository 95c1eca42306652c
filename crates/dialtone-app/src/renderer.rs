//! Renderer trait for painting state snapshots.
//!
//! The [`Renderer`] trait decouples the event loop from any particular
//! terminal library. The [`crate::Runtime`] calls it once per reduction with
//! the new snapshot; implementations only read the snapshot.
//!
//! # Implementations
//!
//! - **Terminal**: paints the page, transcript, input line and video frame.
//! - **Tests**: records snapshots for assertions.
//! - [`NullRenderer`]: discards everything, for headless hosts that only
//!   consume the snapshot channel.

use std::convert::Infallible;

use crate::State;

/// Paints a state snapshot.
pub trait Renderer: Send {
    /// Renderer-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Paint the given snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if painting fails. The event loop stops on error.
    fn render(&mut self, state: &State) -> Result<(), Self::Error>;
}

/// Renderer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    type Error = Infallible;

    fn render(&mut self, _state: &State) -> Result<(), Self::Error> {
        Ok(())
    }
}
