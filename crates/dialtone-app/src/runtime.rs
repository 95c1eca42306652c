//! Event loop that owns the UI state.
//!
//! The [`Runtime`] is the single consumer of the event queue fed by every
//! [`EventSender`]. It reduces events one at a time in arrival order, then
//! publishes each new snapshot:
//! - on a `watch` channel, for any number of readers;
//! - to its [`Renderer`].
//!
//! No other component holds the state mutably, so the reducer needs no
//! locking.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, watch};

use crate::{Event, EventSender, Page, Renderer, State, WinSize, reduce, sender::Envelope};

/// Tracing target of the event loop. Log forwarding skips it.
pub(crate) const TARGET: &str = module_path!();

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError<E: std::error::Error + 'static> {
    /// Renderer failed to paint a snapshot.
    #[error("render failed: {0}")]
    Render(#[source] E),
}

/// Event loop configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Page shown at startup.
    pub initial_page: Page,
    /// Terminal size at startup, if already known.
    pub initial_win_size: WinSize,
    /// Render the startup state before the first event arrives.
    pub render_initial: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            initial_page: Page::Confirm,
            initial_win_size: WinSize::default(),
            render_initial: true,
        }
    }
}

/// Single-consumer event loop.
///
/// # Type Parameters
///
/// - `R`: Renderer that paints each snapshot
pub struct Runtime<R: Renderer> {
    renderer: R,
    state: Arc<State>,
    events: mpsc::UnboundedReceiver<Envelope>,
    snapshots: watch::Sender<Arc<State>>,
    render_initial: bool,
}

impl<R: Renderer> Runtime<R> {
    /// Create a runtime and the sender that feeds it.
    ///
    /// The loop runs until [`EventSender::shutdown`] is called or every
    /// sender has been dropped.
    pub fn new(config: RuntimeConfig, renderer: R) -> (Self, EventSender) {
        let (tx, events) = mpsc::unbounded_channel();
        let state = Arc::new(State::new(config.initial_page, config.initial_win_size));
        let (snapshots, _) = watch::channel(Arc::clone(&state));

        let runtime =
            Self { renderer, state, events, snapshots, render_initial: config.render_initial };
        (runtime, EventSender::new(tx))
    }

    /// Subscribe to snapshots. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<Arc<State>> {
        self.snapshots.subscribe()
    }

    /// Current snapshot.
    pub fn state(&self) -> &Arc<State> {
        &self.state
    }

    /// Reduce a single event, publish and render the result.
    ///
    /// For hosts that drive their own loop instead of calling [`Self::run`].
    pub fn step(&mut self, event: &Event) -> Result<&Arc<State>, RuntimeError<R::Error>> {
        tracing::trace!(event = event.name(), "dispatch");

        self.state = Arc::new(reduce(&self.state, event));
        self.snapshots.send_replace(Arc::clone(&self.state));
        self.render()?;

        Ok(&self.state)
    }

    /// Run the event loop to completion.
    ///
    /// Returns the final snapshot once shut down or once every sender is
    /// gone.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer fails.
    pub async fn run(mut self) -> Result<Arc<State>, RuntimeError<R::Error>> {
        tracing::debug!("event loop started");

        if self.render_initial {
            self.render()?;
        }

        while let Some(envelope) = self.events.recv().await {
            match envelope {
                Envelope::Dispatch(event) => {
                    self.step(&event)?;
                },
                Envelope::Shutdown => {
                    tracing::debug!("shutdown requested");
                    break;
                },
            }
        }

        tracing::debug!(messages = self.state.messages().len(), "event loop stopped");
        Ok(self.state)
    }

    fn render(&mut self) -> Result<(), RuntimeError<R::Error>> {
        self.renderer.render(&self.state).map_err(|e| {
            tracing::warn!("render failed: {e}");
            RuntimeError::Render(e)
        })
    }
}
