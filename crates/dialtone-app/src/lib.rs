//! Application layer for dialtone
//!
//! Pure UI state reducer and the event loop that drives it. Every subsystem
//! of the client (signaling, data channel, media, keyboard, terminal, logger)
//! reports what happened as an [`Event`]; the reducer folds those events into
//! successive [`State`] snapshots that a renderer paints.
//!
//! # Components
//!
//! - [`reduce`]: Total, deterministic `(state, event) -> state` function
//! - [`reducer`]: One reducer per state field, composed by [`reduce`]
//! - [`Runtime`]: Single-consumer event loop owning the state
//! - [`EventSender`]: Cloneable producer handle feeding the loop
//! - [`EventLogLayer`]: Forwards `tracing` records into the transcript
//! - [`Renderer`]: Trait for painting snapshots

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod event;
mod frame;
mod log_layer;
pub mod reducer;
mod renderer;
mod runtime;
pub mod sanitize;
mod sender;
mod state;

pub use event::{EndReason, Event, LogLevel};
pub use frame::{FrameError, VideoFrame};
pub use log_layer::EventLogLayer;
pub use reducer::reduce;
pub use renderer::{NullRenderer, Renderer};
pub use runtime::{Runtime, RuntimeConfig, RuntimeError};
pub use sender::{EventSender, SendError};
pub use state::{Message, MessageKind, Page, State, Transcript, WinSize};
