//! Producer handle for the event loop.
//!
//! Every subsystem that generates events (signaling, data channel, media,
//! keyboard, terminal, logger) holds a clone of [`EventSender`]. All clones
//! feed the same ordered queue, which the [`crate::Runtime`] drains serially.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::{EndReason, Event, LogLevel, Page, VideoFrame, WinSize};

/// The event loop has stopped and no longer accepts events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("event loop has stopped")]
pub struct SendError;

/// Message on the event queue.
#[derive(Debug)]
pub(crate) enum Envelope {
    /// Event to reduce.
    Dispatch(Event),
    /// Stop the loop after everything queued before this.
    Shutdown,
}

/// Cloneable, non-blocking handle for submitting events.
///
/// Sending never waits and never drops an event while the loop is running,
/// so it is safe to call from any thread, including synchronous callbacks.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl EventSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Envelope>) -> Self {
        Self { tx }
    }

    /// Submit an event.
    pub fn send(&self, event: Event) -> Result<(), SendError> {
        self.tx.send(Envelope::Dispatch(event)).map_err(|_| SendError)
    }

    /// Ask the loop to stop once it has processed everything sent before.
    pub fn shutdown(&self) -> Result<(), SendError> {
        self.tx.send(Envelope::Shutdown).map_err(|_| SendError)
    }

    /// Check whether the loop has stopped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Signaling: connection to a partner started.
    pub fn conn_started(&self) -> Result<(), SendError> {
        self.send(Event::ConnStarted)
    }

    /// Signaling: connection attempt ended.
    pub fn conn_ended(&self, reason: EndReason) -> Result<(), SendError> {
        self.send(Event::conn_ended(reason))
    }

    /// Signaling: data channel opened.
    pub fn data_opened(&self) -> Result<(), SendError> {
        self.send(Event::DataOpened)
    }

    /// Data channel: message received from the partner.
    pub fn received_chat(&self, text: impl Into<String>) -> Result<(), SendError> {
        self.send(Event::received_chat(text))
    }

    /// Data channel: local user sent a message.
    pub fn sent_message(&self, text: impl Into<String>) -> Result<(), SendError> {
        self.send(Event::sent_message(text))
    }

    /// Media: decoded frame ready.
    pub fn frame(&self, frame: Arc<VideoFrame>) -> Result<(), SendError> {
        self.send(Event::Frame(frame))
    }

    /// Input: key pressed.
    pub fn keypress(&self, key: impl Into<String>) -> Result<(), SendError> {
        self.send(Event::keypress(key))
    }

    /// Input: backspace pressed.
    pub fn backspace(&self) -> Result<(), SendError> {
        self.send(Event::Backspace)
    }

    /// Switch page.
    pub fn set_page(&self, page: Page) -> Result<(), SendError> {
        self.send(Event::SetPage(page))
    }

    /// Terminal: resized to `rows` x `cols`.
    pub fn resize(&self, rows: u16, cols: u16) -> Result<(), SendError> {
        self.send(Event::Resize(WinSize::new(rows, cols)))
    }

    /// Input: help key pressed.
    pub fn toggle_help(&self) -> Result<(), SendError> {
        self.send(Event::ToggleHelp)
    }

    /// Input: skip to the next partner.
    pub fn skip(&self) -> Result<(), SendError> {
        self.send(Event::Skip)
    }

    /// Logger: line for the transcript.
    pub fn log(&self, level: LogLevel, text: impl Into<String>) -> Result<(), SendError> {
        self.send(Event::log(level, text))
    }
}
