//! Application input events.
//!
//! This module defines [`Event`], the closed set of inputs that drive the
//! [`crate::reduce`] function.
//!
//! Events originate from independent producers:
//! - Signaling and data channel notifications (connection lifecycle, chat).
//! - The media pipeline (decoded video frames).
//! - Keyboard and terminal notifications (key presses, resizes).
//! - The logger, via [`crate::EventLogLayer`].

use std::sync::Arc;

use crate::{Page, VideoFrame, WinSize};

/// Why a connection attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// Connection could not be set up. Reported by a separate error handler.
    SetupError,
    /// Matchmaking failed. Routine, not shown to the user.
    MatchError,
    /// Local user skipped to the next partner.
    Normal,
    /// Connection attempt timed out.
    TimedOut,
    /// Transport dropped.
    Disconnected,
    /// Remote partner left.
    Gone,
}

/// Severity of a forwarded log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Informational line.
    Info,
    /// Error line.
    Error,
}

/// Events processed by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Connection to a partner started.
    ConnStarted,

    /// Connection ended.
    ConnEnded {
        /// Why the connection ended.
        reason: EndReason,
    },

    /// Data channel to the partner opened.
    DataOpened,

    /// Chat message received from the partner.
    ReceivedChat {
        /// Message text.
        text: String,
    },

    /// Chat message sent by the local user.
    SentMessage {
        /// Message text, taken from the input buffer.
        text: String,
    },

    /// Decoded video frame from the partner.
    Frame(Arc<VideoFrame>),

    /// Key press. Usually one code point, but a terminal read may deliver a
    /// whole escape sequence at once.
    Keypress(String),

    /// Delete the last character of the input buffer.
    Backspace,

    /// Switch the current page.
    SetPage(Page),

    /// Terminal resized.
    Resize(WinSize),

    /// Toggle the help overlay.
    ToggleHelp,

    /// Skip to the next partner.
    Skip,

    /// Log line to show in the transcript.
    Log {
        /// Severity.
        level: LogLevel,
        /// Log text.
        text: String,
    },
}

impl Event {
    /// Key press event from a character or a decoded key string.
    pub fn keypress(key: impl Into<String>) -> Self {
        Self::Keypress(key.into())
    }

    /// Connection ended with the given reason.
    pub fn conn_ended(reason: EndReason) -> Self {
        Self::ConnEnded { reason }
    }

    /// Chat message received from the partner.
    pub fn received_chat(text: impl Into<String>) -> Self {
        Self::ReceivedChat { text: text.into() }
    }

    /// Chat message sent by the local user.
    pub fn sent_message(text: impl Into<String>) -> Self {
        Self::SentMessage { text: text.into() }
    }

    /// Log line at the given level.
    pub fn log(level: LogLevel, text: impl Into<String>) -> Self {
        Self::Log { level, text: text.into() }
    }

    /// Short variant name, used for tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConnStarted => "conn_started",
            Self::ConnEnded { .. } => "conn_ended",
            Self::DataOpened => "data_opened",
            Self::ReceivedChat { .. } => "received_chat",
            Self::SentMessage { .. } => "sent_message",
            Self::Frame(_) => "frame",
            Self::Keypress(_) => "keypress",
            Self::Backspace => "backspace",
            Self::SetPage(_) => "set_page",
            Self::Resize(_) => "resize",
            Self::ToggleHelp => "toggle_help",
            Self::Skip => "skip",
            Self::Log { .. } => "log",
        }
    }
}
