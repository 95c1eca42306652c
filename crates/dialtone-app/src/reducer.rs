//! UI state reducer.
//!
//! [`reduce`] is the only way the application advances its [`State`]. It is
//! built from one reducer per field. Every field reducer receives the same
//! prior snapshot and the same event, so the order they run in does not
//! matter. Each field reducer returns its input unchanged for events it does
//! not handle.
//!
//! Nothing here performs I/O or can fail.

use std::sync::Arc;

use crate::{
    EndReason, Event, LogLevel, Message, MessageKind, Page, State, Transcript, VideoFrame,
    WinSize, sanitize::sanitize,
};

/// Display name for the local user.
pub const LOCAL_USER: &str = "You";

/// Display name for the partner.
pub const REMOTE_USER: &str = "Them";

/// Produce the snapshot that follows `state` after `event`.
pub fn reduce(state: &State, event: &Event) -> State {
    State {
        image: image(state.image.as_ref(), event),
        chat_active: chat_active(state.chat_active, event),
        input: input(&state.input, state.chat_active, event),
        messages: messages(&state.messages, event),
        page: page(state.page, event),
        win_size: win_size(state.win_size, event),
        help_on: help_on(state.help_on, event),
    }
}

impl State {
    /// Produce the snapshot that follows `self` after `event`.
    pub fn reduce(&self, event: &Event) -> State {
        reduce(self, event)
    }
}

/// Latest frame; cleared when leaving the page or skipping the partner.
pub fn image(prior: Option<&Arc<VideoFrame>>, event: &Event) -> Option<Arc<VideoFrame>> {
    match event {
        Event::Frame(frame) => Some(Arc::clone(frame)),
        Event::SetPage(_) | Event::Skip => None,
        _ => prior.cloned(),
    }
}

/// Open from data channel open until the connection ends.
pub fn chat_active(prior: bool, event: &Event) -> bool {
    match event {
        Event::DataOpened => true,
        Event::ConnEnded { .. } => false,
        _ => prior,
    }
}

/// Help overlay never survives a skip or a sent message.
pub fn help_on(prior: bool, event: &Event) -> bool {
    match event {
        Event::ToggleHelp => !prior,
        Event::Skip | Event::SentMessage { .. } => false,
        _ => prior,
    }
}

/// Current page.
pub fn page(prior: Page, event: &Event) -> Page {
    match event {
        Event::SetPage(page) => *page,
        _ => prior,
    }
}

/// Terminal size.
pub fn win_size(prior: WinSize, event: &Event) -> WinSize {
    match event {
        Event::Resize(size) => *size,
        _ => prior,
    }
}

/// Text input buffer.
///
/// Key presses and backspace are ignored unless the chat channel is open.
/// After every key press the whole buffer is sanitized, not just the new
/// text.
pub fn input(prior: &str, chat_active: bool, event: &Event) -> String {
    match event {
        Event::ConnStarted | Event::SentMessage { .. } => String::new(),
        Event::Keypress(key) if chat_active => {
            let mut buffer = String::with_capacity(prior.len() + key.len());
            buffer.push_str(prior);
            buffer.push_str(key);
            sanitize(&buffer)
        },
        Event::Backspace if chat_active => {
            let mut buffer = prior.to_owned();
            buffer.pop();
            buffer
        },
        _ => prior.to_owned(),
    }
}

/// Transcript. Appends at most one entry per event.
pub fn messages(prior: &Transcript, event: &Event) -> Transcript {
    let entry = match event {
        Event::SentMessage { text } => {
            Message::new(MessageKind::Outgoing, LOCAL_USER, text.as_str())
        },
        Event::ReceivedChat { text } => {
            Message::new(MessageKind::Incoming, REMOTE_USER, text.as_str())
        },
        Event::ConnStarted => Message::system(MessageKind::Info, "Connected"),
        Event::Log { level, text } => {
            let kind = match level {
                LogLevel::Info => MessageKind::Info,
                LogLevel::Error => MessageKind::Error,
            };
            Message::system(kind, text.as_str())
        },
        Event::ConnEnded { reason } => match end_message(*reason) {
            Some(entry) => entry,
            None => return prior.clone(),
        },
        _ => return prior.clone(),
    };
    prior.appended(entry)
}

/// Transcript line for a connection ending. `None` for reasons reported
/// elsewhere (setup errors) or not at all (match errors).
fn end_message(reason: EndReason) -> Option<Message> {
    let (kind, text) = match reason {
        EndReason::SetupError | EndReason::MatchError => return None,
        EndReason::Normal => (MessageKind::Info, "Skipping..."),
        EndReason::TimedOut => (MessageKind::Error, "Connection timed out."),
        EndReason::Disconnected => (MessageKind::Error, "Lost connection."),
        EndReason::Gone => (MessageKind::Info, "Your partner left the chat."),
    };
    Some(Message::system(kind, text))
}
