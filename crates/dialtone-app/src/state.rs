//! Observable application state types.
//!
//! This module defines [`State`], the snapshot a renderer paints, together
//! with the value types it is built from.
//!
//! A `State` is never mutated in place. Each reduction produces a new
//! snapshot; the large fields (transcript and video frame) live behind `Arc`
//! so successive snapshots share them until one actually changes.

use std::{fmt, sync::Arc};

use crate::VideoFrame;

/// UI page selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    /// Start screen asking the user to confirm before matching.
    #[default]
    Confirm,
    /// Camera permission prompt.
    Permissions,
    /// Video chat with a partner.
    Chat,
    /// Unrecoverable error screen.
    GlobalError,
}

/// Terminal dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WinSize {
    /// Number of rows.
    pub rows: u16,
    /// Number of columns.
    pub cols: u16,
}

impl WinSize {
    /// Create a window size.
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

/// Kind of transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Sent by the local user.
    Outgoing,
    /// Received from the partner.
    Incoming,
    /// Status line.
    Info,
    /// Error line.
    Error,
}

/// A transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    kind: MessageKind,
    user: String,
    text: String,
}

impl Message {
    pub(crate) fn new(kind: MessageKind, user: impl Into<String>, text: impl Into<String>) -> Self {
        Self { kind, user: user.into(), text: text.into() }
    }

    /// Status line with no user.
    pub(crate) fn system(kind: MessageKind, text: impl Into<String>) -> Self {
        Self::new(kind, "", text)
    }

    /// Entry kind.
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Display name. Empty for status lines.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Entry text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.user.is_empty() {
            write!(f, "{}", self.text)
        } else {
            write!(f, "{}: {}", self.user, self.text)
        }
    }
}

/// Append-only message log.
///
/// Entries can be read but never changed or removed. [`Transcript::appended`]
/// returns a new log and leaves `self` untouched, so an older snapshot keeps
/// seeing exactly the entries it had.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Arc<Vec<Message>>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// New transcript with `message` added at the end.
    pub(crate) fn appended(&self, message: Message) -> Self {
        let mut entries = Arc::clone(&self.entries);
        Arc::make_mut(&mut entries).push(message);
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, oldest first.
    pub fn get(&self, index: usize) -> Option<&Message> {
        self.entries.get(index)
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    /// Entries, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.entries.iter()
    }

    /// Entries as a slice, oldest first.
    pub fn as_slice(&self) -> &[Message] {
        &self.entries
    }

    /// True if both transcripts share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Complete UI state at one point in the event sequence.
///
/// Built once with [`State::new`] and thereafter only produced by
/// [`crate::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub(crate) image: Option<Arc<VideoFrame>>,
    pub(crate) chat_active: bool,
    pub(crate) input: String,
    pub(crate) messages: Transcript,
    pub(crate) page: Page,
    pub(crate) win_size: WinSize,
    pub(crate) help_on: bool,
}

impl Default for State {
    fn default() -> Self {
        Self::new(Page::default(), WinSize::default())
    }
}

impl State {
    /// Startup state: no image, chat closed, empty input and transcript,
    /// help hidden.
    pub fn new(page: Page, win_size: WinSize) -> Self {
        Self {
            image: None,
            chat_active: false,
            input: String::new(),
            messages: Transcript::new(),
            page,
            win_size,
            help_on: false,
        }
    }

    /// Latest partner video frame. `None` if none received on this page.
    pub fn image(&self) -> Option<&Arc<VideoFrame>> {
        self.image.as_ref()
    }

    /// Whether the chat channel is open.
    pub fn chat_active(&self) -> bool {
        self.chat_active
    }

    /// Unsent message text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Full transcript.
    pub fn messages(&self) -> &Transcript {
        &self.messages
    }

    /// Current page.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Last reported terminal size.
    pub fn win_size(&self) -> WinSize {
        self.win_size
    }

    /// Whether the help overlay is shown.
    pub fn help_on(&self) -> bool {
        self.help_on
    }
}
