//! Standard invariant checks.
//!
//! These invariants capture behavioral properties of the reducer that must
//! always hold. They verify WHAT must be true, not specific test scenarios.

use std::sync::Arc;

use dialtone_app::{Event, VideoFrame, sanitize::sanitize};

use super::{Invariant, InvariantKind, InvariantResult, Transition, Violation};

fn same_frame(a: Option<&Arc<VideoFrame>>, b: Option<&Arc<VideoFrame>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Transcript only grows, by at most one entry at the tail.
///
/// Every entry of the prior transcript must still be present, unchanged and
/// in the same position. Rewriting history would make the chat log lie.
pub struct TranscriptAppendOnly;

impl Invariant for TranscriptAppendOnly {
    fn kind(&self) -> InvariantKind {
        InvariantKind::TranscriptAppendOnly
    }

    fn check(&self, t: &Transition) -> InvariantResult {
        let before = t.prior.messages().as_slice();
        let after = t.next.messages().as_slice();

        if after.len() != before.len() && after.len() != before.len() + 1 {
            return Err(Violation::new(
                self.kind(),
                format!(
                    "{}: transcript went from {} to {} entries",
                    t.event.name(),
                    before.len(),
                    after.len()
                ),
            ));
        }
        if let Some(i) = before.iter().zip(after).position(|(a, b)| a != b) {
            return Err(Violation::new(
                self.kind(),
                format!("{}: entry {i} rewritten", t.event.name()),
            ));
        }
        Ok(())
    }
}

/// Input buffer holds printable text only.
///
/// No escape introducer survives, and sanitizing the buffer again is a
/// no-op.
pub struct InputSanitized;

impl Invariant for InputSanitized {
    fn kind(&self) -> InvariantKind {
        InvariantKind::InputSanitized
    }

    fn check(&self, t: &Transition) -> InvariantResult {
        let input = t.next.input();
        if input.contains(['\u{1b}', '\u{9b}']) {
            return Err(Violation::new(
                self.kind(),
                format!("{}: escape introducer in input {input:?}", t.event.name()),
            ));
        }
        if sanitize(input) != input {
            return Err(Violation::new(
                self.kind(),
                format!("{}: unsanitized input {input:?}", t.event.name()),
            ));
        }
        Ok(())
    }
}

/// A new connection or a sent message leaves the input empty.
pub struct InputReset;

impl Invariant for InputReset {
    fn kind(&self) -> InvariantKind {
        InvariantKind::InputReset
    }

    fn check(&self, t: &Transition) -> InvariantResult {
        let resets = matches!(t.event, Event::ConnStarted | Event::SentMessage { .. });
        if resets && !t.next.input().is_empty() {
            return Err(Violation::new(
                self.kind(),
                format!("{}: input {:?} not cleared", t.event.name(), t.next.input()),
            ));
        }
        Ok(())
    }
}

/// Changing page or skipping drops the partner frame; a frame replaces it.
pub struct ImageCleared;

impl Invariant for ImageCleared {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ImageCleared
    }

    fn check(&self, t: &Transition) -> InvariantResult {
        match &t.event {
            Event::SetPage(_) | Event::Skip if t.next.image().is_some() => Err(Violation::new(
                self.kind(),
                format!("{}: frame kept", t.event.name()),
            )),
            Event::Frame(frame) if !same_frame(t.next.image(), Some(frame)) => Err(
                Violation::new(self.kind(), "frame event did not replace the image"),
            ),
            _ => Ok(()),
        }
    }
}

/// Typing only edits the input while the chat channel is open.
///
/// Also checks that the channel opens on `DataOpened` and closes on every
/// `ConnEnded`, whatever the reason.
pub struct ChatActiveGating;

impl Invariant for ChatActiveGating {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ChatActiveGating
    }

    fn check(&self, t: &Transition) -> InvariantResult {
        let typing = matches!(t.event, Event::Keypress(_) | Event::Backspace);
        if typing && !t.prior.chat_active() && t.next.input() != t.prior.input() {
            return Err(Violation::new(
                self.kind(),
                format!(
                    "{} edited input {:?} -> {:?} while chat closed",
                    t.event.name(),
                    t.prior.input(),
                    t.next.input()
                ),
            ));
        }

        let expected = match t.event {
            Event::DataOpened => Some(true),
            Event::ConnEnded { .. } => Some(false),
            _ => None,
        };
        match expected {
            Some(active) if t.next.chat_active() != active => Err(Violation::new(
                self.kind(),
                format!("{}: chat_active is {}", t.event.name(), t.next.chat_active()),
            )),
            _ => Ok(()),
        }
    }
}

/// Fields an event does not address keep their prior value.
///
/// The transcript and the frame must be the same allocation, not just equal,
/// so untouched snapshots share storage.
pub struct IdentityDefault;

impl IdentityDefault {
    fn unchanged(&self, t: &Transition) -> Result<(), &'static str> {
        let prior = &t.prior;
        let next = &t.next;

        let image_events = matches!(t.event, Event::Frame(_) | Event::SetPage(_) | Event::Skip);
        if !image_events && !same_frame(prior.image(), next.image()) {
            return Err("image");
        }

        let chat_events = matches!(t.event, Event::DataOpened | Event::ConnEnded { .. });
        if !chat_events && prior.chat_active() != next.chat_active() {
            return Err("chat_active");
        }

        let input_events = matches!(
            t.event,
            Event::ConnStarted | Event::SentMessage { .. } | Event::Keypress(_) | Event::Backspace
        );
        if !input_events && prior.input() != next.input() {
            return Err("input");
        }

        let message_events = matches!(
            t.event,
            Event::SentMessage { .. }
                | Event::ReceivedChat { .. }
                | Event::ConnStarted
                | Event::Log { .. }
                | Event::ConnEnded { .. }
        );
        if !message_events && !prior.messages().ptr_eq(next.messages()) {
            return Err("messages");
        }

        if !matches!(t.event, Event::SetPage(_)) && prior.page() != next.page() {
            return Err("page");
        }

        if !matches!(t.event, Event::Resize(_)) && prior.win_size() != next.win_size() {
            return Err("win_size");
        }

        let help_events =
            matches!(t.event, Event::ToggleHelp | Event::Skip | Event::SentMessage { .. });
        if !help_events && prior.help_on() != next.help_on() {
            return Err("help_on");
        }

        Ok(())
    }
}

impl Invariant for IdentityDefault {
    fn kind(&self) -> InvariantKind {
        InvariantKind::IdentityDefault
    }

    fn check(&self, t: &Transition) -> InvariantResult {
        self.unchanged(t).map_err(|field| {
            Violation::new(self.kind(), format!("{} changed {field}", t.event.name()))
        })
    }
}
