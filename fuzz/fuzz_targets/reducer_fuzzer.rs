//! Fuzz target for the UI state reducer
//!
//! Ensure every reducer invariant holds for arbitrary event sequences
//!
//! # Strategy
//!
//! - Lifecycle: connect, open, end with every reason, in any order
//! - Typing: raw bytes, escape fragments, full CSI/OSC sequences
//! - Frames: sizes that do and do not match the pixel buffer
//! - Navigation: page changes, resizes, help toggles, skips
//!
//! # Invariants
//!
//! - Transcript append-only, at most one entry per event
//! - Input never holds escape or non-printable characters
//! - Fields not addressed by an event keep their prior value
//! - Prior snapshot unchanged by reduction

#![no_main]

use std::sync::Arc;

use arbitrary::Arbitrary;
use dialtone_app::{EndReason, Event, LogLevel, Page, State, VideoFrame, WinSize};
use dialtone_harness::{InvariantRegistry, Transition};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum ReducerOp {
    ConnStarted,
    ConnEnded { reason: u8 },
    DataOpened,
    ReceivedChat { text: String },
    SentMessage { text: String },
    Frame { width: u8, height: u8, len: u16 },
    Keypress { key: KeyChoice },
    Backspace,
    SetPage { page: u8 },
    Resize { rows: u16, cols: u16 },
    ToggleHelp,
    Skip,
    Log { error: bool, text: String },
}

#[derive(Debug, Clone, Arbitrary)]
enum KeyChoice {
    Char(char),
    Text(String),
    EscapeOnly,
    Csi { params: String, final_byte: u8 },
    Osc { body: String },
}

fn end_reason(choice: u8) -> EndReason {
    match choice % 6 {
        0 => EndReason::SetupError,
        1 => EndReason::MatchError,
        2 => EndReason::Normal,
        3 => EndReason::TimedOut,
        4 => EndReason::Disconnected,
        _ => EndReason::Gone,
    }
}

fn page(choice: u8) -> Page {
    match choice % 4 {
        0 => Page::Confirm,
        1 => Page::Permissions,
        2 => Page::Chat,
        _ => Page::GlobalError,
    }
}

fn key(choice: KeyChoice) -> String {
    match choice {
        KeyChoice::Char(c) => c.to_string(),
        KeyChoice::Text(text) => text,
        KeyChoice::EscapeOnly => "\u{1b}".to_string(),
        KeyChoice::Csi { params, final_byte } => {
            format!("\u{1b}[{params}{}", char::from(final_byte))
        }
        KeyChoice::Osc { body } => format!("\u{1b}]{body}\u{7}"),
    }
}

/// Map an op to an event. `None` for frames whose buffer does not match.
fn event(op: ReducerOp) -> Option<Event> {
    let event = match op {
        ReducerOp::ConnStarted => Event::ConnStarted,
        ReducerOp::ConnEnded { reason } => Event::conn_ended(end_reason(reason)),
        ReducerOp::DataOpened => Event::DataOpened,
        ReducerOp::ReceivedChat { text } => Event::received_chat(text),
        ReducerOp::SentMessage { text } => Event::sent_message(text),
        ReducerOp::Frame { width, height, len } => {
            let pixels = vec![0; usize::from(len)];
            match VideoFrame::new(u32::from(width), u32::from(height), pixels) {
                Ok(frame) => Event::Frame(Arc::new(frame)),
                Err(_) => {
                    assert_ne!(usize::from(len), usize::from(width) * usize::from(height) * 4);
                    return None;
                }
            }
        }
        ReducerOp::Keypress { key: choice } => Event::Keypress(key(choice)),
        ReducerOp::Backspace => Event::Backspace,
        ReducerOp::SetPage { page: choice } => Event::SetPage(page(choice)),
        ReducerOp::Resize { rows, cols } => Event::Resize(WinSize::new(rows, cols)),
        ReducerOp::ToggleHelp => Event::ToggleHelp,
        ReducerOp::Skip => Event::Skip,
        ReducerOp::Log { error, text } => {
            Event::log(if error { LogLevel::Error } else { LogLevel::Info }, text)
        }
    };
    Some(event)
}

fuzz_target!(|ops: Vec<ReducerOp>| {
    let registry = InvariantRegistry::standard();
    let mut state = State::default();

    for op in ops {
        let Some(event) = event(op) else { continue };

        let before = state.clone();
        let transition = Transition::apply(&state, event);
        assert_eq!(state, before, "reduction mutated the prior snapshot");

        if let Err(violations) = registry.check_all(&transition) {
            panic!("invariant violations after {:?}: {:?}", transition.event, violations);
        }
        state = transition.next;
    }
});
