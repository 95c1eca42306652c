//! Property-based tests for the reducer.
//!
//! Tests verify that field-level guarantees hold under arbitrary event
//! sequences, not just the scripted sessions in `reducer_scenarios.rs`.

use std::sync::Arc;

use dialtone_app::{
    EndReason, Event, LogLevel, Page, State, VideoFrame, WinSize, reduce, sanitize::sanitize,
};
use proptest::prelude::*;

fn reason_strategy() -> impl Strategy<Value = EndReason> {
    prop_oneof![
        Just(EndReason::SetupError),
        Just(EndReason::MatchError),
        Just(EndReason::Normal),
        Just(EndReason::TimedOut),
        Just(EndReason::Disconnected),
        Just(EndReason::Gone),
    ]
}

fn page_strategy() -> impl Strategy<Value = Page> {
    prop_oneof![
        Just(Page::Confirm),
        Just(Page::Permissions),
        Just(Page::Chat),
        Just(Page::GlobalError),
    ]
}

/// Key payloads: plain characters, arbitrary code points and escape
/// fragments that only form a sequence when combined.
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-zA-Z0-9 ]".prop_map(String::from),
        2 => any::<char>().prop_map(String::from),
        1 => Just("\u{1b}".to_string()),
        1 => Just("[".to_string()),
        1 => Just("\u{1b}[31m".to_string()),
        1 => Just("\u{9b}2J".to_string()),
        1 => Just("\u{1b}]0;title\u{7}".to_string()),
        1 => "\\PC{0,4}",
    ]
}

fn frame_strategy() -> impl Strategy<Value = Arc<VideoFrame>> {
    (0u32..3, 0u32..3).prop_map(|(w, h)| {
        Arc::new(VideoFrame::new(w, h, vec![0; (w * h * 4) as usize]).expect("sized buffer"))
    })
}

/// Generate random events, weighted toward an open chat.
fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        2 => Just(Event::ConnStarted),
        2 => reason_strategy().prop_map(Event::conn_ended),
        3 => Just(Event::DataOpened),
        2 => "\\PC{0,12}".prop_map(Event::received_chat),
        2 => "\\PC{0,12}".prop_map(Event::sent_message),
        2 => frame_strategy().prop_map(Event::Frame),
        8 => key_strategy().prop_map(Event::Keypress),
        3 => Just(Event::Backspace),
        1 => page_strategy().prop_map(Event::SetPage),
        1 => (any::<u16>(), any::<u16>()).prop_map(|(r, c)| Event::Resize(WinSize::new(r, c))),
        1 => Just(Event::ToggleHelp),
        1 => Just(Event::Skip),
        1 => (any::<bool>(), "\\PC{0,12}").prop_map(|(err, text)| {
            Event::log(if err { LogLevel::Error } else { LogLevel::Info }, text)
        }),
    ]
}

/// Reachable state: the reducer applied to a random prefix.
fn state_strategy() -> impl Strategy<Value = State> {
    prop::collection::vec(event_strategy(), 0..30)
        .prop_map(|events| events.iter().fold(State::default(), |s, e| reduce(&s, e)))
}

fn affects_image(event: &Event) -> bool {
    matches!(event, Event::Frame(_) | Event::SetPage(_) | Event::Skip)
}

fn affects_chat_active(event: &Event) -> bool {
    matches!(event, Event::DataOpened | Event::ConnEnded { .. })
}

fn affects_input(event: &Event) -> bool {
    matches!(
        event,
        Event::ConnStarted | Event::SentMessage { .. } | Event::Keypress(_) | Event::Backspace
    )
}

fn affects_messages(event: &Event) -> bool {
    matches!(
        event,
        Event::SentMessage { .. }
            | Event::ReceivedChat { .. }
            | Event::ConnStarted
            | Event::Log { .. }
            | Event::ConnEnded { .. }
    )
}

fn affects_help(event: &Event) -> bool {
    matches!(event, Event::ToggleHelp | Event::Skip | Event::SentMessage { .. })
}

proptest! {
    #[test]
    fn prop_unrelated_events_leave_fields_alone(state in state_strategy(), event in event_strategy()) {
        let next = reduce(&state, &event);

        if !affects_image(&event) {
            prop_assert_eq!(next.image(), state.image());
        }
        if !affects_chat_active(&event) {
            prop_assert_eq!(next.chat_active(), state.chat_active());
        }
        if !affects_input(&event) {
            prop_assert_eq!(next.input(), state.input());
        }
        if !affects_messages(&event) {
            prop_assert!(next.messages().ptr_eq(state.messages()));
        }
        if !matches!(event, Event::SetPage(_)) {
            prop_assert_eq!(next.page(), state.page());
        }
        if !matches!(event, Event::Resize(_)) {
            prop_assert_eq!(next.win_size(), state.win_size());
        }
        if !affects_help(&event) {
            prop_assert_eq!(next.help_on(), state.help_on());
        }
    }

    #[test]
    fn prop_transcript_is_append_only(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut state = State::default();

        for event in &events {
            let next = reduce(&state, event);
            let (before, after) = (state.messages().as_slice(), next.messages().as_slice());

            prop_assert!(after.len() == before.len() || after.len() == before.len() + 1);
            prop_assert_eq!(&after[..before.len()], before);
            state = next;
        }
    }

    #[test]
    fn prop_input_always_sanitized(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut state = State::default();

        for event in &events {
            state = reduce(&state, event);
            prop_assert_eq!(sanitize(state.input()), state.input());
            let has_escape = state.input().contains(['\u{1b}', '\u{9b}']);
            prop_assert!(!has_escape);
        }
    }

    #[test]
    fn prop_sanitize_is_idempotent(text in any::<String>(), extra in key_strategy()) {
        let once = sanitize(&format!("{text}{extra}"));
        prop_assert_eq!(sanitize(&once), once.clone());
    }

    #[test]
    fn prop_backspace_removes_one_code_point(state in state_strategy()) {
        let opened = reduce(&state, &Event::DataOpened);
        let next = reduce(&opened, &Event::Backspace);

        let before: Vec<char> = opened.input().chars().collect();
        let after: Vec<char> = next.input().chars().collect();
        if before.is_empty() {
            prop_assert!(after.is_empty());
        } else {
            prop_assert_eq!(after.as_slice(), &before[..before.len() - 1]);
        }
    }

    #[test]
    fn prop_chat_active_tracks_last_lifecycle_event(events in prop::collection::vec(event_strategy(), 0..60)) {
        let state = events.iter().fold(State::default(), |s, e| reduce(&s, e));

        let expected = events
            .iter()
            .rev()
            .find_map(|e| match e {
                Event::DataOpened => Some(true),
                Event::ConnEnded { .. } => Some(false),
                _ => None,
            })
            .unwrap_or(false);
        prop_assert_eq!(state.chat_active(), expected);
    }

    #[test]
    fn prop_inactive_chat_ignores_keys(key in key_strategy(), reason in reason_strategy(), state in state_strategy()) {
        let closed = reduce(&state, &Event::conn_ended(reason));
        let next = reduce(&closed, &Event::Keypress(key));

        prop_assert_eq!(next.input(), closed.input());
    }

    #[test]
    fn prop_reduce_is_deterministic(state in state_strategy(), event in event_strategy()) {
        prop_assert_eq!(reduce(&state, &event), reduce(&state, &event));
    }
}
