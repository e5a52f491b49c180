// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Only window file-drop events are routed: they feed the intake panel.

use super::Message;
use crate::ui::file_intake;
use iced::{event, window, Subscription};

/// Maps a native event to an intake message, if it is a file drag event.
pub fn route_window_event(event: &event::Event) -> Option<Message> {
    let event::Event::Window(window_event) = event else {
        return None;
    };
    let message = match window_event {
        window::Event::FileDropped(path) => file_intake::Message::FileDropped(path.clone()),
        window::Event::FileHovered(_) => file_intake::Message::FileHovered,
        window::Event::FilesHoveredLeft => file_intake::Message::FilesHoveredLeft,
        _ => return None,
    };
    Some(Message::Intake(message))
}

pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| route_window_event(&event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn file_drop_is_routed_to_intake() {
        let event = event::Event::Window(window::Event::FileDropped(PathBuf::from("a.png")));
        assert!(matches!(
            route_window_event(&event),
            Some(Message::Intake(file_intake::Message::FileDropped(path))) if path == PathBuf::from("a.png")
        ));
    }

    #[test]
    fn hover_events_are_routed() {
        let hovered = event::Event::Window(window::Event::FileHovered(PathBuf::from("a.png")));
        assert!(matches!(
            route_window_event(&hovered),
            Some(Message::Intake(file_intake::Message::FileHovered))
        ));
        let left = event::Event::Window(window::Event::FilesHoveredLeft);
        assert!(matches!(
            route_window_event(&left),
            Some(Message::Intake(file_intake::Message::FilesHoveredLeft))
        ));
    }

    #[test]
    fn other_events_are_ignored() {
        let event = event::Event::Window(window::Event::Focused);
        assert!(route_window_event(&event).is_none());
    }
}
