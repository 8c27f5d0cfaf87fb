use eframe::egui;
use egui::{Key, Modifiers};

use crate::views::ViewerAction;

/// Maps a key press to a viewer action
pub fn action_for_key(key: Key, modifiers: Modifiers) -> Option<ViewerAction> {
    if modifiers.alt {
        return None;
    }
    match key {
        Key::O => Some(ViewerAction::Open),
        Key::ArrowLeft => Some(ViewerAction::PreviousPage),
        Key::ArrowRight => Some(ViewerAction::NextPage),
        Key::Plus | Key::Equals => Some(ViewerAction::ZoomIn),
        Key::Minus => Some(ViewerAction::ZoomOut),
        Key::F if !modifiers.command => Some(ViewerAction::ToggleFit),
        Key::D if !modifiers.command => Some(ViewerAction::ToggleDual),
        _ => None,
    }
}

/// Actions for every key pressed since the last frame, in order
pub fn collect_actions(ctx: &egui::Context) -> Vec<ViewerAction> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => action_for_key(*key, *modifiers),
                _ => None,
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_with_and_without_command() {
        assert_eq!(
            action_for_key(Key::O, Modifiers::NONE),
            Some(ViewerAction::Open)
        );
        assert_eq!(
            action_for_key(Key::O, Modifiers::COMMAND),
            Some(ViewerAction::Open)
        );
    }

    #[test]
    fn test_zoom_keys_accept_command() {
        assert_eq!(
            action_for_key(Key::Plus, Modifiers::COMMAND),
            Some(ViewerAction::ZoomIn)
        );
        assert_eq!(
            action_for_key(Key::Equals, Modifiers::NONE),
            Some(ViewerAction::ZoomIn)
        );
        assert_eq!(
            action_for_key(Key::Minus, Modifiers::NONE),
            Some(ViewerAction::ZoomOut)
        );
    }

    #[test]
    fn test_mode_toggles() {
        assert_eq!(
            action_for_key(Key::F, Modifiers::NONE),
            Some(ViewerAction::ToggleFit)
        );
        assert_eq!(
            action_for_key(Key::D, Modifiers::NONE),
            Some(ViewerAction::ToggleDual)
        );
        assert_eq!(action_for_key(Key::D, Modifiers::COMMAND), None);
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(action_for_key(Key::Q, Modifiers::NONE), None);
        assert_eq!(action_for_key(Key::ArrowRight, Modifiers::ALT), None);
    }
}
