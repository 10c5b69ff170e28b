//! Global keyboard shortcuts.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TogglePlayPause,
    Next,
    Previous,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleShuffle,
    ToggleRepeat,
    Stop,
    /// Seek to `n / 10` of the track.
    SeekTenths(u8),
    /// Focus the song-id prompt.
    OpenPrompt,
    Quit,
}

/// Map a key press to a shortcut. Callers must not consult this while a
/// text prompt has focus.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char(' ') => Action::TogglePlayPause,
        KeyCode::Right => Action::Next,
        KeyCode::Left => Action::Previous,
        KeyCode::Up => Action::VolumeUp,
        KeyCode::Down => Action::VolumeDown,
        KeyCode::Char('m') => Action::ToggleMute,
        KeyCode::Char('s') => Action::ToggleShuffle,
        KeyCode::Char('r') => Action::ToggleRepeat,
        KeyCode::Char('x') => Action::Stop,
        KeyCode::Char('o') | KeyCode::Char('/') => Action::OpenPrompt,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char(c) if c.is_ascii_digit() => Action::SeekTenths(c as u8 - b'0'),
        _ => return None,
    };
    Some(action)
}

/// Key legend rendered in the footer, in display order.
pub const LEGEND: &[(&str, &str)] = &[
    ("space", "play/pause"),
    ("←/→", "prev/next"),
    ("↑/↓", "volume"),
    ("m", "mute"),
    ("s", "shuffle"),
    ("r", "repeat"),
    ("x", "stop"),
    ("0-9", "seek"),
    ("o", "open song ids"),
    ("q", "quit"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_shortcuts() {
        assert_eq!(action_for(key(KeyCode::Char(' '))), Some(Action::TogglePlayPause));
        assert_eq!(action_for(key(KeyCode::Right)), Some(Action::Next));
        assert_eq!(action_for(key(KeyCode::Left)), Some(Action::Previous));
        assert_eq!(action_for(key(KeyCode::Up)), Some(Action::VolumeUp));
        assert_eq!(action_for(key(KeyCode::Down)), Some(Action::VolumeDown));
    }

    #[test]
    fn digits_seek_in_tenths() {
        assert_eq!(action_for(key(KeyCode::Char('0'))), Some(Action::SeekTenths(0)));
        assert_eq!(action_for(key(KeyCode::Char('7'))), Some(Action::SeekTenths(7)));
    }

    #[test]
    fn unknown_keys_and_ctrl_combinations_are_ignored() {
        assert_eq!(action_for(key(KeyCode::Char('z'))), None);
        assert_eq!(action_for(key(KeyCode::Tab)), None);
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }
}
