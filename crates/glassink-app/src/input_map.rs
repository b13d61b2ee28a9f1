//! Translation from winit input to engine input.

use glassink_core::{Key, Modifiers, MouseButton};
use winit::event::{MouseButton as WinitButton, MouseScrollDelta};
use winit::keyboard::{Key as WinitKey, ModifiersState, NamedKey};

/// Pixels per wheel line, for devices that report pixel deltas.
const PIXELS_PER_LINE: f64 = 20.0;

pub fn mouse_button(button: WinitButton) -> Option<MouseButton> {
    match button {
        WinitButton::Left => Some(MouseButton::Left),
        WinitButton::Right => Some(MouseButton::Right),
        WinitButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

pub fn modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

pub fn key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::F1) => Key::F1,
        WinitKey::Named(NamedKey::F2) => Key::F2,
        WinitKey::Named(NamedKey::F3) => Key::F3,
        WinitKey::Named(NamedKey::Backspace) => Key::Backspace,
        WinitKey::Named(NamedKey::Space) => Key::Space,
        WinitKey::Character(c) if c.as_str() == " " => Key::Space,
        WinitKey::Character(c) => Key::Character(c.to_string()),
        _ => Key::Other,
    }
}

/// Vertical wheel delta in the engine's convention: positive scrolls down.
///
/// winit reports scrolling up (away from the user) as positive.
pub fn wheel_delta(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -(y as f64),
        MouseScrollDelta::PixelDelta(pos) => -pos.y / PIXELS_PER_LINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_buttons() {
        assert_eq!(mouse_button(WinitButton::Middle), Some(MouseButton::Middle));
        assert_eq!(mouse_button(WinitButton::Back), None);
    }

    #[test]
    fn test_keys() {
        assert_eq!(key(&WinitKey::Named(NamedKey::F2)), Key::F2);
        assert_eq!(key(&WinitKey::Named(NamedKey::Space)), Key::Space);
        assert_eq!(key(&WinitKey::Character("z".into())), Key::char('z'));
        assert_eq!(key(&WinitKey::Named(NamedKey::Tab)), Key::Other);
    }

    #[test]
    fn test_modifiers() {
        let mods = modifiers(ModifiersState::CONTROL | ModifiersState::SHIFT);
        assert!(mods.ctrl && mods.shift && !mods.meta);
        assert!(modifiers(ModifiersState::SUPER).command());
    }

    #[test]
    fn test_wheel_direction() {
        // Scrolling up zooms in, which the engine expects as a negative delta.
        assert!(wheel_delta(MouseScrollDelta::LineDelta(0.0, 1.0)) < 0.0);
        assert!(wheel_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0))) > 0.0);
        assert_eq!(wheel_delta(MouseScrollDelta::LineDelta(3.0, 0.0)), 0.0);
    }
}
