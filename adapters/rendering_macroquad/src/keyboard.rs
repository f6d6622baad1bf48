use macroquad::input::{is_key_down, KeyCode};
use maw_core::{InputSource, Key};

/// Physical key bound to each game key.
#[must_use]
pub fn key_code(key: Key) -> KeyCode {
    match key {
        Key::MoveForward => KeyCode::W,
        Key::MoveBack => KeyCode::S,
        Key::StrafeLeft => KeyCode::A,
        Key::StrafeRight => KeyCode::D,
        Key::RotateLeft => KeyCode::Q,
        Key::RotateRight => KeyCode::E,
        Key::Attack => KeyCode::Space,
        Key::Exit => KeyCode::Escape,
        Key::CameraLeft => KeyCode::Left,
        Key::CameraRight => KeyCode::Right,
        Key::CameraUp => KeyCode::Up,
        Key::CameraDown => KeyCode::Down,
    }
}

/// Keyboard state polled from macroquad. Only valid inside the window loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadKeyboard;

impl InputSource for MacroquadKeyboard {
    fn is_pressed(&self, key: Key) -> bool {
        is_key_down(key_code(key))
    }
}
