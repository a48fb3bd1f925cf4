//! Translation of winit input into simulation events

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

use sandfall_core::{InputEvent, PointerButton};

/// Left paints, right erases
pub fn map_mouse_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Keyboard shortcuts
pub fn map_key(key: KeyCode) -> Option<InputEvent> {
    match key {
        KeyCode::Space => Some(InputEvent::TogglePause),
        KeyCode::KeyS => Some(InputEvent::Step),
        KeyCode::KeyC => Some(InputEvent::Clear),
        KeyCode::KeyR => Some(InputEvent::Reset),
        KeyCode::BracketLeft => Some(InputEvent::Wheel(-1.0)),
        KeyCode::BracketRight => Some(InputEvent::Wheel(1.0)),
        KeyCode::Escape => Some(InputEvent::Shutdown),
        _ => None,
    }
}

/// Vertical wheel movement; positive means scrolling up
pub fn wheel_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
    }
}

/// Cursor position rescaled from the actual surface to the nominal canvas
/// (`grid size * pixel size`), so the window can be resized by the OS without
/// breaking the pixel-to-cell mapping.
pub fn canvas_position(
    position: PhysicalPosition<f64>,
    surface: PhysicalSize<u32>,
    canvas: (u32, u32),
) -> (f64, f64) {
    let scale = |value: f64, actual: u32, nominal: u32| {
        if actual == 0 {
            value
        } else {
            value * f64::from(nominal) / f64::from(actual)
        }
    };
    (
        scale(position.x, surface.width, canvas.0),
        scale(position.y, surface.height, canvas.1),
    )
}
