//! Pointer input model and event source

use std::collections::VecDeque;

/// Pointer buttons the sandbox reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button, paints sand
    Primary,
    /// Right button, erases
    Secondary,
}

/// Discrete input events consumed once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ButtonPressed(PointerButton),
    ButtonReleased(PointerButton),
    /// Absolute pointer position in window pixels
    PointerMoved { x: f64, y: f64 },
    PointerLeft,
    /// Signed wheel delta; only the sign is used
    Wheel(f32),
    TogglePause,
    /// Run a single tick while paused
    Step,
    Clear,
    /// Refill the grid with noise
    Reset,
    Shutdown,
}

/// Non-blocking source of pending input events
pub trait InputSource {
    /// Next pending event, or `None` once drained for this frame
    fn poll_event(&mut self) -> Option<InputEvent>;
}

impl InputSource for VecDeque<InputEvent> {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.pop_front()
    }
}

/// Tracks pointer position and button state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerState {
    /// Last pointer position in window pixels
    pub position: Option<(f64, f64)>,
    pub painting: bool,
    pub erasing: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&mut self, button: PointerButton, pressed: bool) {
        match button {
            PointerButton::Primary => self.painting = pressed,
            PointerButton::Secondary => self.erasing = pressed,
        }
    }

    /// Pointer left the window: forget position and release both buttons
    pub fn leave(&mut self) {
        self.position = None;
        self.painting = false;
        self.erasing = false;
    }

    /// Pointer position in grid cells as `(x, y)`, possibly outside the grid
    pub fn grid_position(&self, pixel_size: u32) -> Option<(i32, i32)> {
        let (x, y) = self.position?;
        Some((
            pixel_to_cell(x, pixel_size),
            pixel_to_cell(y, pixel_size),
        ))
    }
}

/// `floor(pixel / pixel_size)`, saturating into `i32`
pub fn pixel_to_cell(pixel: f64, pixel_size: u32) -> i32 {
    (pixel / f64::from(pixel_size.max(1))).floor() as i32
}
