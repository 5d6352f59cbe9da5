//! Logical input snapshot
//!
//! The host window layer owns raw key events and key-code mapping; the core
//! only ever sees this value type, rebuilt once per tick. Edge queries
//! (`pressed` / `released`) rely on the host calling [`InputSnapshot::begin_tick`]
//! before pumping the tick's events.

/// Logical buttons the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    LeftArrow,
    UpArrow,
    RightArrow,
    DownArrow,

    Left,
    Up,
    Right,
    Down,

    Enter,
    Pause,
    FullscreenToggle,
}

pub const BUTTON_COUNT: usize = 11;

/// Level + edge state for one button
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    pub is_down: bool,
    /// Saw a down/up transition this tick
    pub changed: bool,
}

/// Per-tick snapshot of every logical button
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    buttons: [ButtonState; BUTTON_COUNT],
}

impl InputSnapshot {
    /// Clear the per-tick edge flags; call once before feeding new events
    pub fn begin_tick(&mut self) {
        for state in &mut self.buttons {
            state.changed = false;
        }
    }

    /// Record a key transition from the host event pump
    pub fn set(&mut self, button: Button, down: bool) {
        let state = &mut self.buttons[button as usize];
        state.is_down = down;
        state.changed = true;
    }

    pub fn is_down(&self, button: Button) -> bool {
        self.buttons[button as usize].is_down
    }

    /// Went down this tick
    pub fn pressed(&self, button: Button) -> bool {
        let state = self.buttons[button as usize];
        state.is_down && state.changed
    }

    /// Went up this tick
    pub fn released(&self, button: Button) -> bool {
        let state = self.buttons[button as usize];
        !state.is_down && state.changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressed_is_an_edge() {
        let mut input = InputSnapshot::default();
        input.set(Button::Enter, true);
        assert!(input.is_down(Button::Enter));
        assert!(input.pressed(Button::Enter));
        assert!(!input.released(Button::Enter));

        // held across a tick boundary: still down, no longer an edge
        input.begin_tick();
        assert!(input.is_down(Button::Enter));
        assert!(!input.pressed(Button::Enter));

        input.begin_tick();
        input.set(Button::Enter, false);
        assert!(input.released(Button::Enter));
        assert!(!input.pressed(Button::Enter));
    }

    #[test]
    fn test_buttons_are_independent() {
        let mut input = InputSnapshot::default();
        input.set(Button::UpArrow, true);
        assert!(!input.is_down(Button::Up));
        assert!(!input.pressed(Button::DownArrow));
    }
}
