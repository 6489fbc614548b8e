#[derive(Debug)]
pub struct Input {
    buttons: [ButtonState; 6],
    held_frames: [u32; 6],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up = 0,
    Down,
    Left,
    Right,
    /// Activate: presses the play button.
    A,
    /// Modifier: coarse steps while held.
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    JustPressed,
    Pressed,
    JustReleased,
    Released,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        Self {
            buttons: [ButtonState::Released; 6],
            held_frames: [0; 6],
        }
    }

    pub fn set_button(&mut self, button: Button, state: ButtonState) {
        self.buttons[button as usize] = state;
        if state == ButtonState::JustPressed {
            self.held_frames[button as usize] = 0;
        }
    }

    /// Press-and-release within a single frame, for front ends that only see
    /// key presses (terminals).
    pub fn tap(&mut self, button: Button) {
        self.set_button(button, ButtonState::JustPressed);
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        let state = self.buttons[button as usize];
        state == ButtonState::JustPressed || state == ButtonState::Pressed
    }

    pub fn is_just_pressed(&self, button: Button) -> bool {
        self.buttons[button as usize] == ButtonState::JustPressed
    }

    /// Frames the button has been held past the frame it went down.
    pub fn held_frames(&self, button: Button) -> u32 {
        self.held_frames[button as usize]
    }

    /// True on the press itself and on every frame once the button has been
    /// held longer than `delay` frames.
    pub fn is_repeating(&self, button: Button, delay: u32) -> bool {
        self.is_just_pressed(button)
            || (self.is_pressed(button) && self.held_frames(button) >= delay)
    }

    /// Ages the button states after the engine consumed a frame. Taps that
    /// were never followed by a key-down report are released here.
    pub fn end_frame(&mut self, keep_held: bool) {
        for (state, held) in self.buttons.iter_mut().zip(self.held_frames.iter_mut()) {
            *state = match *state {
                ButtonState::JustPressed if keep_held => ButtonState::Pressed,
                ButtonState::JustPressed => ButtonState::Released,
                ButtonState::JustReleased => ButtonState::Released,
                other => other,
            };
            if *state == ButtonState::Pressed {
                *held = held.saturating_add(1);
            } else {
                *held = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_then_hold() {
        let mut input = Input::new();
        input.set_button(Button::Left, ButtonState::JustPressed);
        assert!(input.is_just_pressed(Button::Left));
        assert!(input.is_repeating(Button::Left, 3));

        input.end_frame(true);
        assert!(input.is_pressed(Button::Left));
        assert!(!input.is_just_pressed(Button::Left));
        assert!(!input.is_repeating(Button::Left, 3));

        input.end_frame(true);
        input.end_frame(true);
        assert_eq!(input.held_frames(Button::Left), 3);
        assert!(input.is_repeating(Button::Left, 3));
    }

    #[test]
    fn test_tap_releases_after_frame() {
        let mut input = Input::new();
        input.tap(Button::A);
        assert!(input.is_just_pressed(Button::A));

        input.end_frame(false);
        assert!(!input.is_pressed(Button::A));
        assert_eq!(input.held_frames(Button::A), 0);
    }

    #[test]
    fn test_release_clears_hold() {
        let mut input = Input::new();
        input.set_button(Button::Right, ButtonState::JustPressed);
        input.end_frame(true);
        input.set_button(Button::Right, ButtonState::JustReleased);
        input.end_frame(true);
        assert!(!input.is_pressed(Button::Right));
        assert_eq!(input.held_frames(Button::Right), 0);
    }
}
