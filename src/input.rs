//! Keyboard tracking and the per-frame input step.

use std::collections::HashSet;

use sdl2::keyboard::Keycode;

use crate::state::FrameState;

/// The keys currently held down.
#[derive(Debug, Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
}

impl KeyboardState {
    pub fn press(&mut self, key: Keycode) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: Keycode) {
        self.down.remove(&key);
    }

    pub fn is_down(&self, key: Keycode) -> bool {
        self.down.contains(&key)
    }
}

/// Applies the held keys to the frame state.
///
/// Escape closes the window, Up and Down nudge the blend parameter once per frame while held.
pub fn process_input(keyboard: &KeyboardState, state: &mut FrameState) {
    if keyboard.is_down(Keycode::Escape) {
        state.should_close = true;
    }
    if keyboard.is_down(Keycode::Up) {
        state.increase_mix();
    }
    if keyboard.is_down(Keycode::Down) {
        state.decrease_mix();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_requests_close() {
        let mut keyboard = KeyboardState::default();
        let mut state = FrameState::default();
        process_input(&keyboard, &mut state);
        assert!(!state.should_close);

        keyboard.press(Keycode::Escape);
        process_input(&keyboard, &mut state);
        assert!(state.should_close);
    }

    #[test]
    fn held_arrow_keys_step_the_mix_each_frame() {
        let mut keyboard = KeyboardState::default();
        let mut state = FrameState::with_mix(0.5);

        keyboard.press(Keycode::Up);
        for _ in 0..3 {
            process_input(&keyboard, &mut state);
        }
        assert_eq!(state.mix_value(), 0.53);

        keyboard.release(Keycode::Up);
        keyboard.press(Keycode::Down);
        for _ in 0..60 {
            process_input(&keyboard, &mut state);
        }
        assert_eq!(state.mix_value(), 0.0);
    }

    #[test]
    fn released_keys_have_no_effect() {
        let mut keyboard = KeyboardState::default();
        keyboard.press(Keycode::Up);
        keyboard.release(Keycode::Up);
        assert!(!keyboard.is_down(Keycode::Up));

        let mut state = FrameState::default();
        process_input(&keyboard, &mut state);
        assert_eq!(state, FrameState::default());
    }
}
