use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information and the pointer position. Per-frame
/// transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,

    /// Pointer position in physical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered to an unfocused window.
                    for button in self.buttons_down.drain() {
                        frame.buttons_released.insert(button);
                    }
                    self.keys_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
                frame.pointer_moved = true;
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    pub fn pointer_x(&self) -> Option<f32> {
        self.pointer_pos.map(|(x, _)| x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(state: MouseButtonState, x: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y: 0.0,
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn press_and_release_are_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, button(MouseButtonState::Pressed, 10.0));
        state.apply_event(&mut frame, button(MouseButtonState::Pressed, 10.0));
        assert!(state.button_down(MouseButton::Left));
        assert_eq!(frame.buttons_pressed.len(), 1);
        assert_eq!(state.pointer_x(), Some(10.0));

        frame.clear();
        state.apply_event(&mut frame, button(MouseButtonState::Released, 30.0));
        assert!(!state.button_down(MouseButton::Left));
        assert!(frame.buttons_released.contains(&MouseButton::Left));
    }

    #[test]
    fn focus_loss_releases_held_buttons() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, button(MouseButtonState::Pressed, 0.0));
        frame.clear();

        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(state.buttons_down.is_empty());
        assert!(frame.buttons_released.contains(&MouseButton::Left));
    }

    #[test]
    fn pointer_motion_sets_flag_until_cleared() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 5.0, y: 6.0 }));
        assert!(frame.pointer_moved);
        frame.clear();
        assert!(!frame.pointer_moved);
        assert_eq!(state.pointer_pos, Some((5.0, 6.0)));
    }
}
