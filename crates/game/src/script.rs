//! Scripted input playback.
//!
//! The demo has no window, so keyboard and mouse events come from a list
//! of timed events in the config and are fed into [`InputState`] exactly
//! as a window event loop would.

use input::{ElementState, InputState, KeyCode, MouseButton};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    /// Relative mouse motion in pixels.
    MouseMove(f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    /// Tick on which the event is delivered.
    pub tick: u64,
    pub event: InputEvent,
}

/// Plays back scripted events in tick order.
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    events: Vec<ScriptedEvent>,
    cursor: usize,
}

impl InputScript {
    pub fn new(mut events: Vec<ScriptedEvent>) -> Self {
        events.sort_by_key(|event| event.tick);
        Self { events, cursor: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }

    /// Deliver every event scheduled at or before `tick`.
    pub fn feed(&mut self, tick: u64, input: &mut InputState) {
        while let Some(scripted) = self.events.get(self.cursor) {
            if scripted.tick > tick {
                break;
            }
            log::trace!("tick {tick}: {:?}", scripted.event);
            match scripted.event {
                InputEvent::KeyDown(key) => input.process_keyboard(key, ElementState::Pressed),
                InputEvent::KeyUp(key) => input.process_keyboard(key, ElementState::Released),
                InputEvent::MouseDown(button) => {
                    input.process_mouse_button(button, ElementState::Pressed)
                }
                InputEvent::MouseUp(button) => {
                    input.process_mouse_button(button, ElementState::Released)
                }
                InputEvent::MouseMove(dx, dy) => input.process_mouse_motion((dx, dy)),
            }
            self.cursor += 1;
        }
    }
}

/// Walk forward, strafe, jump, drag the camera around, stop.
pub fn default_script() -> Vec<ScriptedEvent> {
    let at = |tick, event| ScriptedEvent { tick, event };
    let mut events = vec![
        at(30, InputEvent::KeyDown(KeyCode::KeyW)),
        at(120, InputEvent::KeyDown(KeyCode::KeyD)),
        at(150, InputEvent::KeyUp(KeyCode::KeyD)),
        at(180, InputEvent::KeyDown(KeyCode::Space)),
        at(184, InputEvent::KeyUp(KeyCode::Space)),
        at(240, InputEvent::MouseDown(MouseButton::Left)),
    ];
    events.extend((241..271).map(|tick| at(tick, InputEvent::MouseMove(12.0, 0.0))));
    events.extend([
        at(272, InputEvent::MouseUp(MouseButton::Left)),
        at(330, InputEvent::KeyDown(KeyCode::Space)),
        at(331, InputEvent::KeyUp(KeyCode::Space)),
        at(420, InputEvent::KeyUp(KeyCode::KeyW)),
    ]);
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feeds_events_up_to_the_current_tick() {
        let mut script = InputScript::new(vec![
            ScriptedEvent {
                tick: 5,
                event: InputEvent::KeyUp(KeyCode::KeyW),
            },
            ScriptedEvent {
                tick: 2,
                event: InputEvent::KeyDown(KeyCode::KeyW),
            },
        ]);
        let mut input = InputState::new();

        script.feed(1, &mut input);
        assert!(!input.is_key_held(KeyCode::KeyW));
        script.feed(3, &mut input);
        assert!(input.is_key_held(KeyCode::KeyW));
        script.feed(5, &mut input);
        assert!(!input.is_key_held(KeyCode::KeyW));
        assert!(script.is_finished());
    }

    #[test]
    fn default_script_is_ordered_and_releases_everything() {
        let events = default_script();
        let mut input = InputState::new();
        let mut script = InputScript::new(events);
        script.feed(u64::MAX, &mut input);
        assert!(!input.is_key_held(KeyCode::KeyW));
        assert!(!input.is_key_held(KeyCode::Space));
        assert!(!input.is_mouse_held(MouseButton::Left));
    }

    #[test]
    fn events_parse_from_ron() {
        let events: Vec<ScriptedEvent> = ron::from_str(
            "[(tick: 3, event: KeyDown(KeyW)), (tick: 4, event: MouseMove(1.5, 0.0))]",
        )
        .unwrap();
        assert_eq!(events[0].event, InputEvent::KeyDown(KeyCode::KeyW));
        assert_eq!(events[1].event, InputEvent::MouseMove(1.5, 0.0));
    }
}
