use std::collections::HashMap;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Input actions produced by the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    None,
    Reveal,
    ToggleSpeed,
    BetUp,
    BetDown,
    Quit,
}

/// Input trait that maps window events into stage actions.
pub trait Input {
    fn handle_window_event(&mut self, event: &WindowEvent) -> InputAction;
}

/// Key-to-action table.
#[derive(Clone, Debug)]
pub struct ConfigurableInput {
    key_map: HashMap<KeyCode, InputAction>,
}

impl ConfigurableInput {
    pub fn new(key_map: HashMap<KeyCode, InputAction>) -> Self {
        Self { key_map }
    }

    pub fn action_for(&self, key: KeyCode) -> InputAction {
        self.key_map.get(&key).copied().unwrap_or(InputAction::None)
    }
}

impl Default for ConfigurableInput {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(KeyCode::Space, InputAction::Reveal);
        map.insert(KeyCode::Enter, InputAction::Reveal);
        map.insert(KeyCode::KeyF, InputAction::ToggleSpeed);
        map.insert(KeyCode::ArrowUp, InputAction::BetUp);
        map.insert(KeyCode::ArrowRight, InputAction::BetUp);
        map.insert(KeyCode::ArrowDown, InputAction::BetDown);
        map.insert(KeyCode::ArrowLeft, InputAction::BetDown);
        map.insert(KeyCode::Escape, InputAction::Quit);

        Self { key_map: map }
    }
}

impl Input for ConfigurableInput {
    fn handle_window_event(&mut self, event: &WindowEvent) -> InputAction {
        if let WindowEvent::KeyboardInput {
            event: key_event, ..
        } = event
        {
            if key_event.state == ElementState::Pressed && !key_event.repeat {
                if let PhysicalKey::Code(key) = key_event.physical_key {
                    return self.action_for(key);
                }
            }
        }
        InputAction::None
    }
}
