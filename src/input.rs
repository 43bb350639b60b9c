use std::collections::{HashMap, HashSet};

use winit::keyboard::KeyCode;

use crate::game::Controls;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
	MoveForward, MoveBackward, TurnLeft, TurnRight, ToggleMinimap, ToggleShading
}

pub struct InputState {
	action_binding: HashMap<Action, HashSet<KeyCode>>,
	key_state: HashMap<KeyCode, u32>
}

impl InputState {
	const JUST: u32		= 0b01;
	const PRESSED: u32	= 0b10;
}

impl Default for InputState {
	fn default() -> Self {
		let mut input_state = Self { action_binding: HashMap::new(), key_state: HashMap::new() };

		input_state.bind_action(Action::MoveForward, KeyCode::KeyW);
		input_state.bind_action(Action::MoveForward, KeyCode::ArrowUp);
		input_state.bind_action(Action::MoveBackward, KeyCode::KeyS);
		input_state.bind_action(Action::MoveBackward, KeyCode::ArrowDown);
		input_state.bind_action(Action::TurnLeft, KeyCode::KeyA);
		input_state.bind_action(Action::TurnLeft, KeyCode::ArrowLeft);
		input_state.bind_action(Action::TurnRight, KeyCode::KeyD);
		input_state.bind_action(Action::TurnRight, KeyCode::ArrowRight);
		input_state.bind_action(Action::ToggleMinimap, KeyCode::KeyM);
		input_state.bind_action(Action::ToggleMinimap, KeyCode::Tab);
		input_state.bind_action(Action::ToggleShading, KeyCode::KeyN);

		input_state
	}
}

impl InputState {

	// key binding

	pub fn bind_action(&mut self, action: Action, key: KeyCode) {
		self.action_binding.entry(action).or_default().insert(key);
	}

	pub fn unbind_action(&mut self, action: Action, key: KeyCode) {
		if let Some(keys) = self.action_binding.get_mut(&action) {
			keys.remove(&key);
		}
	}


	// key action press and release

	pub fn set_key_state(&mut self, key: KeyCode, pressed: bool) {
		let was_pressed = self.key_state.get(&key).is_some_and(|state| state & Self::PRESSED != 0);
		let state = match (pressed, was_pressed) {
			(true, false) => Self::JUST | Self::PRESSED,
			(true, true) => self.key_state.get(&key).copied().unwrap_or(Self::PRESSED),
			(false, _) => 0
		};
		self.key_state.insert(key, state);
	}

	fn any_key(&self, action: Action, flag: u32) -> bool {
		self.action_binding.get(&action).is_some_and(|keys|
			keys.iter().any(|key| self.key_state.get(key).is_some_and(|state| state & flag == flag))
		)
	}

	pub fn is_action_pressed(&self, action: Action) -> bool {
		self.any_key(action, Self::PRESSED)
	}

	/// Pressed since the last [`InputState::end_frame`].
	pub fn is_action_just_pressed(&self, action: Action) -> bool {
		self.any_key(action, Self::JUST | Self::PRESSED)
	}

	/// Held keys stay held, edges are forgotten.
	pub fn end_frame(&mut self) {
		for state in self.key_state.values_mut() {
			*state &= !Self::JUST;
		}
	}

	pub fn controls(&self) -> Controls {
		Controls {
			turn_left: self.is_action_pressed(Action::TurnLeft),
			turn_right: self.is_action_pressed(Action::TurnRight),
			move_forward: self.is_action_pressed(Action::MoveForward),
			move_backward: self.is_action_pressed(Action::MoveBackward)
		}
	}
}


#[test]
fn held_keys_map_to_controls() {
	let mut input_state = InputState::default();
	input_state.set_key_state(KeyCode::KeyW, true);
	input_state.set_key_state(KeyCode::ArrowLeft, true);
	assert_eq!(input_state.controls(), Controls { turn_left: true, move_forward: true, ..Default::default() });
	input_state.set_key_state(KeyCode::KeyW, false);
	assert!(!input_state.controls().move_forward);
}

#[test]
fn just_pressed_lasts_one_frame() {
	let mut input_state = InputState::default();
	input_state.set_key_state(KeyCode::KeyN, true);
	assert!(input_state.is_action_just_pressed(Action::ToggleShading));
	input_state.end_frame();
	assert!(!input_state.is_action_just_pressed(Action::ToggleShading));
	assert!(input_state.is_action_pressed(Action::ToggleShading));
	// key repeat while held is not a new press
	input_state.set_key_state(KeyCode::KeyN, true);
	assert!(!input_state.is_action_just_pressed(Action::ToggleShading));
}

#[test]
fn unbound_key_does_nothing() {
	let mut input_state = InputState::default();
	input_state.unbind_action(Action::MoveForward, KeyCode::KeyW);
	input_state.set_key_state(KeyCode::KeyW, true);
	assert!(!input_state.is_action_pressed(Action::MoveForward));
}
