//! Logical input state
//!
//! The tour reads named axes and buttons (`X Look`, `Digital Yaw`, `Point`, ...)
//! rather than physical keys. Desktop events from winit are translated through
//! [`InputBindings`]; VR controllers or tests can drive the same state directly
//! with [`InputState::set_axis`], [`InputState::press`] and [`InputState::release`].

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Continuous logical axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    XLook,
    YLook,
    DigitalYaw,
    XMove,
    YMove,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Axis::XLook,
        Axis::YLook,
        Axis::DigitalYaw,
        Axis::XMove,
        Axis::YMove,
    ];

    /// Input-manager name of the axis.
    pub fn name(self) -> &'static str {
        match self {
            Axis::XLook => "X Look",
            Axis::YLook => "Y Look",
            Axis::DigitalYaw => "Digital Yaw",
            Axis::XMove => "X Move",
            Axis::YMove => "Y Move",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }

    fn is_look(self) -> bool {
        matches!(self, Axis::XLook | Axis::YLook)
    }
}

/// Logical buttons with press/hold/release edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Reset,
    Point,
    Select,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Reset, Button::Point, Button::Select];

    /// Input-manager name of the button.
    pub fn name(self) -> &'static str {
        match self {
            Button::Reset => "Reset",
            Button::Point => "Point",
            Button::Select => "Select",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

/// What a physical key drives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Binding {
    Button(Button),
    /// Contributes `value` to `axis` while held.
    Axis { axis: Axis, value: f32 },
}

/// Physical-to-logical input mapping for desktop play.
#[derive(Clone, Debug)]
pub struct InputBindings {
    pub keys: Vec<(KeyCode, Binding)>,
    pub mouse_buttons: Vec<(MouseButton, Button)>,
    /// Scale from raw mouse counts to look-axis units
    pub mouse_sensitivity: f32,
}

impl Default for InputBindings {
    fn default() -> Self {
        let axis = |axis, value| Binding::Axis { axis, value };
        Self {
            keys: vec![
                (KeyCode::KeyQ, axis(Axis::DigitalYaw, -1.0)),
                (KeyCode::KeyE, axis(Axis::DigitalYaw, 1.0)),
                (KeyCode::KeyW, axis(Axis::YMove, 1.0)),
                (KeyCode::KeyS, axis(Axis::YMove, -1.0)),
                (KeyCode::KeyA, axis(Axis::XMove, -1.0)),
                (KeyCode::KeyD, axis(Axis::XMove, 1.0)),
                (KeyCode::KeyR, Binding::Button(Button::Reset)),
            ],
            mouse_buttons: vec![
                (MouseButton::Left, Button::Point),
                (MouseButton::Right, Button::Select),
            ],
            mouse_sensitivity: 0.1,
        }
    }
}

impl InputBindings {
    fn key(&self, key: KeyCode) -> Option<Binding> {
        self.keys.iter().find(|(k, _)| *k == key).map(|(_, b)| *b)
    }

    fn mouse_button(&self, button: MouseButton) -> Option<Button> {
        self.mouse_buttons
            .iter()
            .find(|(b, _)| *b == button)
            .map(|(_, l)| *l)
    }
}

/// Tracks logical input state for one frame
pub struct InputState {
    bindings: InputBindings,
    /// Axis values set directly (controllers, tests)
    axis_values: [f32; 5],
    /// Physical keys currently held
    keys_held: HashSet<KeyCode>,
    /// Raw mouse movement accumulated this frame
    mouse_delta: (f32, f32),
    /// Logical buttons currently held
    buttons_held: HashSet<Button>,
    /// Buttons pressed this frame
    buttons_just_pressed: HashSet<Button>,
    /// Buttons released this frame
    buttons_just_released: HashSet<Button>,
}

impl InputState {
    /// Create new input state with the default desktop bindings
    pub fn new() -> Self {
        Self::with_bindings(InputBindings::default())
    }

    pub fn with_bindings(bindings: InputBindings) -> Self {
        Self {
            bindings,
            axis_values: [0.0; 5],
            keys_held: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            buttons_held: HashSet::new(),
            buttons_just_pressed: HashSet::new(),
            buttons_just_released: HashSet::new(),
        }
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state,
                    repeat: false,
                    ..
                },
                ..
            } => match state {
                ElementState::Pressed => self.press_key(*key_code),
                ElementState::Released => self.release_key(*key_code),
            },
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(logical) = self.bindings.mouse_button(*button) {
                    match state {
                        ElementState::Pressed => self.press(logical),
                        ElementState::Released => self.release(logical),
                    }
                }
            }
            _ => {}
        }
    }

    /// Process device event for raw mouse motion
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_delta.0 += delta.0 as f32;
        self.mouse_delta.1 += delta.1 as f32;
    }

    /// Physical key went down.
    pub fn press_key(&mut self, key: KeyCode) {
        self.keys_held.insert(key);
        if let Some(Binding::Button(button)) = self.bindings.key(key) {
            self.press(button);
        }
    }

    /// Physical key went up.
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        if let Some(Binding::Button(button)) = self.bindings.key(key) {
            self.release(button);
        }
    }

    /// Logical button went down. Repeated presses while held are not edges.
    pub fn press(&mut self, button: Button) {
        if self.buttons_held.insert(button) {
            self.buttons_just_pressed.insert(button);
        }
    }

    /// Logical button went up.
    pub fn release(&mut self, button: Button) {
        if self.buttons_held.remove(&button) {
            self.buttons_just_released.insert(button);
        }
    }

    /// Set an axis directly. The value persists until changed.
    pub fn set_axis(&mut self, axis: Axis, value: f32) {
        self.axis_values[axis.index()] = value;
    }

    /// Raw axis value: direct value plus whatever bound keys or the mouse add.
    pub fn axis(&self, axis: Axis) -> f32 {
        let mut value = self.axis_values[axis.index()];

        match axis {
            // Mouse Y grows downward; look-up is positive
            Axis::XLook => value += self.mouse_delta.0 * self.bindings.mouse_sensitivity,
            Axis::YLook => value -= self.mouse_delta.1 * self.bindings.mouse_sensitivity,
            _ => {}
        }

        let from_keys: f32 = self
            .keys_held
            .iter()
            .filter_map(|k| match self.bindings.key(*k) {
                Some(Binding::Axis { axis: a, value }) if a == axis => Some(value),
                _ => None,
            })
            .sum();
        value += from_keys;

        if axis.is_look() {
            value
        } else {
            value.clamp(-1.0, 1.0)
        }
    }

    /// Check if button is held
    pub fn is_button_down(&self, button: Button) -> bool {
        self.buttons_held.contains(&button)
    }

    /// Check if button was pressed this frame
    pub fn is_button_just_pressed(&self, button: Button) -> bool {
        self.buttons_just_pressed.contains(&button)
    }

    /// Check if button was released this frame
    pub fn is_button_just_released(&self, button: Button) -> bool {
        self.buttons_just_released.contains(&button)
    }

    /// Call at end of frame to reset per-frame state
    pub fn end_frame(&mut self) {
        self.buttons_just_pressed.clear();
        self.buttons_just_released.clear();
        self.mouse_delta = (0.0, 0.0);
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
