use std::time::Duration;

use crate::{
    color::{self, Rgb},
    error::PadError,
    keycode::{ConsumerCode, Keycode},
    transport::KEY_COUNT,
};

#[derive(Debug, Clone, PartialEq)]
pub enum MacroStep {
    Keys(Vec<Keycode>),
    Media(ConsumerCode),
    Pause(Duration),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    KeyCombo(Vec<Keycode>),
    Media(ConsumerCode),
    Macro(Vec<MacroStep>),
    // Resets the activity timer and nothing else.
    Wake,
}

impl Action {
    pub fn is_bound(&self) -> bool {
        !matches!(self, Action::None)
    }

    pub fn default_press_color(&self) -> Option<Rgb> {
        match self {
            Action::KeyCombo(_) => Some(color::CYAN),
            Action::Media(_) | Action::Macro(_) => Some(color::GOLD),
            Action::None | Action::Wake => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub action: Action,
    pub press_color: Rgb,
    pub standby_color: Rgb,
}

impl KeyBinding {
    pub fn new(action: Action, press_color: Rgb) -> Self {
        Self {
            action,
            press_color,
            standby_color: press_color,
        }
    }

    pub fn with_default_color(action: Action) -> Self {
        let press_color = action.default_press_color().unwrap_or(color::WHITE);
        Self::new(action, press_color)
    }

    pub fn unbound(color: Rgb) -> Self {
        Self::new(Action::None, color)
    }

    pub fn standby(mut self, standby_color: Rgb) -> Self {
        self.standby_color = standby_color;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    bindings: [KeyBinding; KEY_COUNT],
}

impl KeyMap {
    pub fn from_bindings<I>(unbound_color: Rgb, bindings: I) -> Result<Self, PadError>
    where
        I: IntoIterator<Item = (usize, KeyBinding)>,
    {
        let mut slots: [KeyBinding; KEY_COUNT] =
            std::array::from_fn(|_| KeyBinding::unbound(unbound_color));

        let mut seen = [false; KEY_COUNT];

        for (index, binding) in bindings {
            let slot = slots
                .get_mut(index)
                .ok_or(PadError::InvalidKeyIndex(index))?;
            if seen[index] {
                return Err(PadError::DuplicateBinding(index));
            }
            seen[index] = true;
            *slot = binding;
        }

        Ok(Self { bindings: slots })
    }

    pub fn default_layout(unbound_color: Rgb) -> Result<Self, PadError> {
        use crate::keycode::Keycode as K;

        let bindings = vec![
            (0, KeyBinding::with_default_color(Action::KeyCombo(vec![K::CONTROL, K::S]))),
            (2, KeyBinding::new(Action::KeyCombo(vec![K::WINDOWS, K::Two]), color::PURPLE)),
            (3, KeyBinding::new(Action::KeyCombo(vec![K::WINDOWS, K::One]), color::RED)),
            (7, KeyBinding::new(Action::KeyCombo(vec![K::CONTROL, K::One]), color::RED)),
            (10, KeyBinding::new(Action::KeyCombo(vec![K::SHIFT, K::F10]), color::GREEN)),
            (11, KeyBinding::new(Action::KeyCombo(vec![K::CONTROL, K::Two]), color::RED)),
            (12, KeyBinding::with_default_color(Action::Media(ConsumerCode::Mute))),
            (13, KeyBinding::with_default_color(Action::Media(ConsumerCode::ScanNextTrack))),
            (14, KeyBinding::with_default_color(Action::Media(ConsumerCode::PlayPause))),
            (15, KeyBinding::with_default_color(Action::Media(ConsumerCode::ScanPreviousTrack))),
        ];

        Self::from_bindings(unbound_color, bindings)
    }

    pub fn get(&self, index: usize) -> Result<&KeyBinding, PadError> {
        self.bindings
            .get(index)
            .ok_or(PadError::InvalidKeyIndex(index))
    }

    pub fn standby_colors(&self) -> [Rgb; KEY_COUNT] {
        let mut colors = [color::BLACK; KEY_COUNT];
        for (slot, binding) in colors.iter_mut().zip(self.bindings.iter()) {
            *slot = binding.standby_color;
        }
        colors
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.iter()
    }
}
