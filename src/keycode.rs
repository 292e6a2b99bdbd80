#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Keycode {
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0A,
    H = 0x0B,
    I = 0x0C,
    J = 0x0D,
    K = 0x0E,
    L = 0x0F,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1A,
    X = 0x1B,
    Y = 0x1C,
    Z = 0x1D,

    One = 0x1E,
    Two = 0x1F,
    Three = 0x20,
    Four = 0x21,
    Five = 0x22,
    Six = 0x23,
    Seven = 0x24,
    Eight = 0x25,
    Nine = 0x26,
    Zero = 0x27,

    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equals = 0x2E,

    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    PrintScreen = 0x46,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    RightArrow = 0x4F,
    LeftArrow = 0x50,
    DownArrow = 0x51,
    UpArrow = 0x52,

    // Modifiers travel in the report's bitmask byte, not the key slots
    LeftControl = 0xE0,
    LeftShift = 0xE1,
    LeftAlt = 0xE2,
    LeftGui = 0xE3,
    RightControl = 0xE4,
    RightShift = 0xE5,
    RightAlt = 0xE6,
    RightGui = 0xE7,
}

impl Keycode {
    // Aliases for the names the keymap is written with
    pub const CONTROL: Keycode = Keycode::LeftControl;
    pub const SHIFT: Keycode = Keycode::LeftShift;
    pub const ALT: Keycode = Keycode::LeftAlt;
    pub const WINDOWS: Keycode = Keycode::LeftGui;

    pub fn usage(self) -> u8 {
        self as u8
    }

    pub fn is_modifier(self) -> bool {
        (0xE0..=0xE7).contains(&self.usage())
    }

    // Bit in the modifier byte (bit 0 = left control, bit 7 = right GUI).
    pub fn modifier_bit(self) -> u8 {
        if self.is_modifier() {
            1 << (self.usage() - 0xE0)
        } else {
            0
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ConsumerCode {
    BrightnessIncrement = 0x6F,
    BrightnessDecrement = 0x70,
    Record = 0xB2,
    FastForward = 0xB3,
    Rewind = 0xB4,
    ScanNextTrack = 0xB5,
    ScanPreviousTrack = 0xB6,
    Stop = 0xB7,
    Eject = 0xB8,
    PlayPause = 0xCD,
    Mute = 0xE2,
    VolumeIncrement = 0xE9,
    VolumeDecrement = 0xEA,
}

impl ConsumerCode {
    pub fn usage(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsumerCode, Keycode};

    #[test]
    fn modifier_test() {
        assert!(Keycode::CONTROL.is_modifier());
        assert!(Keycode::RightGui.is_modifier());
        assert!(!Keycode::S.is_modifier());

        assert_eq!(Keycode::LeftControl.modifier_bit(), 0b0000_0001);
        assert_eq!(Keycode::WINDOWS.modifier_bit(), 0b0000_1000);
        assert_eq!(Keycode::RightGui.modifier_bit(), 0b1000_0000);
        assert_eq!(Keycode::F10.modifier_bit(), 0);
    }

    #[test]
    fn usage_test() {
        assert_eq!(Keycode::S.usage(), 0x16);
        assert_eq!(Keycode::Two.usage(), 0x1F);
        assert_eq!(ConsumerCode::PlayPause.usage(), 0xCD);
        assert_eq!(ConsumerCode::Mute.usage(), 0xE2);
    }
}
