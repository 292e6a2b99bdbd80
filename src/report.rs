use crate::{
    keycode::{ConsumerCode, Keycode},
    output::TransmissionError,
};

pub const KEY_SLOTS: usize = 6;

// Boot keyboard layout. Byte 0: modifier bitmask
// Byte 1: reserved
// Bytes 2-7: up to six simultaneous key usages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardReport {
    pub modifiers: u8,
    pub reserved: u8,
    pub keys: [u8; KEY_SLOTS],
}

impl KeyboardReport {
    pub const fn empty() -> Self {
        Self {
            modifiers: 0,
            reserved: 0,
            keys: [0; KEY_SLOTS],
        }
    }

    pub fn pressing(codes: &[Keycode]) -> Result<Self, TransmissionError> {
        if codes.is_empty() {
            return Err(TransmissionError::EmptyCombo);
        }

        let mut report = Self::empty();
        let mut key_idx = 0usize;
        for code in codes {
            if code.is_modifier() {
                report.modifiers |= code.modifier_bit();
                continue;
            }
            // A repeated key occupies one slot
            if report.keys[..key_idx].contains(&code.usage()) {
                continue;
            }
            if key_idx == KEY_SLOTS {
                let count = codes.iter().filter(|code| !code.is_modifier()).count();
                return Err(TransmissionError::TooManyKeys { count });
            }
            report.keys[key_idx] = code.usage();
            key_idx += 1;
        }

        Ok(report)
    }

    pub fn to_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0] = self.modifiers;
        bytes[1] = self.reserved;
        bytes[2..].copy_from_slice(&self.keys);
        bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerReport {
    pub usage: u16,
}

impl ConsumerReport {
    pub fn pressing(code: ConsumerCode) -> Self {
        Self {
            usage: code.usage(),
        }
    }

    pub const fn released() -> Self {
        Self { usage: 0 }
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        self.usage.to_le_bytes()
    }
}
