use std::{cell::Cell, rc::Rc, time::Duration};

use crate::{
    clock::Clock,
    color::{self, Rgb},
    keycode::{ConsumerCode, Keycode},
    light::PixelDriver,
    output::{OutputEmitter, TransmissionError},
    transport::KEY_COUNT,
};

// Virtual time: sleeping advances it instantly, clones share one timeline
#[derive(Clone, Default)]
pub struct MockClock {
    current: Rc<Cell<Duration>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, delta: Duration) {
        self.current.set(self.current.get() + delta);
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        self.current.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelOp {
    Write(usize, Rgb),
    Brightness(f32),
}

pub struct RecordingPixels {
    pub ops: Vec<PixelOp>,
    pub pixels: [Rgb; KEY_COUNT],
    pub brightness: f32,
}

impl Default for RecordingPixels {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            pixels: [color::BLACK; KEY_COUNT],
            brightness: 0.0,
        }
    }
}

impl RecordingPixels {
    pub fn brightness_changes(&self) -> Vec<f32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PixelOp::Brightness(level) => Some(*level),
                PixelOp::Write(..) => None,
            })
            .collect()
    }
}

impl PixelDriver for RecordingPixels {
    fn write(&mut self, index: usize, color: Rgb) {
        self.pixels[index] = color;
        self.ops.push(PixelOp::Write(index, color));
    }

    fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness;
        self.ops.push(PixelOp::Brightness(brightness));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Keys(Vec<Keycode>),
    Media(ConsumerCode),
}

// With `fail` set every call is rejected and nothing is recorded
#[derive(Default)]
pub struct RecordingEmitter {
    pub sent: Vec<Sent>,
    pub attempts: usize,
    pub fail: bool,
}

impl RecordingEmitter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn attempt(&mut self, sent: Sent) -> Result<(), TransmissionError> {
        self.attempts += 1;
        if self.fail {
            return Err(TransmissionError::Rejected("host unplugged".to_string()));
        }
        self.sent.push(sent);
        Ok(())
    }
}

impl OutputEmitter for RecordingEmitter {
    fn send_keys(&mut self, codes: &[Keycode]) -> Result<(), TransmissionError> {
        self.attempt(Sent::Keys(codes.to_vec()))
    }

    fn send_media(&mut self, code: ConsumerCode) -> Result<(), TransmissionError> {
        self.attempt(Sent::Media(code))
    }
}
