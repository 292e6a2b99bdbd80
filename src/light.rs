use std::time::Duration;

use crate::{
    clock::Clock,
    color::{self, Rgb},
    error::PadError,
    transport::KEY_COUNT,
};

pub trait PixelDriver {
    fn write(&mut self, index: usize, color: Rgb);
    fn set_brightness(&mut self, brightness: f32);
}

pub struct LightController<P, C> {
    driver: P,
    clock: C,
    pixels: [Rgb; KEY_COUNT],
    brightness: f32,
    standby_colors: [Rgb; KEY_COUNT],
    off_color: Rgb,
    step: Duration,
}

impl<P: PixelDriver, C: Clock> LightController<P, C> {
    pub fn new(
        driver: P,
        clock: C,
        standby_colors: [Rgb; KEY_COUNT],
        off_color: Rgb,
        step: Duration,
    ) -> Self {
        Self {
            driver,
            clock,
            pixels: [color::BLACK; KEY_COUNT],
            brightness: 0.0,
            standby_colors,
            off_color,
            step,
        }
    }

    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    pub fn pixels(&self) -> &[Rgb; KEY_COUNT] {
        &self.pixels
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn driver(&self) -> &P {
        &self.driver
    }

    pub fn set(&mut self, index: usize, color: Rgb) -> Result<(), PadError> {
        if index >= KEY_COUNT {
            return Err(PadError::InvalidKeyIndex(index));
        }
        self.write(index, color);
        Ok(())
    }

    pub fn set_brightness(&mut self, brightness: f32) {
        log::debug!("Brightness {:.2} -> {:.2}", self.brightness, brightness);
        self.brightness = brightness;
        self.driver.set_brightness(brightness);
    }

    // `None` restores each key's own standby color.
    pub fn cycle(&mut self, color: Option<Rgb>, step_delay: Duration) {
        for index in 0..KEY_COUNT {
            let target = color.unwrap_or(self.standby_colors[index]);
            self.write(index, target);
            self.clock.sleep(step_delay);
        }
    }

    pub fn wake_sequence(&mut self, active_brightness: f32) {
        log::debug!("Wake sequence");
        self.cycle(Some(self.off_color), self.step);
        self.set_brightness(active_brightness);
        for (left, right) in mirrored_pairs() {
            self.write(left, self.standby_colors[left]);
            self.clock.sleep(self.step);
            self.write(right, self.standby_colors[right]);
            self.clock.sleep(self.step);
        }
    }

    pub fn sleep_sequence(&mut self, sleep_brightness: f32) {
        log::debug!("Sleep sequence");
        for (left, right) in mirrored_pairs() {
            self.write(left, self.off_color);
            self.clock.sleep(self.step);
            self.write(right, self.off_color);
            self.clock.sleep(self.step);
        }
        self.set_brightness(sleep_brightness);
    }

    pub fn boot_sequence(&mut self, boot_color: Rgb, pause: Duration, active_brightness: f32) {
        log::debug!("Boot sequence");
        self.set_brightness(active_brightness);
        self.cycle(Some(boot_color), self.step);
        self.clock.sleep(pause);
        self.cycle(Some(self.off_color), self.step);
        // Dark while the standby colors are laid down
        self.set_brightness(0.0);
        self.cycle(None, self.step);
        self.set_brightness(active_brightness);
    }

    #[inline]
    fn write(&mut self, index: usize, color: Rgb) {
        log::trace!("Pixel {} = {}", index, color);
        self.pixels[index] = color;
        self.driver.write(index, color);
    }
}

fn mirrored_pairs() -> impl Iterator<Item = (usize, usize)> {
    (0..KEY_COUNT / 2).map(|i| (i, KEY_COUNT - i - 1))
}
