use std::time::Duration;

use thiserror::Error;

use crate::color::{self, Rgb};

// Brightness levels, applied multiplicatively by the pixel driver
const ACTIVE_BRIGHTNESS: f32 = 0.7;
const STANDBY_BRIGHTNESS: f32 = 0.1;
const SLEEP_BRIGHTNESS: f32 = 0.0;

// Inactivity timeouts
const STANDBY_TIMEOUT: Duration = Duration::from_secs(5);
const SLEEP_TIMEOUT: Duration = Duration::from_secs(60);

// Main loop and animation cadence
const TICK: Duration = Duration::from_millis(20);
const ANIMATION_STEP: Duration = Duration::from_millis(10);
const BOOT_PAUSE: Duration = Duration::from_millis(200);

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} brightness {value} is outside 0.0..=1.0")]
    BrightnessOutOfRange { name: &'static str, value: f32 },

    #[error("sleep timeout {sleep:?} is shorter than standby timeout {standby:?}")]
    TimeoutOrder { standby: Duration, sleep: Duration },

    #[error("tick duration must be non-zero")]
    ZeroTick,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PadConfig {
    pub active_brightness: f32,
    pub standby_brightness: f32,
    pub sleep_brightness: f32,
    pub standby_timeout: Duration,
    pub sleep_timeout: Duration,
    pub tick: Duration,
    pub animation_step: Duration,
    pub boot_pause: Duration,
    pub boot_color: Rgb,
    pub off_color: Rgb,
    pub unbound_color: Rgb,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            active_brightness: ACTIVE_BRIGHTNESS,
            standby_brightness: STANDBY_BRIGHTNESS,
            sleep_brightness: SLEEP_BRIGHTNESS,
            standby_timeout: STANDBY_TIMEOUT,
            sleep_timeout: SLEEP_TIMEOUT,
            tick: TICK,
            animation_step: ANIMATION_STEP,
            boot_pause: BOOT_PAUSE,
            boot_color: color::AQUA,
            off_color: color::BLACK,
            unbound_color: color::WHITE,
        }
    }
}

impl PadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let levels = [
            ("active", self.active_brightness),
            ("standby", self.standby_brightness),
            ("sleep", self.sleep_brightness),
        ];
        for (name, value) in levels.iter() {
            if !(0.0..=1.0).contains(value) {
                return Err(ConfigError::BrightnessOutOfRange {
                    name: *name,
                    value: *value,
                });
            }
        }

        if self.sleep_timeout < self.standby_timeout {
            return Err(ConfigError::TimeoutOrder {
                standby: self.standby_timeout,
                sleep: self.sleep_timeout,
            });
        }

        if self.tick == Duration::from_millis(0) {
            return Err(ConfigError::ZeroTick);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PadConfig};
    use std::time::Duration;

    #[test]
    fn default_is_valid_test() {
        let config = PadConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.standby_timeout, Duration::from_secs(5));
        assert_eq!(config.sleep_timeout, Duration::from_secs(60));
        assert_eq!(config.tick, Duration::from_millis(20));
    }

    #[test]
    fn brightness_range_test() {
        let config = PadConfig {
            standby_brightness: 1.5,
            ..PadConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BrightnessOutOfRange {
                name: "standby",
                value: 1.5
            })
        );
    }

    #[test]
    fn timeout_order_test() {
        let config = PadConfig {
            standby_timeout: Duration::from_secs(10),
            sleep_timeout: Duration::from_secs(3),
            ..PadConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TimeoutOrder { .. })
        ));
    }

    #[test]
    fn zero_tick_test() {
        let config = PadConfig {
            tick: Duration::from_millis(0),
            ..PadConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTick));
    }
}
