use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn scaled(self, brightness: f32) -> Self {
        let level = brightness.max(0.0).min(1.0);
        let scale = |channel: u8| (channel as f32 * level).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    pub fn is_off(&self) -> bool {
        *self == BLACK
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// Named palette, matching the LED animation library the pad was designed against
pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const YELLOW: Rgb = Rgb::new(255, 150, 0);
pub const ORANGE: Rgb = Rgb::new(255, 40, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const TEAL: Rgb = Rgb::new(0, 255, 120);
pub const CYAN: Rgb = Rgb::new(0, 255, 255);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);
pub const PURPLE: Rgb = Rgb::new(180, 0, 255);
pub const MAGENTA: Rgb = Rgb::new(255, 0, 20);
pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const GOLD: Rgb = Rgb::new(255, 222, 30);
pub const PINK: Rgb = Rgb::new(242, 90, 255);
pub const AQUA: Rgb = Rgb::new(50, 255, 255);
pub const JADE: Rgb = Rgb::new(0, 255, 40);
pub const AMBER: Rgb = Rgb::new(255, 100, 0);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn display_test() {
        assert_eq!(GOLD.to_string(), "#ffde1e");
        assert_eq!(BLACK.to_string(), "#000000");
    }

    #[test]
    fn scaled_bounds_test() {
        assert_eq!(WHITE.scaled(0.0), BLACK);
        assert_eq!(WHITE.scaled(1.0), WHITE);
        // Out of range brightness is clamped rather than wrapping
        assert_eq!(WHITE.scaled(2.5), WHITE);
        assert_eq!(WHITE.scaled(-1.0), BLACK);
        assert!(AQUA.scaled(0.0).is_off());
    }

    proptest! {
        #[test]
        fn scaled_never_brightens_proptest(r in any::<u8>(), g in any::<u8>(), b in any::<u8>(), level in 0.0f32..=1.0) {
            let color = Rgb::new(r, g, b);
            let dimmed = color.scaled(level);
            prop_assert!(dimmed.r <= color.r);
            prop_assert!(dimmed.g <= color.g);
            prop_assert!(dimmed.b <= color.b);
        }
    }
}
