pub mod activity;
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod keycode;
pub mod keymap;
pub mod light;
pub mod output;
pub mod pad;
pub mod report;
pub mod sim;
pub mod transport;

#[cfg(test)]
mod test_utils;

pub use error::PadError;
pub use pad::MacroPad;
