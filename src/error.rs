use thiserror::Error;

use crate::{config::ConfigError, output::TransmissionError, transport::TransportError};

#[derive(Error, Debug)]
pub enum PadError {
    #[error("invalid key index {0}")]
    InvalidKeyIndex(usize),

    #[error("key {0} is bound more than once")]
    DuplicateBinding(usize),

    #[error("key {0} has no binding")]
    UnboundKeyPressed(usize),

    #[error("transmission failed: {0}")]
    Transmission(#[from] TransmissionError),

    #[error("input transport failed: {0}")]
    Transport(#[from] TransportError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
