use thiserror::Error;

use crate::{
    keycode::{ConsumerCode, Keycode},
    report::{ConsumerReport, KeyboardReport},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransmissionError {
    #[error("combo holds {count} keys, a report carries at most 6")]
    TooManyKeys { count: usize },

    #[error("combo has no keys")]
    EmptyCombo,

    #[error("host rejected report: {0}")]
    Rejected(String),
}

pub trait OutputEmitter {
    fn send_keys(&mut self, codes: &[Keycode]) -> Result<(), TransmissionError>;

    fn send_media(&mut self, code: ConsumerCode) -> Result<(), TransmissionError>;
}

pub trait ReportSink {
    fn write_keyboard(&mut self, report: &[u8; 8]) -> Result<(), TransmissionError>;
    fn write_consumer(&mut self, report: &[u8; 2]) -> Result<(), TransmissionError>;
}

pub struct ReportEmitter<S> {
    sink: S,
}

impl<S: ReportSink> ReportEmitter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: ReportSink> OutputEmitter for ReportEmitter<S> {
    fn send_keys(&mut self, codes: &[Keycode]) -> Result<(), TransmissionError> {
        let pressed = KeyboardReport::pressing(codes)?;
        self.sink.write_keyboard(&pressed.to_bytes())?;

        // A failed release gets one retry, otherwise the keys stay held on the host
        let released = KeyboardReport::empty().to_bytes();
        if let Err(err) = self.sink.write_keyboard(&released) {
            log::warn!("Release report failed ({}), retrying", err);
            self.sink.write_keyboard(&released)?;
        }
        Ok(())
    }

    fn send_media(&mut self, code: ConsumerCode) -> Result<(), TransmissionError> {
        self.sink
            .write_consumer(&ConsumerReport::pressing(code).to_bytes())?;

        let released = ConsumerReport::released().to_bytes();
        if let Err(err) = self.sink.write_consumer(&released) {
            log::warn!("Release report failed ({}), retrying", err);
            self.sink.write_consumer(&released)?;
        }
        Ok(())
    }
}
