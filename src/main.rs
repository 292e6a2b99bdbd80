use std::io;

use macropad::{
    clock::SystemClock,
    config::PadConfig,
    keymap::KeyMap,
    output::ReportEmitter,
    sim::{LogSink, TerminalPixels, TerminalSession, TerminalTransport},
    transport::TransportError,
    MacroPad, PadError,
};

fn main() {
    env_logger::init();

    let session = match TerminalSession::enter() {
        Ok(session) => session,
        Err(err) => {
            log::error!("Failed to set up terminal: {}", err);
            std::process::exit(1);
        }
    };

    let result = run(&session);
    // Leave the alternate screen before reporting anything
    drop(session);

    match result {
        Ok(()) | Err(PadError::Transport(TransportError::Disconnected)) => {
            log::info!("Input closed, shutting down");
        }
        Err(err) => {
            log::error!("Macro pad stopped: {}", err);
            std::process::exit(1);
        }
    }
}

fn run(session: &TerminalSession) -> Result<(), PadError> {
    let config = PadConfig::default();
    let keymap = KeyMap::default_layout(config.unbound_color)?;

    let mut pixels = TerminalPixels::new(io::stdout());
    if let Err(err) = pixels.draw_header() {
        log::warn!("Failed to draw header: {}", err);
    }

    let mut pad = MacroPad::new(
        config,
        keymap,
        pixels,
        ReportEmitter::new(LogSink),
        SystemClock::new(),
    )?;

    let mut transport = TerminalTransport::new(session.reports_releases());
    pad.run(&mut transport)?;
    Ok(())
}
