use std::{
    io::{self, Write},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::{
    color::{self, Rgb},
    light::PixelDriver,
    output::{ReportSink, TransmissionError},
    transport::{ArmedEdges, Edge, EdgeEvent, EdgeObserver, InputTransport, TransportError, KEY_COUNT},
};

const GRID_WIDTH: usize = 4;
const GRID_TOP: u16 = 2;
const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;

// Raw mode and alternate screen for the lifetime of the value
pub struct TerminalSession {
    releases: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on a failed step still restores the terminal on drop
        let mut session = Self { releases: false };

        let mut stdout = io::stdout();
        stdout
            .execute(terminal::EnterAlternateScreen)?
            .execute(terminal::Clear(terminal::ClearType::All))?
            .execute(cursor::Hide)?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            stdout.execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            session.releases = true;
        }
        log::debug!("Terminal reports key releases: {}", session.releases);

        Ok(session)
    }

    pub fn reports_releases(&self) -> bool {
        self.releases
    }

    fn restore(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        if self.releases {
            stdout.execute(PopKeyboardEnhancementFlags)?;
            self.releases = false;
        }
        stdout
            .execute(cursor::Show)?
            .execute(terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::error!("Failed to restore terminal: {}", err);
        }
    }
}

pub struct TerminalPixels<W: Write> {
    out: W,
    pixels: [Rgb; KEY_COUNT],
    brightness: f32,
}

impl<W: Write> TerminalPixels<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            pixels: [color::BLACK; KEY_COUNT],
            brightness: 0.0,
        }
    }

    pub fn shown(&self, index: usize) -> Rgb {
        self.pixels[index].scaled(self.brightness)
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn draw_header(&mut self) -> io::Result<()> {
        self.out
            .queue(cursor::MoveTo(0, 0))?
            .queue(style::Print("keys 1234 / qwer / asdf / zxcv, esc quits"))?;
        self.out.flush()
    }

    fn draw(&mut self, indices: impl Iterator<Item = usize>) -> io::Result<()> {
        for index in indices {
            let shown = self.shown(index);
            let x = (index % GRID_WIDTH) as u16 * CELL_WIDTH;
            let y = GRID_TOP + (index / GRID_WIDTH) as u16 * CELL_HEIGHT;

            self.out.queue(style::SetBackgroundColor(Color::Rgb {
                r: shown.r,
                g: shown.g,
                b: shown.b,
            }))?;
            // Last row and column of every cell stay blank as a gutter
            for row in 0..CELL_HEIGHT - 1 {
                self.out
                    .queue(cursor::MoveTo(x, y + row))?
                    .queue(style::Print(" ".repeat(CELL_WIDTH as usize - 1)))?;
            }
            self.out.queue(style::ResetColor)?;
        }
        self.out.flush()
    }
}

impl<W: Write> PixelDriver for TerminalPixels<W> {
    fn write(&mut self, index: usize, color: Rgb) {
        self.pixels[index] = color;
        if let Err(err) = self.draw(std::iter::once(index)) {
            log::warn!("Failed to draw key {}: {}", index, err);
        }
    }

    fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness;
        log::debug!("Brightness {:.2}", brightness);
        if let Err(err) = self.draw(0..KEY_COUNT) {
            log::warn!("Failed to redraw grid: {}", err);
        }
    }
}

#[derive(Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn write_keyboard(&mut self, report: &[u8; 8]) -> Result<(), TransmissionError> {
        log::info!("Keyboard report {:02x?}", report);
        Ok(())
    }

    fn write_consumer(&mut self, report: &[u8; 2]) -> Result<(), TransmissionError> {
        log::info!("Consumer report {:02x?}", report);
        Ok(())
    }
}

// Keyboard events from the controlling terminal. Esc or Ctrl+C ends the input.
pub struct TerminalTransport {
    armed: ArmedEdges,
    releases: bool,
}

impl TerminalTransport {
    pub fn new(releases: bool) -> Self {
        Self {
            armed: ArmedEdges::default(),
            releases,
        }
    }

    pub fn is_armed(&self, key: usize, edge: Edge) -> bool {
        self.armed.is_armed(key, edge)
    }
}

impl InputTransport for TerminalTransport {
    fn arm(&mut self, key: usize, edge: Edge, enabled: bool) {
        self.armed.set(key, edge, enabled);
    }

    fn sync(&mut self, observer: &mut dyn EdgeObserver) -> Result<(), TransportError> {
        while event::poll(Duration::ZERO).map_err(bus_error)? {
            if let Event::Key(key) = event::read().map_err(bus_error)? {
                for edge in key_edges(&key, self.releases)? {
                    self.armed.deliver(edge, observer);
                }
            }
        }
        Ok(())
    }
}

fn bus_error(err: io::Error) -> TransportError {
    TransportError::Bus(err.to_string())
}

// Without release reporting every press is followed by a synthetic release
pub fn key_edges(key: &KeyEvent, releases: bool) -> Result<Vec<EdgeEvent>, TransportError> {
    match key.code {
        KeyCode::Esc => return Err(TransportError::Disconnected),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Err(TransportError::Disconnected)
        }
        _ => {}
    }

    let index = match key.code {
        KeyCode::Char(c) => map_key(c),
        _ => None,
    };
    let index = match index {
        Some(index) => index,
        None => return Ok(Vec::new()),
    };

    Ok(match key.kind {
        KeyEventKind::Press if releases => vec![EdgeEvent::press(index)],
        KeyEventKind::Press => vec![EdgeEvent::press(index), EdgeEvent::release(index)],
        KeyEventKind::Release => vec![EdgeEvent::release(index)],
        KeyEventKind::Repeat => Vec::new(),
    })
}

pub fn map_key(key: char) -> Option<usize> {
    match key.to_ascii_lowercase() {
        '1' => Some(0),
        '2' => Some(1),
        '3' => Some(2),
        '4' => Some(3),

        'q' => Some(4),
        'w' => Some(5),
        'e' => Some(6),
        'r' => Some(7),

        'a' => Some(8),
        's' => Some(9),
        'd' => Some(10),
        'f' => Some(11),

        'z' => Some(12),
        'x' => Some(13),
        'c' => Some(14),
        'v' => Some(15),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{key_edges, map_key, LogSink, TerminalPixels, TerminalTransport};
    use crate::{
        color,
        light::PixelDriver,
        output::ReportSink,
        transport::{Edge, EdgeEvent, InputTransport, TransportError, KEY_COUNT},
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn map_key_covers_grid_test() {
        let layout = "1234qwerasdfzxcv";
        let mapped: Vec<usize> = layout.chars().filter_map(map_key).collect();
        assert_eq!(mapped, (0..KEY_COUNT).collect::<Vec<_>>());
        assert_eq!(map_key('Q'), Some(4));
        assert_eq!(map_key('5'), None);
    }

    #[test]
    fn press_and_release_events_test() {
        let press = key(KeyCode::Char('w'), KeyEventKind::Press);
        let release = key(KeyCode::Char('w'), KeyEventKind::Release);
        let repeat = key(KeyCode::Char('w'), KeyEventKind::Repeat);

        assert_eq!(key_edges(&press, true), Ok(vec![EdgeEvent::press(5)]));
        assert_eq!(key_edges(&release, true), Ok(vec![EdgeEvent::release(5)]));
        assert_eq!(key_edges(&repeat, true), Ok(vec![]));
    }

    #[test]
    fn press_without_release_support_test() {
        let press = key(KeyCode::Char('V'), KeyEventKind::Press);
        assert_eq!(
            key_edges(&press, false),
            Ok(vec![EdgeEvent::press(15), EdgeEvent::release(15)])
        );
    }

    #[test]
    fn unmapped_keys_ignored_test() {
        let enter = key(KeyCode::Enter, KeyEventKind::Press);
        let five = key(KeyCode::Char('5'), KeyEventKind::Press);
        assert_eq!(key_edges(&enter, false), Ok(vec![]));
        assert_eq!(key_edges(&five, false), Ok(vec![]));
    }

    #[test]
    fn quit_keys_disconnect_test() {
        let esc = key(KeyCode::Esc, KeyEventKind::Press);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_edges(&esc, true), Err(TransportError::Disconnected));
        assert_eq!(key_edges(&ctrl_c, true), Err(TransportError::Disconnected));

        // Plain 'c' is a pad key
        let c = key(KeyCode::Char('c'), KeyEventKind::Press);
        assert_eq!(key_edges(&c, true), Ok(vec![EdgeEvent::press(14)]));
    }

    #[test]
    fn terminal_transport_arming_test() {
        let mut transport = TerminalTransport::new(false);
        assert!(!transport.is_armed(0, Edge::Rising));
        transport.arm_all();
        assert!(transport.is_armed(0, Edge::Rising));
        assert!(transport.is_armed(15, Edge::Falling));
    }

    #[test]
    fn draw_test() {
        let mut pixels = TerminalPixels::new(Vec::new());
        pixels.set_brightness(1.0);
        pixels.write(0, color::RED);
        assert_eq!(pixels.shown(0), color::RED);
        let drawn = String::from_utf8_lossy(pixels.output()).into_owned();
        assert!(drawn.contains("\x1b[48;2;255;0;0m"));

        pixels.set_brightness(0.0);
        assert_eq!(pixels.shown(0), color::BLACK);
        let drawn = String::from_utf8_lossy(pixels.output()).into_owned();
        assert!(drawn.ends_with("\x1b[0m"));
    }

    #[test]
    fn log_sink_accepts_reports_test() {
        let mut sink = LogSink;
        assert!(sink.write_keyboard(&[0; 8]).is_ok());
        assert!(sink.write_consumer(&[0xCD, 0]).is_ok());
    }
}
