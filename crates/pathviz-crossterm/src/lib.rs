//! Crossterm terminal driver for pathviz.
//!
//! Provides a [`CrosstermDriver`] that implements [`pathviz_core::Driver`].
//! Each grid cell is drawn two terminal columns wide; the status lines go
//! below the grid.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathviz_core::{CellView, Context, Driver, Frame, Key, MouseAction, Msg, Pos, Shade};

/// Terminal columns per grid cell.
pub const CELL_WIDTH: u16 = 2;

/// Maps a crossterm [`KeyCode`] to a pathviz [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Terminal cell → grid position.
fn screen_to_grid(column: u16, row: u16) -> Pos {
    Pos::new(row as i32, (column / CELL_WIDTH) as i32)
}

/// Grid position → terminal cell, or `None` if it lies past the terminal's
/// coordinate range.
fn grid_to_screen(p: Pos) -> Option<(u16, u16)> {
    let column = u16::try_from(p.col).ok()?.checked_mul(CELL_WIDTH)?;
    let row = u16::try_from(p.row).ok()?;
    Some((column, row))
}

/// Colours and text for one grid cell.
fn paint(shade: Shade) -> (CtColor, CtColor, &'static str) {
    match shade {
        Shade::Start => (CtColor::Black, CtColor::Green, "S "),
        Shade::End => (CtColor::Black, CtColor::Red, "E "),
        Shade::Wall => (CtColor::White, CtColor::DarkGrey, "  "),
        Shade::Path => (CtColor::Black, CtColor::Yellow, "  "),
        Shade::Visited => (CtColor::Black, CtColor::DarkCyan, "  "),
        Shade::Unvisited => (CtColor::DarkGrey, CtColor::Reset, "· "),
    }
}

/// A terminal back-end for pathviz using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
    // every view drawn so far, so the grid can be repainted after a resize
    shadow: Vec<CellView>,
    rows: i32,
    cols: i32,
    status: Vec<String>,
}

impl CrosstermDriver {
    /// Create a new driver.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
            shadow: Vec::new(),
            rows: 0,
            cols: 0,
            status: Vec::new(),
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    fn draw_cells<'a>(
        &self,
        out: &mut impl Write,
        cells: impl Iterator<Item = &'a CellView>,
    ) -> io::Result<()> {
        for v in cells {
            let Some((column, row)) = grid_to_screen(v.pos) else {
                continue;
            };
            let (fg, bg, text) = paint(v.shade());
            queue!(
                out,
                cursor::MoveTo(column, row),
                SetForegroundColor(fg),
                SetBackgroundColor(bg),
                Print(text)
            )?;
        }
        queue!(out, ResetColor)
    }

    fn draw_status(&self, out: &mut impl Write) -> io::Result<()> {
        let top = u16::try_from(self.rows).unwrap_or(u16::MAX).saturating_add(1);
        for (i, line) in self.status.iter().enumerate() {
            queue!(
                out,
                cursor::MoveTo(0, top.saturating_add(i as u16)),
                terminal::Clear(ClearType::UntilNewLine),
                Print(line)
            )?;
        }
        Ok(())
    }

    fn redraw(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(ClearType::All))?;
        self.draw_cells(&mut stdout, self.shadow.iter())?;
        self.draw_status(&mut stdout)?;
        stdout.flush()
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        log::debug!("crossterm: terminal initialised");
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Short timeout so the loop keeps ticking playback.
        if !event::poll(Duration::from_millis(1))? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }

            let msg = match event::read()? {
                Event::Key(KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers,
                    ..
                }) if modifiers.contains(KeyModifiers::CONTROL) => Some(Msg::Quit),
                Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                    to_key(code).map(|key| Msg::KeyDown {
                        key,
                        time: Instant::now(),
                    })
                }
                Event::Mouse(me) => {
                    let action = match me.kind {
                        MouseEventKind::Down(MouseButton::Left) => Some(MouseAction::Main),
                        MouseEventKind::Down(_) => Some(MouseAction::Secondary),
                        MouseEventKind::Up(_) => Some(MouseAction::Release),
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(MouseAction::Move),
                        _ => None,
                    };
                    action.map(|action| Msg::Mouse {
                        action,
                        pos: screen_to_grid(me.column, me.row),
                        time: Instant::now(),
                    })
                }
                Event::Resize(w, h) => {
                    self.redraw()?;
                    Some(Msg::Screen {
                        rows: h as i32,
                        cols: w as i32,
                        time: Instant::now(),
                    })
                }
                _ => None,
            };

            if let Some(m) = msg {
                tx.send(m).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: &Frame, status: &[String]) -> Result<(), Box<dyn std::error::Error>> {
        let resized = frame.rows != self.rows || frame.cols != self.cols;
        if resized {
            self.rows = frame.rows;
            self.cols = frame.cols;
            self.shadow.clear();
        }
        for v in &frame.cells {
            let idx = (v.pos.row * frame.cols + v.pos.col) as usize;
            if idx >= self.shadow.len() {
                self.shadow.resize(idx + 1, *v);
            }
            self.shadow[idx] = *v;
        }
        self.status = status.to_vec();

        let mut stdout = io::stdout();
        if resized {
            queue!(stdout, terminal::Clear(ClearType::All))?;
        }
        self.draw_cells(&mut stdout, frame.cells.iter())?;
        self.draw_status(&mut stdout)?;
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        log::debug!("crossterm: terminal restored");
    }
}
