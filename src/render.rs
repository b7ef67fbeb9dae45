use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};
use std::io::{self, BufWriter, Stdout, Write};

use crate::engine::Rgb;

pub fn to_term_color(color: Rgb) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Buffered crossterm frontend. All drawing goes through `queue!` into
/// the writer and reaches the terminal only on `flush`, once per frame.
pub struct TerminalRenderer {
    out: BufWriter<Stdout>,
    width: u16,
    height: u16,
    background: Color,
}

impl TerminalRenderer {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            out: BufWriter::new(io::stdout()),
            width,
            height,
            background: Color::Reset,
        })
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.out,
            ResetColor,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn get_size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn manual_resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.width = width;
        self.height = height;
        queue!(self.out, Clear(ClearType::All))
    }

    /// Repaints the whole frame with a flat background color. Every
    /// subsequent cell drawn without an explicit background inherits
    /// it.
    pub fn clear_with_background(&mut self, background: Rgb) -> io::Result<()> {
        self.background = to_term_color(background);
        queue!(
            self.out,
            SetBackgroundColor(self.background),
            Clear(ClearType::All)
        )
    }

    pub fn render_char(&mut self, x: u16, y: u16, c: char, fg: Color) -> io::Result<()> {
        if x >= self.width || y >= self.height {
            return Ok(());
        }
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetBackgroundColor(self.background),
            SetForegroundColor(fg),
            Print(c)
        )
    }

    /// Like `render_char` but with its own cell background, for solid
    /// sprites drawn over the sky.
    pub fn render_cell(&mut self, x: u16, y: u16, c: char, fg: Color, bg: Color) -> io::Result<()> {
        if x >= self.width || y >= self.height {
            return Ok(());
        }
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetBackgroundColor(bg),
            SetForegroundColor(fg),
            Print(c)
        )
    }

    pub fn render_line_colored(&mut self, x: u16, y: u16, text: &str, fg: Color) -> io::Result<()> {
        if y >= self.height || x >= self.width {
            return Ok(());
        }
        let available = (self.width - x) as usize;
        let clipped: String = text.chars().take(available).collect();
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetBackgroundColor(self.background),
            SetForegroundColor(fg),
            Print(clipped)
        )
    }

    /// Line with an explicit background, used for banner boxes and the
    /// selection panel.
    pub fn render_line_on(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Color,
        bg: Color,
    ) -> io::Result<()> {
        if y >= self.height || x >= self.width {
            return Ok(());
        }
        let available = (self.width - x) as usize;
        let clipped: String = text.chars().take(available).collect();
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetBackgroundColor(bg),
            SetForegroundColor(fg),
            Print(clipped)
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
