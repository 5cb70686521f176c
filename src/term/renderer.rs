//! TerminalRenderer: flushes framebuffers to the real terminal.
//!
//! Keeps the previous frame and redraws only changed cell runs, which is
//! plenty at 60 fps over a 10x20 board.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint everything (terminal resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        let full = match &self.last {
            Some(prev) => prev.width() != fb.width() || prev.height() != fb.height(),
            None => true,
        };

        if full {
            self.stdout.queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut style: Option<CellStyle> = None;
        for y in 0..fb.height() {
            let mut x = 0;
            let mut cursor_at: Option<u16> = None;
            while x < fb.width() {
                let cell = fb.get(x, y).unwrap_or_default();
                let unchanged = !full
                    && self
                        .last
                        .as_ref()
                        .and_then(|prev| prev.get(x, y))
                        .map(|prev_cell| prev_cell == cell)
                        .unwrap_or(false);
                if unchanged {
                    cursor_at = None;
                    x += 1;
                    continue;
                }

                if cursor_at != Some(x) {
                    self.stdout.queue(cursor::MoveTo(x, y))?;
                }
                if style != Some(cell.style) {
                    self.apply_style(cell.style)?;
                    style = Some(cell.style);
                }
                self.stdout.queue(Print(cell.ch))?;
                cursor_at = Some(x + 1);
                x += 1;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;

        self.last = Some(fb.clone());
        Ok(())
    }

    fn apply_style(&mut self, style: CellStyle) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(SetForegroundColor(to_color(style.fg)))?;
        self.stdout.queue(SetBackgroundColor(to_color(style.bg)))?;
        if style.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Count the cells that differ between two equal-sized frames.
/// Exposed for tests; the draw path does the same walk inline.
pub fn diff_count(prev: &FrameBuffer, next: &FrameBuffer) -> usize {
    let mut count = 0;
    for y in 0..next.height() {
        for x in 0..next.width() {
            let a = prev.get(x, y).unwrap_or_default();
            let b: Cell = next.get(x, y).unwrap_or_default();
            if a != b {
                count += 1;
            }
        }
    }
    count
}
