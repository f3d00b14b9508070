//! Output surfaces: the real terminal and an in-memory recorder.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

/// Somewhere readings can be drawn
pub trait Surface {
    /// Append lines below whatever is already shown
    fn print(&mut self, lines: &[String]) -> io::Result<()>;

    /// Replace the block drawn by the previous `redraw` with `lines`
    fn redraw(&mut self, lines: &[String]) -> io::Result<()>;

    /// Move past the current redraw block so later output is not erased
    fn finish(&mut self) -> io::Result<()>;
}

/// Terminal surface using cursor movement and line clearing
pub struct TerminalSurface<W: Write = Stdout> {
    out: W,
    /// Lines in the block last drawn by `redraw`
    drawn: usize,
}

impl TerminalSurface<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, drawn: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn erase_drawn(&mut self) -> io::Result<()> {
        if self.drawn == 0 {
            return Ok(());
        }
        // The cursor sits on the last row of the block
        queue!(self.out, Clear(ClearType::CurrentLine))?;
        for _ in 1..self.drawn {
            queue!(self.out, MoveUp(1), Clear(ClearType::CurrentLine))?;
        }
        queue!(self.out, MoveToColumn(0))?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn print(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    fn redraw(&mut self, lines: &[String]) -> io::Result<()> {
        self.erase_drawn()?;
        // No trailing newline: the cursor stays on the block's last row
        write!(self.out, "{}", lines.join("\n"))?;
        self.out.flush()?;
        self.drawn = lines.len();
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.drawn > 0 {
            writeln!(self.out)?;
            self.drawn = 0;
        }
        self.out.flush()
    }
}

/// Surface that records output for inspection
#[derive(Debug, Default)]
pub struct MemorySurface {
    /// Every line passed to `print`, in order
    pub printed: Vec<String>,
    /// Block currently shown by `redraw`
    pub frame: Vec<String>,
    /// Number of `redraw` calls
    pub redraws: usize,
    /// Number of `finish` calls
    pub finishes: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for MemorySurface {
    fn print(&mut self, lines: &[String]) -> io::Result<()> {
        self.printed.extend_from_slice(lines);
        Ok(())
    }

    fn redraw(&mut self, lines: &[String]) -> io::Result<()> {
        self.frame = lines.to_vec();
        self.redraws += 1;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finishes += 1;
        Ok(())
    }
}
