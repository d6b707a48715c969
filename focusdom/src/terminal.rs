//! Terminal setup, teardown and line-based drawing.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Raw-mode alternate screen that restores the terminal on drop or panic.
pub struct Terminal {
    stdout: Stdout,
    previous: Vec<String>,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        // Restore the terminal before the panic message is printed
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        Ok(Self {
            stdout,
            previous: Vec::new(),
        })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Draw full-screen lines, rewriting only the rows that changed.
    pub fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        if lines.len() != self.previous.len() {
            queue!(self.stdout, Clear(ClearType::All))?;
            self.previous.clear();
        }

        for (y, line) in lines.iter().enumerate() {
            if self.previous.get(y) == Some(line) {
                continue;
            }
            queue!(
                self.stdout,
                cursor::MoveTo(0, y as u16),
                Clear(ClearType::CurrentLine)
            )?;
            self.stdout.write_all(line.as_bytes())?;
        }

        self.stdout.flush()?;
        self.previous = lines.to_vec();
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        cursor::Show,
        DisableMouseCapture
    )?;
    Ok(())
}
